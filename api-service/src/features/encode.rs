//! Request-to-feature-vector alignment
//!
//! One-hot encodes a flat payload and re-indexes it to a model's expected
//! column list. A categorical `field: "value"` pair becomes the indicator
//! column `field_value`, numerics pass through under their own name, absent
//! columns are zero-filled and unknown ones dropped. The result always has
//! exactly the schema's width, in the schema's order.

use serde_json::{Map, Value};

use super::schema::FeatureSchema;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("field '{0}' is not a scalar")]
    NonScalar(String),
}

/// Indicator column name for a categorical value.
///
/// Must match the naming the training pipeline used when dummy-encoding the
/// fitting data, or the indicator silently lands outside the schema.
fn dummy_column(field: &str, value: &str) -> String {
    format!("{}_{}", field, value)
}

/// Encode a flat JSON object into the vector `schema` describes.
pub fn encode(payload: &Map<String, Value>, schema: &FeatureSchema) -> Result<Vec<f32>, EncodeError> {
    let mut features = vec![0.0f32; schema.len()];

    for (field, value) in payload {
        match value {
            Value::Number(n) => {
                let v = n
                    .as_f64()
                    .ok_or_else(|| EncodeError::NonScalar(field.clone()))?;
                if let Some(i) = schema.index_of(field) {
                    features[i] = v as f32;
                }
            }
            Value::Bool(b) => {
                if let Some(i) = schema.index_of(field) {
                    features[i] = if *b { 1.0 } else { 0.0 };
                }
            }
            Value::String(s) => {
                if let Some(i) = schema.index_of(&dummy_column(field, s)) {
                    features[i] = 1.0;
                }
            }
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(EncodeError::NonScalar(field.clone()));
            }
        }
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> FeatureSchema {
        FeatureSchema::from_columns(vec![
            "distance".to_string(),
            "time".to_string(),
            "flightType_economic".to_string(),
            "flightType_premium".to_string(),
            "agency_CloudFy".to_string(),
        ])
        .unwrap()
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn numerics_pass_through_in_schema_order() {
        let encoded = encode(
            &payload(json!({"time": 1.2, "distance": 430})),
            &schema(),
        )
        .unwrap();

        assert_eq!(encoded, vec![430.0, 1.2, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn strings_become_indicator_columns() {
        let encoded = encode(
            &payload(json!({"flightType": "premium", "agency": "CloudFy"})),
            &schema(),
        )
        .unwrap();

        assert_eq!(encoded, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn unknown_columns_are_dropped() {
        let encoded = encode(
            &payload(json!({"agency": "NoSuchAgency", "seat": 12})),
            &schema(),
        )
        .unwrap();

        assert_eq!(encoded, vec![0.0; 5]);
    }

    #[test]
    fn absent_columns_zero_fill() {
        let encoded = encode(&payload(json!({"distance": 100})), &schema()).unwrap();
        assert_eq!(encoded, vec![100.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn bools_encode_as_indicator_values() {
        let schema = FeatureSchema::from_columns(vec!["is_weekend".to_string()]).unwrap();
        let encoded = encode(&payload(json!({"is_weekend": true})), &schema).unwrap();
        assert_eq!(encoded, vec![1.0]);
    }

    #[test]
    fn empty_payload_is_all_zeros() {
        let encoded = encode(&Map::new(), &schema()).unwrap();
        assert_eq!(encoded, vec![0.0; 5]);
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = encode(&payload(json!({"legs": [1, 2]})), &schema()).unwrap_err();
        assert!(matches!(err, EncodeError::NonScalar(field) if field == "legs"));

        let err = encode(&payload(json!({"meta": {"a": 1}})), &schema()).unwrap_err();
        assert!(matches!(err, EncodeError::NonScalar(field) if field == "meta"));
    }

    #[test]
    fn null_is_rejected() {
        let err = encode(&payload(json!({"agency": null})), &schema()).unwrap_err();
        assert!(matches!(err, EncodeError::NonScalar(field) if field == "agency"));
    }
}
