//! HTTP client for the prediction API

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Flight attributes the price model was trained on.
///
/// Serialized names must match the columns the API aligns against, hence
/// the renames.
#[derive(Debug, Clone, Serialize)]
pub struct FlightQuote {
    #[serde(rename = "from")]
    pub from_city: String,
    #[serde(rename = "to")]
    pub to_city: String,
    #[serde(rename = "flightType")]
    pub flight_type: String,
    pub agency: String,
    pub distance: f64,
    pub time: f64,
    pub day: u8,
    pub day_of_week: u8,
}

#[derive(Debug, Deserialize)]
struct FlightPrediction {
    predicted_price: f64,
}

#[derive(Debug, Serialize)]
struct GenderQuery<'a> {
    age: u32,
    company: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenderPrediction {
    predicted_gender: String,
}

#[derive(Debug, Deserialize)]
struct Liveness {
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct ModelStatus {
    pub name: String,
    pub loaded: bool,
    pub engine: String,
    pub artifact: Option<String>,
    pub feature_count: usize,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<ModelStatus>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Client for the prediction API.
///
/// Holds a connection pool internally, so one client is reused between
/// requests.
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn predict_flight(&self, quote: &FlightQuote) -> Result<f64, DashboardError> {
        let response: FlightPrediction = self.post_json("/predict/flight", quote)?;
        Ok(response.predicted_price)
    }

    pub fn predict_gender(&self, age: u32, company: &str) -> Result<String, DashboardError> {
        let response: GenderPrediction =
            self.post_json("/predict/gender", &GenderQuery { age, company })?;
        Ok(response.predicted_gender)
    }

    pub fn liveness(&self) -> Result<String, DashboardError> {
        log::debug!("GET {}/", self.base_url);
        let response = self.client.get(format!("{}/", self.base_url)).send()?;
        let body: Liveness = Self::parse(response)?;
        Ok(body.message)
    }

    pub fn model_status(&self) -> Result<Vec<ModelStatus>, DashboardError> {
        log::debug!("GET {}/models", self.base_url);
        let response = self.client.get(format!("{}/models", self.base_url)).send()?;
        let body: ModelsResponse = Self::parse(response)?;
        Ok(body.models)
    }

    fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, DashboardError>
    where
        B: Serialize,
        T: for<'de> Deserialize<'de>,
    {
        log::debug!("POST {}{}", self.base_url, path);
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()?;
        Self::parse(response)
    }

    fn parse<T>(response: reqwest::blocking::Response) -> Result<T, DashboardError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        if !status.is_success() {
            // The API reports failures as {"error": "..."}; keep the message
            // when it is there.
            let message = response
                .json::<ApiErrorBody>()
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {}", status));

            return Err(DashboardError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flight_quote_serializes_with_wire_names() {
        let quote = FlightQuote {
            from_city: "Florianopolis (SC)".to_string(),
            to_city: "Rio de Janeiro (RJ)".to_string(),
            flight_type: "economic".to_string(),
            agency: "CloudFy".to_string(),
            distance: 430.0,
            time: 1.2,
            day: 15,
            day_of_week: 0,
        };

        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["from"], "Florianopolis (SC)");
        assert_eq!(value["to"], "Rio de Janeiro (RJ)");
        assert_eq!(value["flightType"], "economic");
        assert_eq!(value["day_of_week"], 0);
        assert!(value.get("from_city").is_none());
    }

    #[test]
    fn prediction_bodies_deserialize() {
        let price: FlightPrediction =
            serde_json::from_value(json!({"predicted_price": 812.4})).unwrap();
        assert!((price.predicted_price - 812.4).abs() < 1e-9);

        let gender: GenderPrediction =
            serde_json::from_value(json!({"predicted_gender": "male"})).unwrap();
        assert_eq!(gender.predicted_gender, "male");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://127.0.0.1:5000/");
        assert_eq!(client.base_url, "http://127.0.0.1:5000");
    }
}
