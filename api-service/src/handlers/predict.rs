//! Prediction handlers
//!
//! The request body is a flat mapping of field name to scalar describing a
//! trip or a person; alignment to each model's expected columns happens in
//! the service layer.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct FlightPrediction {
    pub predicted_price: f64,
}

#[derive(Debug, Serialize)]
pub struct GenderPrediction {
    pub predicted_gender: &'static str,
}

/// Flight price regression
pub async fn flight(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> AppResult<Json<FlightPrediction>> {
    let output = state.flight.predict(&payload)?;
    let price = output
        .first()
        .copied()
        .ok_or_else(|| AppError::Inference("model returned no output".to_string()))?;

    Ok(Json(FlightPrediction {
        predicted_price: price as f64,
    }))
}

/// Binary gender classification
pub async fn gender(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> AppResult<Json<GenderPrediction>> {
    let output = state.gender.predict(&payload)?;
    let label = output
        .first()
        .copied()
        .ok_or_else(|| AppError::Inference("model returned no output".to_string()))?;

    Ok(Json(GenderPrediction {
        predicted_gender: gender_label(label),
    }))
}

/// Class label mapping. The raw output is truncated to an integer;
/// anything outside the trained classes is "unknown".
fn gender_label(raw: f32) -> &'static str {
    match raw as i64 {
        0 => "female",
        1 => "male",
        _ => "unknown",
    }
}
