//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::inference::{InferenceError, PredictError};

pub type AppResult<T> = Result<T, AppError>;

/// Route-boundary error.
///
/// Every failure a prediction handler can hit (malformed payload content,
/// missing model, schema mismatch, failed inference) surfaces to the client
/// as `{"error": <msg>}` with HTTP 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("{0}")]
    Inference(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!("prediction request failed: {}", message);

        let body = Json(json!({ "error": message }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::Encode(e) => AppError::InvalidPayload(e.to_string()),
            PredictError::Inference(e) => AppError::Inference(e.to_string()),
        }
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::Inference(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_surface_as_500() {
        let response = AppError::InvalidPayload("field 'x' is not a scalar".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn predict_errors_map_by_kind() {
        let err: AppError = PredictError::Inference(InferenceError("model not loaded".into())).into();
        assert!(matches!(err, AppError::Inference(_)));
        assert_eq!(err.to_string(), "model not loaded");
    }
}
