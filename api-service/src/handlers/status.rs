//! Model status handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::inference::ModelStatus;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelStatus>,
}

/// Status of every served model
pub async fn models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: vec![state.flight.status(), state.gender.status()],
    })
}
