//! Voyage Analytics Prediction API
//!
//! Serves two pre-trained models behind a small HTTP API: a flight price
//! regressor and a binary gender classifier. Model training, feature
//! engineering and serialization happen elsewhere; the artifacts arrive as
//! opaque ONNX files, each paired with the ordered expected-feature list it
//! was fitted on. Request payloads are one-hot encoded and re-indexed to
//! that list before inference.

mod config;
mod error;
mod features;
mod handlers;
mod inference;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use config::Config;
use features::FeatureSchema;
use inference::{OnnxEngine, PredictionService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyage_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Voyage Analytics API starting...");
    tracing::info!("Environment: {}", config.environment);

    // Load models and their expected-feature lists
    let flight = load_service(
        "flight_price",
        &config.flight_features_path,
        &config.flight_model_path,
    )?;
    let gender = load_service(
        "gender_clf",
        &config.gender_features_path,
        &config.gender_model_path,
    )?;

    let state = AppState {
        flight: Arc::new(flight),
        gender: Arc::new(gender),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Build one prediction service.
///
/// The feature list is mandatory; a missing model artifact only logs a
/// warning and leaves the engine unloaded, so the server still comes up and
/// surfaces the failure per request.
fn load_service(
    name: &str,
    features_path: &str,
    model_path: &str,
) -> anyhow::Result<PredictionService> {
    let schema = FeatureSchema::from_file(features_path)
        .with_context(|| format!("loading feature list for '{}' from {}", name, features_path))?;

    let engine = OnnxEngine::new();
    match engine.load(model_path) {
        Ok(()) => tracing::info!(
            "model '{}' loaded from {} ({} features)",
            name,
            model_path,
            schema.len()
        ),
        Err(e) => tracing::warn!("model '{}' unavailable: {}", name, e),
    }

    Ok(PredictionService::new(name, schema, Box::new(engine)))
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub flight: Arc<PredictionService>,
    pub gender: Arc<PredictionService>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/models", get(handlers::status::models))
        .route("/predict/flight", post(handlers::predict::flight))
        .route("/predict/gender", post(handlers::predict::gender))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
