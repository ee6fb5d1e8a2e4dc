//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Flight price model artifact (ONNX)
    pub flight_model_path: String,

    /// Expected-feature list for the flight price model
    pub flight_features_path: String,

    /// Gender classifier artifact (ONNX)
    pub gender_model_path: String,

    /// Expected-feature list for the gender classifier
    pub gender_features_path: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            flight_model_path: env::var("FLIGHT_MODEL_PATH")
                .unwrap_or_else(|_| "artifacts/flight_price.onnx".to_string()),

            flight_features_path: env::var("FLIGHT_FEATURES_PATH")
                .unwrap_or_else(|_| "artifacts/flight_features.json".to_string()),

            gender_model_path: env::var("GENDER_MODEL_PATH")
                .unwrap_or_else(|_| "artifacts/gender_clf.onnx".to_string()),

            gender_features_path: env::var("GENDER_FEATURES_PATH")
                .unwrap_or_else(|_| "artifacts/gender_features.json".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }
}
