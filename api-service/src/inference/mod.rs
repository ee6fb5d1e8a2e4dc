//! Model serving - inference engines and per-model services

pub mod engine;
pub mod service;

pub use engine::{EngineInfo, InferenceEngine, InferenceError, OnnxEngine};
pub use service::{ModelStatus, PredictError, PredictionService};
