//! Per-model prediction service
//!
//! Ties one expected-feature schema to one inference engine and keeps
//! rolling latency counters for status reporting. Everything but the
//! counters is read-only after startup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;
use serde_json::{Map, Value};

use super::engine::{EngineInfo, InferenceEngine, InferenceError};
use crate::features::{encode, EncodeError, FeatureSchema};

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// One served model: schema, engine, metrics.
pub struct PredictionService {
    name: String,
    schema: FeatureSchema,
    engine: Box<dyn InferenceEngine>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

/// Model status for the `/models` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub name: String,
    pub loaded: bool,
    pub engine: &'static str,
    pub artifact: Option<String>,
    pub feature_count: usize,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

impl PredictionService {
    pub fn new(
        name: impl Into<String>,
        schema: FeatureSchema,
        engine: Box<dyn InferenceEngine>,
    ) -> Self {
        Self {
            name: name.into(),
            schema,
            engine,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Align the payload to the schema and run the engine on it.
    pub fn predict(&self, payload: &Map<String, Value>) -> Result<Vec<f32>, PredictError> {
        let features = encode(payload, &self.schema)?;

        let start = Instant::now();
        let output = self.engine.predict(&features)?;

        self.latency_sum_us
            .fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(output)
    }

    pub fn status(&self) -> ModelStatus {
        let EngineInfo { kind, artifact } = self.engine.info();

        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        };

        ModelStatus {
            name: self.name.clone(),
            loaded: self.engine.is_loaded(),
            engine: kind,
            artifact,
            feature_count: self.schema.len(),
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}
