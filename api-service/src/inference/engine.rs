//! Inference engine - ONNX Runtime integration
//!
//! Models arrive as opaque ONNX artifacts exported by the training
//! pipeline; this module only loads and runs them.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::RwLock;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InferenceError(pub String);

/// Engine descriptor for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    pub kind: &'static str,
    pub artifact: Option<String>,
}

/// Seam for inference backends (ONNX today, stubs in tests).
pub trait InferenceEngine: Send + Sync {
    /// Run the model on a single feature row.
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError>;

    fn is_loaded(&self) -> bool;

    fn info(&self) -> EngineInfo;
}

/// ONNX Runtime backed engine.
///
/// `Session::run` needs exclusive access, so the session lives behind a
/// write lock. It stays `None` until an artifact has been loaded; predicting
/// through an unloaded engine is an error, not a panic.
pub struct OnnxEngine {
    session: RwLock<Option<Session>>,
    artifact: RwLock<Option<String>>,
}

impl OnnxEngine {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
            artifact: RwLock::new(None),
        }
    }

    /// Load an ONNX artifact from disk, replacing any loaded session.
    pub fn load(&self, path: &str) -> Result<(), InferenceError> {
        if !Path::new(path).exists() {
            return Err(InferenceError(format!("model not found: {}", path)));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| InferenceError(format!("failed to load model: {}", e)))?;

        *self.session.write() = Some(session);
        *self.artifact.write() = Some(path.to_string());

        Ok(())
    }
}

impl Default for OnnxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceEngine for OnnxEngine {
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>, InferenceError> {
        let mut session_guard = self.session.write();
        let session = session_guard
            .as_mut()
            .ok_or_else(|| InferenceError("model not loaded".to_string()))?;

        let input = Array2::<f32>::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| InferenceError(format!("array error: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("no output defined".to_string()))?;

        let input_tensor = Value::from_array(input)
            .map_err(|e| InferenceError(format!("tensor error: {}", e)))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| InferenceError("no output".to_string()))?;

        // Regressors emit f32; classifiers converted from integer labels
        // emit i64.
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            return Ok(data.to_vec());
        }

        let (_, data) = output
            .try_extract_tensor::<i64>()
            .map_err(|e| InferenceError(format!("extract error: {}", e)))?;

        Ok(data.iter().map(|&v| v as f32).collect())
    }

    fn is_loaded(&self) -> bool {
        self.session.read().is_some()
    }

    fn info(&self) -> EngineInfo {
        EngineInfo {
            kind: "onnx",
            artifact: self.artifact.read().clone(),
        }
    }
}
