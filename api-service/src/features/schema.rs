//! Expected-feature schema
//!
//! The training pipeline exports, next to each model artifact, the ordered
//! list of one-hot-encoded columns the model was fitted on. Prediction input
//! must be re-indexed to exactly this column set and order, so the schema is
//! loaded once at startup and treated as read-only afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("cannot read feature list: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse feature list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature list is empty")]
    Empty,

    #[error("duplicate column '{0}' in feature list")]
    DuplicateColumn(String),
}

/// Ordered column list a model expects, with name-to-index lookup.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    pub fn from_columns(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self { columns, index })
    }

    /// Load a JSON array of column names exported at training time.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let raw = fs::read_to_string(path)?;
        let columns: Vec<String> = serde_json::from_str(&raw)?;
        Self::from_columns(columns)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}
