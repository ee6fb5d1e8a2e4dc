//! Feature alignment - flat request payloads to model input vectors

pub mod encode;
pub mod schema;

pub use encode::{encode, EncodeError};
pub use schema::{FeatureSchema, SchemaError};
