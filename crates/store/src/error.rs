//! Typed error type for the store crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workflow not found")]
    NotFound,

    /// The file named after one workflow holds another.
    #[error("workflow file for {expected} holds record {found}")]
    IdMismatch { expected: uuid::Uuid, found: uuid::Uuid },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A stored file decoded but its graph failed validation.
    #[error("stored graph rejected: {0}")]
    Decode(#[from] editor::DecodeError),
}
