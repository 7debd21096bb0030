//! Editor-level error types.
//!
//! Editing operations never fail. Errors only exist at the decode boundary,
//! where incoming data (a snapshot, an API response) is checked before use.

use thiserror::Error;

/// Reasons incoming data is rejected.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON or does not have the expected shape.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A node was given an empty identifier.
    #[error("node at index {index} has an empty id")]
    EmptyNodeId { index: usize },

    /// Two or more nodes share the same ID.
    #[error("duplicate node ID: '{0}'")]
    DuplicateNodeId(String),
}
