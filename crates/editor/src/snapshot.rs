//! Snapshot decoding: run this before building a session from foreign data.
//!
//! Rules enforced:
//! 1. The payload must have the `{nodes, connections}` shape.
//! 2. Node IDs must be non-empty.
//! 3. Node IDs must be unique within the snapshot.
//!
//! Connections that reference missing nodes are *not* rejected. They are
//! kept as orphans and simply never rendered.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::{models::GraphSnapshot, DecodeError};

impl GraphSnapshot {
    /// Decode and validate a snapshot from a JSON string.
    ///
    /// # Errors
    /// - [`DecodeError::Malformed`] if the text is not a snapshot.
    /// - [`DecodeError::EmptyNodeId`] if a node has an empty id.
    /// - [`DecodeError::DuplicateNodeId`] if two nodes share an id.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let snapshot: GraphSnapshot = serde_json::from_str(text)?;
        snapshot.validated()
    }

    /// Decode and validate a snapshot from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let snapshot: GraphSnapshot = serde_json::from_value(value)?;
        snapshot.validated()
    }

    /// Check identifier rules, returning the snapshot unchanged on success.
    pub fn validated(self) -> Result<Self, DecodeError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id.as_str().is_empty() {
                return Err(DecodeError::EmptyNodeId { index });
            }
            if !seen.insert(node.id.as_str()) {
                return Err(DecodeError::DuplicateNodeId(node.id.to_string()));
            }
        }

        let orphans = self.orphaned_connections().len();
        if orphans > 0 {
            debug!(orphans, "snapshot carries connections to missing nodes");
        }

        Ok(self)
    }
}
