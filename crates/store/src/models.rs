//! Stored record type.
//!
//! This is a *persistence* model. It wraps the editor's snapshot with the
//! bookkeeping a store needs and carries no editing behaviour.

use chrono::{DateTime, Utc};
use editor::GraphSnapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkflow {
    pub id: Uuid,
    pub name: String,
    /// Nodes and connections exactly as the editor's `save` returned them.
    pub snapshot: GraphSnapshot,
    pub saved_at: DateTime<Utc>,
}

impl SavedWorkflow {
    pub fn new(name: impl Into<String>, snapshot: GraphSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            snapshot,
            saved_at: Utc::now(),
        }
    }
}
