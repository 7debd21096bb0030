//! `store` crate: persistence for saved workflows.
//!
//! The editor never does I/O; its `save` hands a snapshot to whatever
//! [`WorkflowStore`] the host wired in. Two implementations live here:
//! an in-memory map and a directory of JSON files.

pub mod dir;
pub mod error;
pub mod memory;
pub mod models;

use async_trait::async_trait;
use editor::GraphSnapshot;
use uuid::Uuid;

pub use dir::JsonDirStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::SavedWorkflow;

/// The persistence collaborator contract.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Persist `snapshot` under `name`, returning the stored record.
    async fn save(&self, name: &str, snapshot: GraphSnapshot) -> Result<SavedWorkflow, StoreError>;

    /// Fetch a single workflow by id.
    async fn get(&self, id: Uuid) -> Result<SavedWorkflow, StoreError>;

    /// All workflows, newest first.
    async fn list(&self) -> Result<Vec<SavedWorkflow>, StoreError>;

    /// Permanently delete a workflow.
    ///
    /// Returns `StoreError::NotFound` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
