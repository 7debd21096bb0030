//! In-memory store, for tests and hosts that keep everything in-process.

use std::collections::HashMap;

use async_trait::async_trait;
use editor::GraphSnapshot;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{SavedWorkflow, StoreError, WorkflowStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    workflows: RwLock<HashMap<Uuid, SavedWorkflow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    #[instrument(skip(self, snapshot), fields(nodes = snapshot.nodes.len()))]
    async fn save(&self, name: &str, snapshot: GraphSnapshot) -> Result<SavedWorkflow, StoreError> {
        let record = SavedWorkflow::new(name, snapshot);
        self.workflows
            .write()
            .await
            .insert(record.id, record.clone());
        info!(id = %record.id, "workflow saved");
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<SavedWorkflow, StoreError> {
        self.workflows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<SavedWorkflow>, StoreError> {
        let mut all: Vec<SavedWorkflow> = self.workflows.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        match self.workflows.write().await.remove(&id) {
            Some(_) => {
                info!("workflow deleted");
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::workflows::lead_nurturing;

    #[tokio::test]
    async fn save_then_get_returns_same_snapshot() {
        let store = MemoryStore::new();
        let snapshot = lead_nurturing().graph;

        let saved = store.save("leads", snapshot.clone()).await.unwrap();
        let fetched = store.get(saved.id).await.unwrap();

        assert_eq!(fetched.name, "leads");
        assert_eq!(fetched.snapshot, snapshot);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.delete(Uuid::new_v4()).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        let first = store.save("first", GraphSnapshot::default()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.save("second", GraphSnapshot::default()).await.unwrap();

        let ids: Vec<Uuid> = store.list().await.unwrap().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        store.delete(first.id).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
