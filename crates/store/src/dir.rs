//! Directory-backed store: one `{id}.json` file per saved workflow.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use editor::GraphSnapshot;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{SavedWorkflow, StoreError, WorkflowStore};

#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        info!(root = %root.display(), "workflow directory ready");
        Ok(Self { root })
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Read the record at `path`, which must carry the id its file is named after.
    async fn read(path: &Path, id: Uuid) -> Result<SavedWorkflow, StoreError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })?;
        let mut record: SavedWorkflow = serde_json::from_str(&text)?;
        if record.id != id {
            return Err(StoreError::IdMismatch {
                expected: id,
                found: record.id,
            });
        }
        record.snapshot = record.snapshot.validated()?;
        Ok(record)
    }
}

#[async_trait]
impl WorkflowStore for JsonDirStore {
    #[instrument(skip(self, snapshot), fields(nodes = snapshot.nodes.len()))]
    async fn save(&self, name: &str, snapshot: GraphSnapshot) -> Result<SavedWorkflow, StoreError> {
        let record = SavedWorkflow::new(name, snapshot);
        let json = serde_json::to_vec_pretty(&record)?;
        let path = self.path_for(record.id);
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &path).await?;
        info!(id = %record.id, "workflow written");
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<SavedWorkflow, StoreError> {
        Self::read(&self.path_for(id), id).await
    }

    async fn list(&self) -> Result<Vec<SavedWorkflow>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut all = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| Uuid::parse_str(s).ok())
            else {
                warn!(path = %path.display(), "skipping file not named after a workflow id");
                continue;
            };
            match Self::read(&path, id).await {
                Ok(record) => all.push(record),
                Err(e) => warn!(path = %path.display(), "skipping unreadable workflow: {e}"),
            }
        }

        all.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        tokio::fs::remove_file(self.path_for(id))
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound,
                _ => StoreError::Io(e),
            })?;
        info!("workflow deleted");
        Ok(())
    }
}
