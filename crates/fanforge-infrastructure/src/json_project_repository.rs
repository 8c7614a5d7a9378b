//! JSON-blob project repository.
//!
//! The entire project list is serialized as one JSON array under a
//! single fixed key of a [`KeyValueStore`] and rewritten atomically (as
//! one unit) on every mutation. There are no per-project keys.

use fanforge_core::error::{ForgeError, Result};
use fanforge_core::project::{Project, ProjectRepository};
use fanforge_core::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// The fixed key holding the serialized project list.
pub const PROJECTS_STORAGE_KEY: &str = "fanforge.projects";

/// Project repository persisting the full list as a single JSON blob.
///
/// The in-memory view is the source of truth for reads; mutations follow
/// write-through semantics: the candidate list is serialized and written
/// to the durable medium first, and the cache is replaced only once the
/// write has landed. A rejected write therefore leaves both views
/// unchanged.
///
/// The read-modify-write of the full blob is guarded by a mutex so
/// concurrent saves on a multi-threaded host cannot lose updates.
pub struct JsonProjectRepository {
    store: Arc<dyn KeyValueStore>,
    projects: Mutex<Vec<Project>>,
}

impl JsonProjectRepository {
    /// Loads the repository from the durable medium.
    ///
    /// An absent blob yields an empty list. A blob that cannot be parsed
    /// fails with [`ForgeError::Persistence`]; use
    /// [`load_or_empty`](Self::load_or_empty) where the caller should
    /// degrade instead of fail.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let projects = match store.get(PROJECTS_STORAGE_KEY).await? {
            Some(blob) => serde_json::from_str::<Vec<Project>>(&blob).map_err(|e| {
                ForgeError::persistence(format!("Failed to parse stored project list: {e}"))
            })?,
            None => Vec::new(),
        };
        debug!(count = projects.len(), "loaded project list");
        Ok(Self {
            store,
            projects: Mutex::new(projects),
        })
    }

    /// Loads the repository, degrading to an empty list when the stored
    /// blob is unreadable or corrupt.
    ///
    /// The error (if any) is returned alongside the repository so the
    /// caller can surface it without crashing.
    pub async fn load_or_empty(store: Arc<dyn KeyValueStore>) -> (Self, Option<ForgeError>) {
        match Self::load(store.clone()).await {
            Ok(repo) => (repo, None),
            Err(err) => {
                warn!(error = %err, "degrading to empty project list");
                (
                    Self {
                        store,
                        projects: Mutex::new(Vec::new()),
                    },
                    Some(err),
                )
            }
        }
    }

    /// Serializes `candidate` and writes it through to the durable
    /// medium. Called with the list lock held.
    async fn persist(&self, candidate: &[Project]) -> Result<()> {
        let blob = serde_json::to_string(candidate)
            .map_err(|e| ForgeError::persistence(format!("Failed to serialize projects: {e}")))?;
        self.store.set(PROJECTS_STORAGE_KEY, &blob).await
    }
}

#[async_trait::async_trait]
impl ProjectRepository for JsonProjectRepository {
    async fn find(&self, name: &str) -> Result<Option<Project>> {
        let projects = self.projects.lock().await;
        Ok(projects.iter().find(|p| p.name == name).cloned())
    }

    async fn save(&self, project: &Project) -> Result<()> {
        let mut projects = self.projects.lock().await;

        let mut candidate = projects.clone();
        match candidate.iter().position(|p| p.name == project.name) {
            // Replace in place, keeping the storage position.
            Some(index) => candidate[index] = project.clone(),
            None => candidate.push(project.clone()),
        }

        self.persist(&candidate).await?;
        *projects = candidate;
        debug!(name = %project.name, "saved project");
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let mut projects = self.projects.lock().await;

        let Some(index) = projects.iter().position(|p| p.name == name) else {
            // Idempotent: deleting a nonexistent project changes nothing.
            return Ok(());
        };

        let mut candidate = projects.clone();
        candidate.remove(index);

        self.persist(&candidate).await?;
        *projects = candidate;
        debug!(name, "deleted project");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Project>> {
        Ok(self.projects.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv_store::{MemoryKeyValueStore, RejectingKeyValueStore};
    use fanforge_core::session::Session;

    fn project(name: &str, input: &str) -> Project {
        Project::new(
            name,
            "2024-05-01T12:00:00Z",
            Session {
                ip_input: input.into(),
                ..Session::default()
            },
        )
    }

    async fn memory_repo() -> (JsonProjectRepository, MemoryKeyValueStore) {
        let store = MemoryKeyValueStore::new();
        let repo = JsonProjectRepository::load(Arc::new(store.clone()))
            .await
            .unwrap();
        (repo, store)
    }

    #[tokio::test]
    async fn save_then_find_round_trips() {
        let (repo, _) = memory_repo().await;
        let p = project("Dragons", "a dragon rider");
        repo.save(&p).await.unwrap();

        let found = repo.find("Dragons").await.unwrap().unwrap();
        assert_eq!(found, p);
    }

    #[tokio::test]
    async fn save_with_same_name_replaces_in_place() {
        let (repo, _) = memory_repo().await;
        repo.save(&project("A", "one")).await.unwrap();
        repo.save(&project("B", "two")).await.unwrap();
        repo.save(&project("A", "updated")).await.unwrap();

        let list = repo.list().await.unwrap();
        assert_eq!(list.len(), 2);
        // "A" kept its position at the front.
        assert_eq!(list[0].name, "A");
        assert_eq!(list[0].session.ip_input, "updated");
        assert_eq!(list[1].name, "B");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (repo, _) = memory_repo().await;
        repo.save(&project("A", "one")).await.unwrap();

        repo.delete("A").await.unwrap();
        let after_first = repo.list().await.unwrap();
        repo.delete("A").await.unwrap();
        let after_second = repo.list().await.unwrap();

        assert!(after_first.is_empty());
        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn list_order_survives_reload() {
        let (repo, store) = memory_repo().await;
        repo.save(&project("First", "1")).await.unwrap();
        repo.save(&project("Second", "2")).await.unwrap();
        repo.save(&project("Third", "3")).await.unwrap();

        // Fresh repository over the same medium, as after a restart.
        let reloaded = JsonProjectRepository::load(Arc::new(store)).await.unwrap();
        let names: Vec<_> = reloaded
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn rejected_write_leaves_list_unchanged() {
        let store = RejectingKeyValueStore::default();
        let repo = JsonProjectRepository::load(Arc::new(store)).await.unwrap();

        let err = repo.save(&project("A", "one")).await.unwrap_err();
        assert!(err.is_persistence());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_blob_fails_load_and_degrades_to_empty() {
        let store = MemoryKeyValueStore::new();
        store.seed(PROJECTS_STORAGE_KEY, "{not json").await;

        let err = JsonProjectRepository::load(Arc::new(store.clone()))
            .await
            .err()
            .unwrap();
        assert!(err.is_persistence());

        let (repo, reported) = JsonProjectRepository::load_or_empty(Arc::new(store)).await;
        assert!(reported.is_some());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn persisted_blob_uses_original_field_names() {
        let (repo, store) = memory_repo().await;
        repo.save(&project("Dragons", "a dragon rider")).await.unwrap();

        let blob = store.get(PROJECTS_STORAGE_KEY).await.unwrap().unwrap();
        assert!(blob.contains("\"lastSaved\""));
        assert!(blob.contains("\"ipInput\""));
        assert!(blob.contains("\"generatedText\""));
    }
}
