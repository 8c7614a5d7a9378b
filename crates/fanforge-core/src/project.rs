//! Project domain model and repository trait.
//!
//! A project is a named, timestamped durable snapshot of a [`Session`].

use crate::error::Result;
use crate::session::Session;
use serde::{Deserialize, Serialize};

/// A named, timestamped snapshot of a working session.
///
/// The snapshot fields are flattened alongside `name` and `lastSaved` so
/// the persisted shape matches the remote-facing session contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The project name; unique within the persisted set
    pub name: String,
    /// ISO 8601 timestamp of the last save
    pub last_saved: String,
    /// The saved session snapshot
    #[serde(flatten)]
    pub session: Session,
}

impl Project {
    /// Creates a project snapshot of `session` with the given name and
    /// save timestamp.
    pub fn new(name: impl Into<String>, last_saved: impl Into<String>, session: Session) -> Self {
        Self {
            name: name.into(),
            last_saved: last_saved.into(),
            session,
        }
    }
}

/// An abstract repository for managing project persistence.
///
/// This trait defines the contract for persisting and retrieving
/// projects, decoupling the application's core logic from the specific
/// storage mechanism.
///
/// Project names are the unique key; the persisted set is ordered by
/// insertion, and that order is stable across process restarts.
#[async_trait::async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Finds a project by name.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Project))`: project found
    /// - `Ok(None)`: no project with that name
    /// - `Err(ForgeError)`: storage failure
    async fn find(&self, name: &str) -> Result<Option<Project>>;

    /// Saves a project.
    ///
    /// If a project with the same name already exists, it is replaced in
    /// place (keeping its position in storage order); otherwise the
    /// project is appended. Deciding *whether* an existing project may be
    /// overwritten is the caller's concern, not the repository's.
    async fn save(&self, project: &Project) -> Result<()>;

    /// Deletes a project by name.
    ///
    /// Deleting a nonexistent project is a no-op (idempotent).
    async fn delete(&self, name: &str) -> Result<()>;

    /// Returns all projects in storage order.
    async fn list(&self) -> Result<Vec<Project>>;
}
