//! Project lifecycle use cases.
//!
//! Saving, loading, deleting, and listing named session snapshots.
//! Destructive paths (overwrite, delete) go through the injected
//! confirmation prompt before touching the repository.

use crate::workbench::Workbench;
use chrono::Utc;
use fanforge_core::confirm::ConfirmationPrompt;
use fanforge_core::error::{ForgeError, Result};
use fanforge_core::project::{Project, ProjectRepository};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a save request.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The snapshot was persisted.
    Saved(Project),
    /// A project with that name exists and the user declined to
    /// overwrite it; the store is unchanged.
    Declined,
}

/// Application service for project persistence.
pub struct ProjectService {
    workbench: Arc<Workbench>,
    repository: Arc<dyn ProjectRepository>,
    prompt: Arc<dyn ConfirmationPrompt>,
}

impl ProjectService {
    pub fn new(
        workbench: Arc<Workbench>,
        repository: Arc<dyn ProjectRepository>,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        Self {
            workbench,
            repository,
            prompt,
        }
    }

    /// Saves the current session under `name`.
    ///
    /// An empty name is a validation error. When a project with the same
    /// name exists, the user is asked to confirm the overwrite; declining
    /// leaves the store unchanged. An accepted save replaces the existing
    /// entry in place with a fresh `lastSaved` timestamp, or appends a
    /// new entry. Persistence failures are additionally surfaced through
    /// the workbench error channel.
    pub async fn save_current(&self, name: &str) -> Result<SaveOutcome> {
        if name.is_empty() {
            return Err(ForgeError::validation("Project name must not be empty"));
        }

        if self.repository.find(name).await?.is_some() {
            let message = format!("A project named \"{name}\" already exists. Overwrite it?");
            if !self.prompt.confirm(&message).await {
                info!(name, "overwrite declined");
                return Ok(SaveOutcome::Declined);
            }
        }

        let project = Project::new(name, Utc::now().to_rfc3339(), self.workbench.session());
        if let Err(err) = self.repository.save(&project).await {
            warn!(name, error = %err, "failed to save project");
            self.workbench.set_error(err.to_string());
            return Err(err);
        }

        info!(name, "project saved");
        Ok(SaveOutcome::Saved(project))
    }

    /// Loads the named project into the current session.
    ///
    /// Loading does not mutate the store; the in-memory session is
    /// replaced wholesale with the stored snapshot.
    pub async fn load(&self, name: &str) -> Result<()> {
        let project = self
            .repository
            .find(name)
            .await?
            .ok_or_else(|| ForgeError::not_found("Project", name))?;

        self.workbench.replace_session(project.session);
        info!(name, "project loaded");
        Ok(())
    }

    /// Deletes the named project after confirmation.
    ///
    /// Declining leaves the store unchanged; deleting a project that does
    /// not exist is a no-op.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let message = format!("Are you sure you want to delete the project \"{name}\"?");
        if !self.prompt.confirm(&message).await {
            info!(name, "delete declined");
            return Ok(());
        }

        if let Err(err) = self.repository.delete(name).await {
            warn!(name, error = %err, "failed to delete project");
            self.workbench.set_error(err.to_string());
            return Err(err);
        }
        Ok(())
    }

    /// Returns all saved projects in storage order.
    pub async fn list(&self) -> Result<Vec<Project>> {
        self.repository.list().await
    }
}
