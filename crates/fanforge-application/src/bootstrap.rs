//! Composition root.
//!
//! Assembles the workbench, the Gemini-backed generation use case, the
//! project service, and the voice adapter from loaded configuration.

use crate::operations::GenerationUseCase;
use crate::project_service::ProjectService;
use crate::voice::VoiceInputAdapter;
use crate::workbench::Workbench;
use fanforge_core::confirm::ConfirmationPrompt;
use fanforge_core::dictation::DictationService;
use fanforge_core::error::Result;
use fanforge_infrastructure::{FileKeyValueStore, ForgeConfig, JsonProjectRepository};
use fanforge_interaction::GeminiClient;
use std::sync::Arc;
use std::time::Duration;

/// A fully wired application core.
pub struct ForgeApp {
    pub workbench: Arc<Workbench>,
    pub generation: GenerationUseCase,
    pub projects: ProjectService,
    pub voice: VoiceInputAdapter,
}

/// Builds a [`ForgeApp`] from on-disk configuration and the default
/// storage location.
///
/// The confirmation prompt and dictation capability are host concerns
/// and stay injected. A corrupt project blob does not fail assembly: the
/// project list degrades to empty and the warning lands in the workbench
/// error channel for the UI to surface.
pub async fn bootstrap(
    prompt: Arc<dyn ConfirmationPrompt>,
    dictation: Arc<dyn DictationService>,
) -> Result<ForgeApp> {
    let config = ForgeConfig::load()?;
    let client = GeminiClient::from_config(&config)?;

    let workbench = Arc::new(Workbench::new());

    let store = Arc::new(FileKeyValueStore::default_location()?);
    let (repository, load_error) = JsonProjectRepository::load_or_empty(store).await;
    if let Some(err) = load_error {
        workbench.set_error(err.to_string());
    }

    let timeout = config.generation.timeout_secs.map(Duration::from_secs);
    let generation =
        GenerationUseCase::new(workbench.clone(), Arc::new(client)).with_timeout(timeout);
    let projects = ProjectService::new(workbench.clone(), Arc::new(repository), prompt);
    let voice = VoiceInputAdapter::new(workbench.clone(), dictation);

    Ok(ForgeApp {
        workbench,
        generation,
        projects,
        voice,
    })
}
