//! Application layer for Fanforge.
//!
//! Coordinates the domain and infrastructure layers: the shared
//! workbench state, the call orchestrator, the generation and project
//! use cases, and the voice input adapter.

pub mod bootstrap;
pub mod operations;
pub mod orchestrator;
pub mod project_service;
pub mod voice;
pub mod workbench;

pub use bootstrap::{ForgeApp, bootstrap};
pub use operations::GenerationUseCase;
pub use orchestrator::CallOrchestrator;
pub use project_service::{ProjectService, SaveOutcome};
pub use voice::VoiceInputAdapter;
pub use workbench::Workbench;
