//! Generation use cases.
//!
//! Thin application operations over the generation service: each one
//! reads the current input, issues a single orchestrated call, and
//! writes the result into its session slot. Operations that need input
//! are no-ops while that input is empty; the UI disables the
//! affordance, and attempting one anyway is not an error.

use crate::orchestrator::CallOrchestrator;
use crate::workbench::Workbench;
use fanforge_core::generation::GenerationService;
use fanforge_core::session::{DeviationLevel, NarrativeLength};
use fanforge_interaction::prompts;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Operation keys used for pending-state tracking.
pub mod keys {
    use fanforge_core::session::DeviationLevel;

    pub const ANALYZE: &str = "analyze";
    pub const TROPES: &str = "tropes";
    pub const TWISTS: &str = "twists";
    pub const DIVERGENCE: &str = "divergence";
    pub const RISK: &str = "risk";

    /// One key per deviation level, so distinct deviation requests can
    /// be distinguished.
    pub fn deviation(level: DeviationLevel) -> String {
        format!("deviation-{}", level.as_str())
    }
}

/// Application-level generation operations.
pub struct GenerationUseCase {
    workbench: Arc<Workbench>,
    service: Arc<dyn GenerationService>,
    orchestrator: CallOrchestrator,
}

impl GenerationUseCase {
    /// Creates the use case with no per-call deadline.
    pub fn new(workbench: Arc<Workbench>, service: Arc<dyn GenerationService>) -> Self {
        let orchestrator = CallOrchestrator::new(workbench.clone());
        Self {
            workbench,
            service,
            orchestrator,
        }
    }

    /// Applies an optional per-call deadline to all operations.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.orchestrator = self.orchestrator.with_timeout(timeout);
        self
    }

    /// Returns the input text, or `None` when the operation should be a
    /// no-op because there is nothing to send.
    fn input_or_skip(&self, key: &str) -> Option<String> {
        let input = self.workbench.input();
        if input.is_empty() {
            debug!(key, "skipping operation: input is empty");
            return None;
        }
        Some(input)
    }

    /// Analyzes the source IP into the analysis slot.
    pub async fn analyze(&self) {
        let Some(input) = self.input_or_skip(keys::ANALYZE) else {
            return;
        };
        let service = self.service.clone();
        self.orchestrator
            .execute(
                keys::ANALYZE,
                async move { service.analyze(&input).await },
                |session, analysis| {
                    session.analysis = Some(analysis);
                    Ok(())
                },
            )
            .await;
    }

    /// Explores fanon tropes into the tropes slot.
    pub async fn explore_tropes(&self) {
        let Some(input) = self.input_or_skip(keys::TROPES) else {
            return;
        };
        let service = self.service.clone();
        self.orchestrator
            .execute(
                keys::TROPES,
                async move { service.list_tropes(&input).await },
                |session, tropes| {
                    session.tropes = Some(tropes);
                    Ok(())
                },
            )
            .await;
    }

    /// Generates transformative twists into the twists slot.
    pub async fn generate_twists(&self) {
        let Some(input) = self.input_or_skip(keys::TWISTS) else {
            return;
        };
        let service = self.service.clone();
        self.orchestrator
            .execute(
                keys::TWISTS,
                async move { service.generate_twists(&input).await },
                |session, twists| {
                    session.twists = Some(twists);
                    Ok(())
                },
            )
            .await;
    }

    /// Generates a narrative divergence into the generated-text slot.
    pub async fn generate_divergence(&self, length: NarrativeLength, tone: Option<&str>) {
        let Some(input) = self.input_or_skip(keys::DIVERGENCE) else {
            return;
        };
        let instruction = prompts::divergence_instruction(length, tone);
        let service = self.service.clone();
        self.orchestrator
            .execute(
                keys::DIVERGENCE,
                async move { service.generate_narrative(&input, &instruction).await },
                |session, text| {
                    session.generated_text = text;
                    Ok(())
                },
            )
            .await;
    }

    /// Forges a narrative at a controlled deviation level into the
    /// generated-text slot.
    pub async fn generate_with_deviation(&self, level: DeviationLevel) {
        let key = keys::deviation(level);
        let Some(input) = self.input_or_skip(&key) else {
            return;
        };
        let instruction = prompts::deviation_instruction(level);
        let service = self.service.clone();
        self.orchestrator
            .execute(
                &key,
                async move { service.generate_narrative(&input, &instruction).await },
                |session, text| {
                    session.generated_text = text;
                    Ok(())
                },
            )
            .await;
    }

    /// Assesses the risk of the generated text against the source IP.
    ///
    /// No-op while there is no generated text to assess.
    pub async fn assess_risk(&self) {
        let session = self.workbench.session();
        if session.generated_text.is_empty() {
            debug!("skipping risk assessment: no generated text");
            return;
        }
        let service = self.service.clone();
        self.orchestrator
            .execute(
                keys::RISK,
                async move {
                    service
                        .assess_risk(&session.ip_input, &session.generated_text)
                        .await
                },
                |session, risk| {
                    session.risk = Some(risk);
                    Ok(())
                },
            )
            .await;
    }
}
