//! Generation capability trait.
//!
//! Defines the interface to the remote structured-text-generation
//! service. Each operation is a single request/response exchange; a
//! malformed response must surface as [`ForgeError::ResponseFormat`],
//! never be silently coerced.
//!
//! [`ForgeError::ResponseFormat`]: crate::error::ForgeError::ResponseFormat

use crate::error::Result;
use crate::session::{Analysis, Risk, Twists};

/// The external generation capability consumed by the call orchestrator.
#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    /// Analyzes a source-IP description, returning its latent
    /// characteristics, tropes, motifs, and memorization-prone elements.
    async fn analyze(&self, ip_input: &str) -> Result<Analysis>;

    /// Lists common fan-created ("fanon") tropes for the source IP.
    async fn list_tropes(&self, ip_input: &str) -> Result<Vec<String>>;

    /// Generates one transformative twist per category.
    async fn generate_twists(&self, ip_input: &str) -> Result<Twists>;

    /// Generates narrative text from the source material under the given
    /// instruction.
    async fn generate_narrative(&self, ip_input: &str, instruction: &str) -> Result<String>;

    /// Assesses the similarity risk of `generated` against `original`.
    async fn assess_risk(&self, original: &str, generated: &str) -> Result<Risk>;
}
