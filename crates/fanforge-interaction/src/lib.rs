//! Remote-capability layer for Fanforge.
//!
//! Hosts the Gemini REST implementation of the generation service and
//! the prompt templates it sends.

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;
