//! Domain layer for Fanforge.
//!
//! Pure models (session, results, projects), the shared error type, the
//! operation tracker, and the traits that decouple the application from
//! its collaborators: the generation capability, the dictation
//! capability, durable key-value storage, project persistence, and the
//! confirmation decision point.

pub mod confirm;
pub mod dictation;
pub mod error;
pub mod generation;
pub mod project;
pub mod session;
pub mod storage;
pub mod tracker;

// Re-export common error type
pub use error::{ForgeError, Result};
