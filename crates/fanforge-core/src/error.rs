//! Error types for the Fanforge workspace.

use thiserror::Error;

/// A shared error type for the entire Fanforge workspace.
///
/// Call sites construct variants through the helper constructors so the
/// message carries the operation context, not just the source error.
#[derive(Error, Debug, Clone)]
pub enum ForgeError {
    /// Bad caller input (e.g. an empty project name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("{entity_type} not found: '{name}'")]
    NotFound {
        entity_type: &'static str,
        name: String,
    },

    /// Durable medium unreadable, unparsable, or write-rejected
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The generation capability returned data that cannot be interpreted
    /// as the expected shape
    #[error("Response format error: {0}")]
    ResponseFormat(String),

    /// Remote API failure (transport or non-success status)
    #[error("API error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Api { status: Option<u16>, message: String },

    /// A host capability (e.g. dictation) is not available
    #[error("Capability not supported: {0}")]
    CapabilityUnsupported(&'static str),

    /// A host capability reported an error mid-session
    #[error("Capability error: {0}")]
    CapabilityRuntime(String),

    /// An outstanding generation call exceeded the configured deadline
    #[error("Operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ForgeError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            name: name.into(),
        }
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates a ResponseFormat error
    pub fn response_format(message: impl Into<String>) -> Self {
        Self::ResponseFormat(message.into())
    }

    /// Creates an Io error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// A convenience result type using [`ForgeError`].
pub type Result<T> = std::result::Result<T, ForgeError>;
