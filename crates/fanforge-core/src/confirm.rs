//! Confirmation decision point.
//!
//! Destructive project operations (overwrite, delete) must not proceed
//! silently; the store surfaces a yes/no decision to whatever outer layer
//! owns the user interface.

/// A yes/no decision point presented to the user before a destructive
/// operation proceeds.
#[async_trait::async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Asks the user to confirm; `true` means proceed.
    async fn confirm(&self, message: &str) -> bool;
}
