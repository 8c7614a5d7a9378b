//! Per-operation pending-state tracking.

use std::collections::HashMap;

/// Tracks which logical asynchronous operations are currently in flight.
///
/// Each call site picks an opaque string key for its operation (e.g. one
/// key per deviation level, so distinct deviation requests can be told
/// apart). Keys are independent; there are no ordering guarantees
/// between them, and an absent key reads as not pending.
#[derive(Debug, Default)]
pub struct OperationTracker {
    pending: HashMap<String, bool>,
}

impl OperationTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as pending.
    pub fn begin(&mut self, key: &str) {
        self.pending.insert(key.to_string(), true);
    }

    /// Marks `key` as idle.
    ///
    /// Ending a key that was never begun is a no-op; the orchestrator's
    /// all-paths finalization may reach here for keys whose begin was
    /// never observed.
    pub fn end(&mut self, key: &str) {
        if let Some(flag) = self.pending.get_mut(key) {
            *flag = false;
        }
    }

    /// Returns whether `key` is currently pending.
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.get(key).copied().unwrap_or(false)
    }
}
