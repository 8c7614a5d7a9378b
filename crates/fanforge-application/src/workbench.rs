//! Shared application state container.

use fanforge_core::session::Session;
use fanforge_core::tracker::OperationTracker;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// The structured state container for the working session.
///
/// Owns the current [`Session`], the per-operation pending flags, and
/// the single-slot error channel. Everything the UI renders comes from
/// here, and all mutation goes through it; there are no ambient
/// globals. Shared across tasks via `Arc`.
///
/// Lock discipline: the locks are `std::sync` because drop guards must
/// release operation keys without an async context. Critical sections
/// are short and never held across an await point, mirroring the
/// single-event-loop model this core was extracted from. A panic inside
/// a session mutation must not wedge every later access, so poisoned
/// guards are recovered rather than propagated.
#[derive(Default)]
pub struct Workbench {
    session: RwLock<Session>,
    tracker: Mutex<OperationTracker>,
    error: Mutex<Option<String>>,
}

impl Workbench {
    /// Creates an empty workbench.
    pub fn new() -> Self {
        Self::default()
    }

    fn session_read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn session_write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn tracker_lock(&self) -> MutexGuard<'_, OperationTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn error_lock(&self) -> MutexGuard<'_, Option<String>> {
        self.error.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session_read().clone()
    }

    /// Replaces the current session wholesale (project load).
    pub fn replace_session(&self, session: Session) {
        *self.session_write() = session;
    }

    /// Applies a mutation to the current session.
    pub fn update_session(&self, f: impl FnOnce(&mut Session)) {
        let mut session = self.session_write();
        f(&mut session);
    }

    /// Returns the current source-IP input text.
    pub fn input(&self) -> String {
        self.session_read().ip_input.clone()
    }

    /// Sets the source-IP input text (keyboard path).
    pub fn set_input(&self, text: impl Into<String>) {
        self.session_write().ip_input = text.into();
    }

    /// Appends one dictation transcript to the input text, space-joined.
    ///
    /// Strictly additive: prior text is never replaced, and transcripts
    /// land in arrival order.
    pub fn append_transcript(&self, transcript: &str) {
        let mut session = self.session_write();
        session.ip_input.push(' ');
        session.ip_input.push_str(transcript);
    }

    /// Marks an operation as pending.
    pub fn begin_operation(&self, key: &str) {
        self.tracker_lock().begin(key);
    }

    /// Marks an operation as idle.
    pub fn end_operation(&self, key: &str) {
        self.tracker_lock().end(key);
    }

    /// Returns whether the named operation is in flight.
    pub fn is_pending(&self, key: &str) -> bool {
        self.tracker_lock().is_pending(key)
    }

    /// Returns the current user-visible error message, if any.
    pub fn error(&self) -> Option<String> {
        self.error_lock().clone()
    }

    /// Overwrites the single-slot error channel.
    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "surfacing error");
        *self.error_lock() = Some(message);
    }

    /// Clears the error channel.
    pub fn clear_error(&self) {
        *self.error_lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_transcript_is_space_joined_and_additive() {
        let workbench = Workbench::new();
        workbench.append_transcript("hello");
        workbench.append_transcript("world");
        assert_eq!(workbench.input(), " hello world");
    }

    #[test]
    fn replace_session_swaps_all_slots() {
        let workbench = Workbench::new();
        workbench.set_input("old");
        workbench.replace_session(Session {
            ip_input: "new".into(),
            generated_text: "text".into(),
            ..Session::default()
        });
        assert_eq!(workbench.input(), "new");
        assert_eq!(workbench.session().generated_text, "text");
    }

    #[test]
    fn a_panicking_mutation_does_not_wedge_the_workbench() {
        let workbench = Workbench::new();
        workbench.set_input("kept");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            workbench.update_session(|_| panic!("mutation blew up"));
        }));
        assert!(result.is_err());

        // Reads and writes keep working after the poisoned guard.
        assert_eq!(workbench.input(), "kept");
        workbench.set_input("still writable");
        assert_eq!(workbench.input(), "still writable");
    }

    #[test]
    fn error_slot_holds_a_single_message() {
        let workbench = Workbench::new();
        assert!(workbench.error().is_none());
        workbench.set_error("first");
        workbench.set_error("second");
        assert_eq!(workbench.error().as_deref(), Some("second"));
        workbench.clear_error();
        assert!(workbench.error().is_none());
    }
}
