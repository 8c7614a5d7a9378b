//! Dictation capability trait.
//!
//! The speech-to-text collaborator is modeled as a stream of incremental
//! events over a bounded channel: one consuming task appends transcripts
//! to the session input, and closing the channel is the cancellation
//! path. The capability is advisory; everything else must function with
//! it absent.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted by a dictation capability while listening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DictationEvent {
    /// An incremental recognition result.
    Transcript { text: String },
    /// A capability-level error; listening ends after this.
    Error { message: String },
    /// The capability terminated on its own (e.g. silence timeout).
    Ended,
}

/// The external speech-to-text capability consumed by the voice input
/// adapter.
#[async_trait::async_trait]
pub trait DictationService: Send + Sync {
    /// Whether the host environment exposes continuous dictation.
    ///
    /// When this returns `false`, [`start`](Self::start) is never called;
    /// callers disable the affordance instead.
    fn is_supported(&self) -> bool;

    /// Starts listening and returns the event stream.
    ///
    /// The stream yields [`DictationEvent`]s in arrival order and closes
    /// after an `Error` or `Ended` event, or after [`stop`](Self::stop).
    async fn start(&self) -> Result<mpsc::Receiver<DictationEvent>>;

    /// Stops listening. The event stream closes as a consequence.
    async fn stop(&self);
}

/// Dictation stand-in for hosts without the capability.
///
/// `is_supported` is `false`, so well-behaved callers never start it;
/// a caller that does anyway gets a capability error rather than a hang.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedDictation;

#[async_trait::async_trait]
impl DictationService for UnsupportedDictation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn start(&self) -> Result<mpsc::Receiver<DictationEvent>> {
        Err(crate::error::ForgeError::CapabilityUnsupported("dictation"))
    }

    async fn stop(&self) {}
}
