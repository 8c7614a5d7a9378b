//! Voice input adapter.
//!
//! Bridges the dictation capability's incremental results into the
//! session input text. The capability is advisory: when the host does
//! not support it, toggling is a no-op and the UI disables the
//! affordance via [`VoiceInputAdapter::is_supported`].

use crate::workbench::Workbench;
use fanforge_core::dictation::{DictationEvent, DictationService};
use fanforge_core::error::ForgeError;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Listening state of the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening,
}

/// Mediates between the dictation capability and the session input.
///
/// While listening, a consumer task appends each incremental transcript
/// to the input text (space-joined, strictly additive, in arrival
/// order). The capability may terminate on its own or report an error;
/// both drive the state back to idle, and an error additionally lands in
/// the workbench error channel.
pub struct VoiceInputAdapter {
    workbench: Arc<Workbench>,
    dictation: Arc<dyn DictationService>,
    state: Arc<Mutex<VoiceState>>,
}

impl VoiceInputAdapter {
    pub fn new(workbench: Arc<Workbench>, dictation: Arc<dyn DictationService>) -> Self {
        Self {
            workbench,
            dictation,
            state: Arc::new(Mutex::new(VoiceState::Idle)),
        }
    }

    /// Whether the host exposes a dictation capability at all.
    pub fn is_supported(&self) -> bool {
        self.dictation.is_supported()
    }

    /// Whether the adapter is currently listening.
    pub fn is_listening(&self) -> bool {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) == VoiceState::Listening
    }

    /// Starts listening when idle, stops when listening.
    ///
    /// No-op on hosts without the capability.
    pub async fn toggle(&self) {
        if !self.dictation.is_supported() {
            return;
        }

        if self.is_listening() {
            debug!("stopping dictation");
            self.dictation.stop().await;
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = VoiceState::Idle;
            return;
        }

        let mut events = match self.dictation.start().await {
            Ok(events) => events,
            Err(err) => {
                warn!(error = %err, "failed to start dictation");
                self.workbench.set_error(err.to_string());
                return;
            }
        };

        debug!("dictation started");
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = VoiceState::Listening;

        let workbench = self.workbench.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    DictationEvent::Transcript { text } => {
                        workbench.append_transcript(&text);
                    }
                    DictationEvent::Error { message } => {
                        let err = ForgeError::CapabilityRuntime(message);
                        workbench.set_error(err.to_string());
                        break;
                    }
                    DictationEvent::Ended => break,
                }
            }
            // Stream closed, errored, or ended on its own: back to idle.
            *state.lock().unwrap_or_else(PoisonError::into_inner) = VoiceState::Idle;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanforge_core::error::Result;
    use tokio::sync::{Mutex as AsyncMutex, mpsc};

    /// Scripted dictation capability: hands out a pre-loaded event
    /// channel on start.
    struct ScriptedDictation {
        supported: bool,
        receiver: AsyncMutex<Option<mpsc::Receiver<DictationEvent>>>,
    }

    impl ScriptedDictation {
        fn with_events(events: Vec<DictationEvent>) -> Self {
            let (tx, rx) = mpsc::channel(16);
            for event in events {
                tx.try_send(event).unwrap();
            }
            // Sender is dropped here, closing the stream after the
            // scripted events drain.
            Self {
                supported: true,
                receiver: AsyncMutex::new(Some(rx)),
            }
        }

    }

    #[async_trait::async_trait]
    impl DictationService for ScriptedDictation {
        fn is_supported(&self) -> bool {
            self.supported
        }

        async fn start(&self) -> Result<mpsc::Receiver<DictationEvent>> {
            Ok(self
                .receiver
                .lock()
                .await
                .take()
                .expect("start called twice"))
        }

        async fn stop(&self) {}
    }

    async fn settle(adapter: &VoiceInputAdapter) {
        // Wait for the consumer task to drain the scripted events.
        for _ in 0..100 {
            if !adapter.is_listening() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        panic!("adapter never returned to idle");
    }

    #[tokio::test]
    async fn transcripts_append_space_joined_in_arrival_order() {
        let workbench = Arc::new(Workbench::new());
        let adapter = VoiceInputAdapter::new(
            workbench.clone(),
            Arc::new(ScriptedDictation::with_events(vec![
                DictationEvent::Transcript {
                    text: "hello".into(),
                },
                DictationEvent::Transcript {
                    text: "world".into(),
                },
                DictationEvent::Ended,
            ])),
        );

        adapter.toggle().await;
        settle(&adapter).await;

        assert_eq!(workbench.input(), " hello world");
        assert!(workbench.error().is_none());
    }

    #[tokio::test]
    async fn capability_error_returns_to_idle_and_surfaces_message() {
        let workbench = Arc::new(Workbench::new());
        let adapter = VoiceInputAdapter::new(
            workbench.clone(),
            Arc::new(ScriptedDictation::with_events(vec![
                DictationEvent::Transcript { text: "par".into() },
                DictationEvent::Error {
                    message: "no-speech".into(),
                },
            ])),
        );

        adapter.toggle().await;
        settle(&adapter).await;

        assert_eq!(workbench.input(), " par");
        assert_eq!(
            workbench.error().as_deref(),
            Some("Capability error: no-speech")
        );
    }

    #[tokio::test]
    async fn external_end_returns_to_idle_without_error() {
        let workbench = Arc::new(Workbench::new());
        let adapter = VoiceInputAdapter::new(
            workbench.clone(),
            Arc::new(ScriptedDictation::with_events(vec![DictationEvent::Ended])),
        );

        adapter.toggle().await;
        settle(&adapter).await;

        assert!(!adapter.is_listening());
        assert!(workbench.error().is_none());
    }

    #[tokio::test]
    async fn toggle_is_a_noop_without_the_capability() {
        let workbench = Arc::new(Workbench::new());
        let adapter = VoiceInputAdapter::new(
            workbench.clone(),
            Arc::new(fanforge_core::dictation::UnsupportedDictation),
        );

        assert!(!adapter.is_supported());
        adapter.toggle().await;

        assert!(!adapter.is_listening());
        assert!(workbench.error().is_none());
        assert_eq!(workbench.input(), "");
    }

    #[tokio::test]
    async fn user_stop_flips_state_back_to_idle() {
        let workbench = Arc::new(Workbench::new());
        // Channel stays open: no scripted end, the user stops instead.
        let (_tx, rx) = mpsc::channel(16);
        let dictation = ScriptedDictation {
            supported: true,
            receiver: AsyncMutex::new(Some(rx)),
        };
        let adapter = VoiceInputAdapter::new(workbench, Arc::new(dictation));

        adapter.toggle().await;
        assert!(adapter.is_listening());
        adapter.toggle().await;
        assert!(!adapter.is_listening());
    }
}
