//! Call orchestration for outbound generation requests.

use crate::workbench::Workbench;
use fanforge_core::error::{ForgeError, Result};
use fanforge_core::session::Session;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Wraps each generation call with tracker bookkeeping and the
/// single-slot error channel.
///
/// Invoking the same key again while it is already pending is not
/// prevented here; the UI boundary disables the triggering affordance
/// while its key is pending.
pub struct CallOrchestrator {
    workbench: Arc<Workbench>,
    timeout: Option<Duration>,
}

impl CallOrchestrator {
    /// Creates an orchestrator with no call deadline (historical
    /// behavior).
    pub fn new(workbench: Arc<Workbench>) -> Self {
        Self {
            workbench,
            timeout: None,
        }
    }

    /// Sets an optional per-call deadline; `None` disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Executes one orchestrated call.
    ///
    /// Clears the error channel, marks `key` pending, awaits `producer`,
    /// and on success hands the value to `consumer` to write into the
    /// session. A failure in the producer, the deadline, or the consumer
    /// is converted into a human-readable message in the error channel
    /// and leaves the session untouched. The key returns to idle on
    /// every exit path; a drop guard makes that finalization
    /// unskippable.
    pub async fn execute<T, Fut, C>(&self, key: &str, producer: Fut, consumer: C)
    where
        Fut: Future<Output = Result<T>>,
        C: FnOnce(&mut Session, T) -> Result<()>,
    {
        self.workbench.clear_error();
        self.workbench.begin_operation(key);
        let _guard = IdleGuard {
            workbench: self.workbench.clone(),
            key: key.to_string(),
        };

        debug!(key, "operation started");
        let outcome = match self.timeout {
            Some(deadline) => match tokio::time::timeout(deadline, producer).await {
                Ok(result) => result,
                Err(_) => Err(ForgeError::Timeout {
                    seconds: deadline.as_secs(),
                }),
            },
            None => producer.await,
        };

        match outcome {
            Ok(value) => {
                let mut consumed = Ok(());
                self.workbench.update_session(|session| {
                    consumed = consumer(session, value);
                });
                if let Err(err) = consumed {
                    warn!(key, error = %err, "result consumer failed");
                    self.workbench.set_error(err.to_string());
                } else {
                    debug!(key, "operation succeeded");
                }
            }
            Err(err) => {
                warn!(key, error = %err, "operation failed");
                self.workbench.set_error(err.to_string());
            }
        }
    }
}

/// Returns the operation key to idle when dropped, so no exit path (early
/// return, error, panic in the consumer) can leave it pending.
struct IdleGuard {
    workbench: Arc<Workbench>,
    key: String,
}

impl Drop for IdleGuard {
    fn drop(&mut self) {
        self.workbench.end_operation(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanforge_core::session::Analysis;

    fn analysis(text: &str) -> Analysis {
        Analysis {
            characteristics: text.into(),
            tropes: text.into(),
            motifs: text.into(),
            copyrightable_elements: text.into(),
        }
    }

    #[tokio::test]
    async fn success_writes_result_and_settles_idle() {
        let workbench = Arc::new(Workbench::new());
        let orchestrator = CallOrchestrator::new(workbench.clone());

        orchestrator
            .execute(
                "analyze",
                async { Ok(analysis("brooding hero")) },
                |session, value| {
                    session.analysis = Some(value);
                    Ok(())
                },
            )
            .await;

        assert!(!workbench.is_pending("analyze"));
        assert!(workbench.error().is_none());
        assert_eq!(
            workbench.session().analysis.unwrap().characteristics,
            "brooding hero"
        );
    }

    #[tokio::test]
    async fn key_is_pending_while_the_producer_runs() {
        let workbench = Arc::new(Workbench::new());
        let orchestrator = CallOrchestrator::new(workbench.clone());

        let observer = workbench.clone();
        orchestrator
            .execute(
                "twists",
                async move {
                    assert!(observer.is_pending("twists"));
                    Ok(())
                },
                |_, ()| Ok(()),
            )
            .await;

        assert!(!workbench.is_pending("twists"));
    }

    #[tokio::test]
    async fn failure_surfaces_error_and_leaves_session_untouched() {
        let workbench = Arc::new(Workbench::new());
        workbench.update_session(|s| s.analysis = Some(analysis("previous")));
        let orchestrator = CallOrchestrator::new(workbench.clone());

        orchestrator
            .execute(
                "analyze",
                async {
                    Err::<Analysis, _>(ForgeError::Api {
                        status: Some(500),
                        message: "backend exploded".into(),
                    })
                },
                |session, value| {
                    session.analysis = Some(value);
                    Ok(())
                },
            )
            .await;

        assert!(!workbench.is_pending("analyze"));
        assert_eq!(
            workbench.error().as_deref(),
            Some("API error (500): backend exploded")
        );
        // The previous result slot is untouched by the failed call.
        assert_eq!(
            workbench.session().analysis.unwrap().characteristics,
            "previous"
        );
    }

    #[tokio::test]
    async fn a_new_call_clears_the_previous_error() {
        let workbench = Arc::new(Workbench::new());
        let orchestrator = CallOrchestrator::new(workbench.clone());

        orchestrator
            .execute(
                "analyze",
                async { Err::<(), _>(ForgeError::response_format("garbage")) },
                |_, ()| Ok(()),
            )
            .await;
        assert!(workbench.error().is_some());

        orchestrator
            .execute("tropes", async { Ok(()) }, |_, ()| Ok(()))
            .await;
        assert!(workbench.error().is_none());
    }

    #[tokio::test]
    async fn consumer_failure_still_settles_idle() {
        let workbench = Arc::new(Workbench::new());
        let orchestrator = CallOrchestrator::new(workbench.clone());

        orchestrator
            .execute(
                "risk",
                async { Ok(()) },
                |_, ()| Err(ForgeError::validation("consumer rejected the value")),
            )
            .await;

        assert!(!workbench.is_pending("risk"));
        assert_eq!(
            workbench.error().as_deref(),
            Some("Validation error: consumer rejected the value")
        );
    }

    #[tokio::test]
    async fn panicking_consumer_settles_idle_and_leaves_state_usable() {
        let workbench = Arc::new(Workbench::new());

        let task = tokio::spawn({
            let workbench = workbench.clone();
            async move {
                let orchestrator = CallOrchestrator::new(workbench);
                orchestrator
                    .execute("analyze", async { Ok(()) }, |_, ()| -> Result<()> {
                        panic!("consumer blew up")
                    })
                    .await;
            }
        });
        assert!(task.await.is_err());

        // The drop guard released the key and the workbench still
        // serves reads and writes after the panic.
        assert!(!workbench.is_pending("analyze"));
        workbench.set_input("recovered");
        assert_eq!(workbench.session().ip_input, "recovered");
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_producer_times_out_when_configured() {
        let workbench = Arc::new(Workbench::new());
        let orchestrator =
            CallOrchestrator::new(workbench.clone()).with_timeout(Some(Duration::from_secs(30)));

        orchestrator
            .execute(
                "divergence",
                async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(String::from("never arrives"))
                },
                |session, text| {
                    session.generated_text = text;
                    Ok(())
                },
            )
            .await;

        assert!(!workbench.is_pending("divergence"));
        assert_eq!(
            workbench.error().as_deref(),
            Some("Operation timed out after 30s")
        );
        assert!(workbench.session().generated_text.is_empty());
    }

    #[tokio::test]
    async fn distinct_keys_may_be_pending_simultaneously() {
        let workbench = Arc::new(Workbench::new());

        workbench.begin_operation("deviation-Low");
        let orchestrator = CallOrchestrator::new(workbench.clone());
        orchestrator
            .execute("deviation-High", async { Ok(()) }, |_, ()| Ok(()))
            .await;

        assert!(workbench.is_pending("deviation-Low"));
        assert!(!workbench.is_pending("deviation-High"));
    }
}
