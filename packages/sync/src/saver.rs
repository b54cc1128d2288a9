//! # Background Saver
//!
//! Owns the sink calls so commits never wait on the network.
//!
//! ## Design
//!
//! - One pending slot, latest wins: every enqueue overwrites the slot,
//!   so rapid successive drops coalesce and the newest whole-tree
//!   payload is what lands. Payloads are full snapshots; skipping an
//!   intermediate one loses nothing.
//! - Bounded retry with doubling backoff. A newer request abandons the
//!   remaining retries of a superseded one.
//! - Failures are terminal per request: the status turns `Failed` and
//!   the locally committed order stays in place. The dashboard surfaces
//!   the state; it does not roll the user's reorder back.
//! - Status is a `watch` channel, which is exactly what an
//!   "all changes saved" indicator wants to subscribe to.

use crate::sink::{SaveRequest, SinkError, SortSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How stubborn a save is before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, first try included.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 4,
            backoff: Duration::from_millis(250),
        }
    }
}

/// What the indicator shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving { revision: u64 },
    Saved { revision: u64 },
    Failed { revision: u64, message: String },
}

enum Outcome {
    Saved,
    Superseded,
    Failed(String),
}

/// Handle to the background persistence task.
pub struct Saver {
    pending_tx: watch::Sender<Option<SaveRequest>>,
    status_rx: watch::Receiver<SaveStatus>,
    handle: JoinHandle<()>,
}

impl Saver {
    /// Start the worker task on the current runtime.
    pub fn spawn(sink: Arc<dyn SortSink>, policy: RetryPolicy) -> Saver {
        let (pending_tx, pending_rx) = watch::channel(None);
        let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);
        let handle = tokio::spawn(worker(sink, policy, pending_rx, status_tx));
        Saver {
            pending_tx,
            status_rx,
            handle,
        }
    }

    /// Hand a request to the worker, replacing any not-yet-started one.
    pub fn enqueue(&self, request: SaveRequest) {
        tracing::debug!(revision = request.revision, "save enqueued");
        self.pending_tx.send_replace(Some(request));
    }

    /// Subscribe to save state changes.
    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.status_rx.clone()
    }

    pub fn current_status(&self) -> SaveStatus {
        self.status_rx.borrow().clone()
    }

    /// Stop the worker after it has drained the pending request, if any.
    pub async fn shutdown(self) {
        drop(self.pending_tx);
        if let Err(err) = self.handle.await {
            tracing::error!(error = %err, "saver task failed to shut down");
        }
    }
}

async fn worker(
    sink: Arc<dyn SortSink>,
    policy: RetryPolicy,
    mut pending: watch::Receiver<Option<SaveRequest>>,
    status: watch::Sender<SaveStatus>,
) {
    // changed() still yields a queued-but-unseen value after the sender
    // drops, so shutdown drains the slot before the task ends.
    while pending.changed().await.is_ok() {
        let Some(request) = pending.borrow_and_update().clone() else {
            continue;
        };
        let revision = request.revision;
        status.send_replace(SaveStatus::Saving { revision });

        match persist_with_retry(sink.as_ref(), &request, &policy, &pending).await {
            Outcome::Saved => {
                tracing::info!(revision, "order saved");
                status.send_replace(SaveStatus::Saved { revision });
            }
            Outcome::Superseded => {
                tracing::debug!(revision, "save superseded by a newer order");
            }
            Outcome::Failed(message) => {
                tracing::error!(revision, %message, "order could not be saved");
                status.send_replace(SaveStatus::Failed { revision, message });
            }
        }
    }
}

/// Run one request through the retry loop, abandoning it between
/// attempts once a newer request is waiting.
async fn persist_with_retry(
    sink: &dyn SortSink,
    request: &SaveRequest,
    policy: &RetryPolicy,
    pending: &watch::Receiver<Option<SaveRequest>>,
) -> Outcome {
    let mut backoff = policy.backoff;
    for attempt in 1..=policy.max_attempts {
        match sink.persist(request).await {
            Ok(()) => return Outcome::Saved,
            Err(err) => {
                if attempt == policy.max_attempts {
                    return Outcome::Failed(err.to_string());
                }
                tracing::warn!(
                    revision = request.revision,
                    attempt,
                    error = %err,
                    "save attempt failed; backing off"
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                if let Ok(true) = pending.has_changed() {
                    return Outcome::Superseded;
                }
            }
        }
    }
    Outcome::Failed("zero attempts configured".to_string())
}

/// The same retry loop for one-shot callers without a background task.
pub async fn save_once(
    sink: &dyn SortSink,
    request: &SaveRequest,
    policy: &RetryPolicy,
) -> Result<(), SinkError> {
    let mut backoff = policy.backoff;
    for attempt in 1..=policy.max_attempts {
        match sink.persist(request).await {
            Ok(()) => return Ok(()),
            Err(err) => {
                if attempt == policy.max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    revision = request.revision,
                    attempt,
                    error = %err,
                    "save attempt failed; backing off"
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
        }
    }
    Err(SinkError::Rejected("zero attempts configured".to_string()))
}
