//! Background usage recorder
//!
//! Recording is observability, not part of the transactional outcome: a
//! dropped or failed entry must never change or delay the response that was
//! already computed. Entries are handed to a background task over an
//! unbounded channel and appended off the hot path.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::usage::{UsageLogEntry, UsageLogRepository};

/// Cloneable, non-blocking handle for dispatching usage log entries.
#[derive(Debug, Clone)]
pub struct UsageRecorder {
    tx: mpsc::UnboundedSender<UsageLogEntry>,
}

impl UsageRecorder {
    /// Spawn the drain task and return a handle to it.
    pub fn spawn(repository: Arc<dyn UsageLogRepository>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<UsageLogEntry>();

        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                if let Err(e) = repository.append(entry).await {
                    warn!(error = %e, "Failed to append usage log entry");
                }
            }
        });

        Self { tx }
    }

    /// Dispatch one entry; never blocks and never surfaces a failure.
    pub fn record(&self, entry: UsageLogEntry) {
        if self.tx.send(entry).is_err() {
            warn!("Usage recorder task is gone; entry dropped");
        }
    }
}
