//! In-memory usage log repository implementation

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::usage::{UsageLogEntry, UsageLogRepository};
use crate::domain::DomainError;

/// Thread-safe in-memory implementation of [`UsageLogRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUsageLogRepository {
    entries: Mutex<Vec<UsageLogEntry>>,
}

impl InMemoryUsageLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended entries, oldest first.
    pub fn entries(&self) -> Vec<UsageLogEntry> {
        self.entries.lock().expect("usage log lock poisoned").clone()
    }
}

#[async_trait]
impl UsageLogRepository for InMemoryUsageLogRepository {
    async fn append(&self, entry: UsageLogEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().map_err(|e| {
            DomainError::storage(format!("Failed to acquire usage log lock: {}", e))
        })?;

        entries.push(entry);
        Ok(())
    }
}
