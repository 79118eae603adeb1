//! Usage log repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::UsageLogEntry;
use crate::domain::DomainError;

/// Append-only store for usage log entries.
///
/// No ordering or uniqueness constraints apply across entries; appends
/// require no coordination.
#[async_trait]
pub trait UsageLogRepository: Send + Sync + Debug {
    async fn append(&self, entry: UsageLogEntry) -> Result<(), DomainError>;
}
