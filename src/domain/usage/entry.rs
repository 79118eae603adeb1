//! Usage log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One audit row per accounted API call.
///
/// The key is denormalized and stored verbatim so historical rows survive
/// key rotation. Entries are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLogEntry {
    pub id: Uuid,
    /// Resolved identity, absent for calls rejected with an unknown key.
    pub identity_id: Option<Uuid>,
    /// The key that was presented, verbatim.
    pub api_key: String,
    /// Endpoint path, e.g. `/api/v1/quotes`.
    pub endpoint: String,
    /// HTTP method.
    pub method: String,
    /// Response status the call finished with.
    pub status: u16,
    /// Whole milliseconds from request capture to response finalization.
    pub latency_ms: u64,
    /// Caller network origin as reported by the proxy headers.
    pub origin: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UsageLogEntry {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        method: impl Into<String>,
        status: u16,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity_id: None,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            method: method.into(),
            status,
            latency_ms: 0,
            origin: None,
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_identity(mut self, identity_id: Uuid) -> Self {
        self.identity_id = Some(identity_id);
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_origin(mut self, origin: Option<String>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }
}
