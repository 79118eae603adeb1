//! PostgreSQL usage log repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::usage::{UsageLogEntry, UsageLogRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`UsageLogRepository`].
#[derive(Debug, Clone)]
pub struct PostgresUsageLogRepository {
    pool: PgPool,
}

impl PostgresUsageLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageLogRepository for PostgresUsageLogRepository {
    async fn append(&self, entry: UsageLogEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO api_usage_logs
                (id, identity_id, api_key, endpoint, method, status, latency_ms,
                 origin, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id)
        .bind(entry.identity_id)
        .bind(&entry.api_key)
        .bind(&entry.endpoint)
        .bind(&entry.method)
        .bind(i32::from(entry.status))
        .bind(i64::try_from(entry.latency_ms).unwrap_or(i64::MAX))
        .bind(&entry.origin)
        .bind(&entry.user_agent)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to append usage log entry: {}", e)))?;

        Ok(())
    }
}
