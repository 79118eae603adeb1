//! PostgreSQL identity repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::identity::{Admission, Identity, IdentityRepository, Role};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`IdentityRepository`].
///
/// Admission is a single conditional `UPDATE ... RETURNING`, so two
/// concurrent calls can never both be admitted against the last remaining
/// unit of quota; zero rows updated is the rejection signal, classified
/// afterwards by a read-only lookup.
#[derive(Debug, Clone)]
pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn admit(&self, api_key: &str) -> Result<Admission, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE identities
            SET usage_count = usage_count + 1
            WHERE api_key = $1 AND usage_count < usage_limit
            RETURNING id, api_key, role, usage_count, usage_limit, subscription_status
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to admit identity: {}", e)))?;

        if let Some(row) = row {
            let mut identity = row_to_identity(&row)?;
            // RETURNING carries the post-charge count; report the counter
            // as it stood when the call was admitted
            identity.usage_count -= 1;
            return Ok(Admission::Admitted(identity));
        }

        match self.get_by_key(api_key).await? {
            Some(identity) => Ok(Admission::LimitExceeded(identity)),
            None => Ok(Admission::UnknownKey),
        }
    }

    async fn get_by_key(&self, api_key: &str) -> Result<Option<Identity>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, api_key, role, usage_count, usage_limit, subscription_status
            FROM identities
            WHERE api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get identity: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_identity(&row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_identity(row: &sqlx::postgres::PgRow) -> Result<Identity, DomainError> {
    let id: Uuid = row.get("id");
    let api_key: String = row.get("api_key");
    let role: String = row.get("role");
    let usage_count: i32 = row.get("usage_count");
    let usage_limit: i32 = row.get("usage_limit");
    let subscription_status: String = row.get("subscription_status");

    Ok(Identity {
        id,
        api_key,
        role: Role::from_str_lossy(&role),
        usage_count: u32::try_from(usage_count)
            .map_err(|_| DomainError::storage("Negative usage_count in database"))?,
        usage_limit: u32::try_from(usage_limit)
            .map_err(|_| DomainError::storage("Negative usage_limit in database"))?,
        subscription_status,
    })
}
