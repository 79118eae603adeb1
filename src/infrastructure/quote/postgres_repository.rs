//! PostgreSQL quote repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::quote::{Quote, QuoteRepository};
use crate::domain::{DomainError, ListScope};

/// PostgreSQL implementation of [`QuoteRepository`].
#[derive(Debug, Clone)]
pub struct PostgresQuoteRepository {
    pool: PgPool,
}

impl PostgresQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
    async fn create(&self, quote: Quote) -> Result<Quote, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO quotes
                (id, user_id, first_name, last_name, email, company, service_type,
                 project_details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(quote.id)
        .bind(quote.user_id)
        .bind(&quote.first_name)
        .bind(&quote.last_name)
        .bind(&quote.email)
        .bind(&quote.company)
        .bind(&quote.service_type)
        .bind(&quote.project_details)
        .bind(quote.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create quote: {}", e)))?;

        Ok(quote)
    }

    async fn list(&self, scope: ListScope) -> Result<Vec<Quote>, DomainError> {
        let rows = match scope {
            ListScope::All => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, first_name, last_name, email, company,
                           service_type, project_details, created_at
                    FROM quotes
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
            ListScope::OwnedBy(user_id) => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, first_name, last_name, email, company,
                           service_type, project_details, created_at
                    FROM quotes
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list quotes: {}", e)))?;

        let mut quotes = Vec::with_capacity(rows.len());

        for row in rows {
            quotes.push(Quote {
                id: row.get("id"),
                user_id: row.get::<Option<Uuid>, _>("user_id"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                email: row.get("email"),
                company: row.get::<Option<String>, _>("company"),
                service_type: row.get("service_type"),
                project_details: row.get("project_details"),
                created_at: row.get("created_at"),
            });
        }

        Ok(quotes)
    }
}
