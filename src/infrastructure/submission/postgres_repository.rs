//! PostgreSQL form submission repository implementations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::submission::{
    ApplicationRepository, JobApplication, NewsletterRepository, NewsletterSignup,
    SubmissionThrottle,
};
use crate::domain::DomainError;

/// PostgreSQL implementation of [`ApplicationRepository`].
#[derive(Debug, Clone)]
pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn create(&self, application: JobApplication) -> Result<JobApplication, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO job_applications
                (id, full_name, email, position, portfolio_url, cover_letter, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(application.id)
        .bind(&application.full_name)
        .bind(&application.email)
        .bind(&application.position)
        .bind(&application.portfolio_url)
        .bind(&application.cover_letter)
        .bind(application.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create application: {}", e)))?;

        Ok(application)
    }

    async fn recent_exists(
        &self,
        email: &str,
        position: &str,
        since: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM job_applications
            WHERE email = $1 AND position = $2 AND created_at >= $3
            "#,
        )
        .bind(email)
        .bind(position)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check applications: {}", e)))?;

        Ok(count > 0)
    }
}

/// PostgreSQL implementation of [`NewsletterRepository`].
#[derive(Debug, Clone)]
pub struct PostgresNewsletterRepository {
    pool: PgPool,
}

impl PostgresNewsletterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsletterRepository for PostgresNewsletterRepository {
    async fn subscribe(&self, signup: NewsletterSignup) -> Result<NewsletterSignup, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO newsletter_signups (id, email, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(signup.id)
        .bind(&signup.email)
        .bind(signup.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!("Email '{}' is already subscribed", signup.email))
            } else {
                DomainError::storage(format!("Failed to create signup: {}", e))
            }
        })?;

        Ok(signup)
    }
}

/// PostgreSQL implementation of [`SubmissionThrottle`].
///
/// One row per (origin, form) pair; the window rolls over inside a single
/// upsert so the count stays correct across concurrent instances.
#[derive(Debug, Clone)]
pub struct PostgresSubmissionThrottle {
    pool: PgPool,
    window_secs: u64,
    max_per_window: u32,
}

impl PostgresSubmissionThrottle {
    pub fn new(pool: PgPool, window_secs: u64, max_per_window: u32) -> Self {
        Self {
            pool,
            window_secs,
            max_per_window,
        }
    }
}

#[async_trait]
impl SubmissionThrottle for PostgresSubmissionThrottle {
    async fn try_acquire(&self, origin: &str, form: &str) -> Result<bool, DomainError> {
        let count: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO submission_windows (origin, form, window_start, count)
            VALUES ($1, $2, now(), 1)
            ON CONFLICT (origin, form) DO UPDATE SET
                count = CASE
                    WHEN submission_windows.window_start < now() - make_interval(secs => $3)
                        THEN 1
                    ELSE submission_windows.count + 1
                END,
                window_start = CASE
                    WHEN submission_windows.window_start < now() - make_interval(secs => $3)
                        THEN now()
                    ELSE submission_windows.window_start
                END
            RETURNING count
            "#,
        )
        .bind(origin)
        .bind(form)
        .bind(self.window_secs as f64)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update submission window: {}", e)))?;

        Ok(count >= 0 && (count as u32) <= self.max_per_window)
    }
}
