//! Agency Platform API
//!
//! Tiered, key-gated public API for the agency platform:
//! - API key validation with atomic usage-quota accounting
//! - Role-ranked access control over catalog, quote and booking resources
//! - Append-only usage audit trail written off the hot path
//! - Origin-throttled anonymous form submissions

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::AppState;
use config::StorageBackend;
use domain::{Identity, Role};
use infrastructure::booking::{InMemoryBookingRepository, PostgresBookingRepository};
use infrastructure::catalog::{
    InMemoryContentRepository, InMemoryCourseRepository, InMemoryProductRepository,
    PostgresContentRepository, PostgresCourseRepository, PostgresProductRepository,
};
use infrastructure::identity::{InMemoryIdentityRepository, PostgresIdentityRepository};
use infrastructure::quote::{InMemoryQuoteRepository, PostgresQuoteRepository};
use infrastructure::submission::{
    InMemoryApplicationRepository, InMemoryNewsletterRepository, InMemorySubmissionThrottle,
    PostgresApplicationRepository, PostgresNewsletterRepository, PostgresSubmissionThrottle,
};
use infrastructure::usage::{
    InMemoryUsageLogRepository, PostgresUsageLogRepository, UsageRecorder,
};

/// Create the application state for the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.storage.backend {
        StorageBackend::Postgres => create_postgres_state(config).await,
        StorageBackend::Memory => Ok(create_memory_state(config)),
    }
}

async fn create_postgres_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;

    info!("PostgreSQL connection established");

    let usage = UsageRecorder::spawn(Arc::new(PostgresUsageLogRepository::new(pool.clone())));

    Ok(AppState {
        identities: Arc::new(PostgresIdentityRepository::new(pool.clone())),
        usage,
        content: Arc::new(PostgresContentRepository::new(pool.clone())),
        courses: Arc::new(PostgresCourseRepository::new(pool.clone())),
        products: Arc::new(PostgresProductRepository::new(pool.clone())),
        quotes: Arc::new(PostgresQuoteRepository::new(pool.clone())),
        bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
        applications: Arc::new(PostgresApplicationRepository::new(pool.clone())),
        newsletter: Arc::new(PostgresNewsletterRepository::new(pool.clone())),
        throttle: Arc::new(PostgresSubmissionThrottle::new(
            pool,
            config.throttle.window_secs,
            config.throttle.max_per_window,
        )),
    })
}

fn create_memory_state(config: &AppConfig) -> AppState {
    info!("Using in-memory storage (development backend)");

    let identities = InMemoryIdentityRepository::with_identities(demo_identities());
    let usage = UsageRecorder::spawn(Arc::new(InMemoryUsageLogRepository::new()));

    AppState {
        identities: Arc::new(identities),
        usage,
        content: Arc::new(InMemoryContentRepository::new()),
        courses: Arc::new(InMemoryCourseRepository::new()),
        products: Arc::new(InMemoryProductRepository::new()),
        quotes: Arc::new(InMemoryQuoteRepository::new()),
        bookings: Arc::new(InMemoryBookingRepository::new()),
        applications: Arc::new(InMemoryApplicationRepository::new()),
        newsletter: Arc::new(InMemoryNewsletterRepository::new()),
        throttle: Arc::new(InMemorySubmissionThrottle::new(
            Duration::from_secs(config.throttle.window_secs),
            config.throttle.max_per_window,
        )),
    }
}

/// One identity per tier for trying out the in-memory backend.
fn demo_identities() -> Vec<Identity> {
    let identities = vec![
        Identity::new("ak_demo_general", Role::General, 100),
        Identity::new("ak_demo_business", Role::Business, 1_000),
        Identity::new("ak_demo_developer", Role::Developer, 5_000),
        Identity::new("ak_demo_premium", Role::Premium, 10_000),
    ];

    for identity in &identities {
        info!(
            "Demo identity: key={} role={} limit={}",
            identity.api_key, identity.role, identity.usage_limit
        );
    }

    identities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_identities_cover_every_tier() {
        let identities = demo_identities();
        let roles: Vec<Role> = identities.iter().map(|i| i.role).collect();

        assert!(roles.contains(&Role::General));
        assert!(roles.contains(&Role::Business));
        assert!(roles.contains(&Role::Developer));
        assert!(roles.contains(&Role::Premium));
    }
}
