//! Form submission repository traits

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{JobApplication, NewsletterSignup};
use crate::domain::DomainError;

#[async_trait]
pub trait ApplicationRepository: Send + Sync + Debug {
    async fn create(&self, application: JobApplication) -> Result<JobApplication, DomainError>;

    /// Whether an application for `position` from `email` exists at or
    /// after `since`.
    async fn recent_exists(
        &self,
        email: &str,
        position: &str,
        since: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait NewsletterRepository: Send + Sync + Debug {
    /// Rejects an already-subscribed email with [`DomainError::Conflict`].
    async fn subscribe(&self, signup: NewsletterSignup) -> Result<NewsletterSignup, DomainError>;
}

/// Bounds the rate of anonymous submissions per caller origin.
///
/// Counters live in the shared store (the same atomic conditional-increment
/// pattern as the identity usage counter), never in process memory, so the
/// bound holds across running instances.
#[async_trait]
pub trait SubmissionThrottle: Send + Sync + Debug {
    /// Count one submission for `origin` on `form`; returns false when the
    /// origin is over its window allowance.
    async fn try_acquire(&self, origin: &str, form: &str) -> Result<bool, DomainError>;
}
