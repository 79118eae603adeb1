//! In-memory form submission repository implementations

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::submission::{
    ApplicationRepository, JobApplication, NewsletterRepository, NewsletterSignup,
    SubmissionThrottle,
};
use crate::domain::DomainError;

/// Thread-safe in-memory implementation of [`ApplicationRepository`].
#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<Vec<JobApplication>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn create(&self, application: JobApplication) -> Result<JobApplication, DomainError> {
        let mut applications = self.applications.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        applications.push(application.clone());
        Ok(application)
    }

    async fn recent_exists(
        &self,
        email: &str,
        position: &str,
        since: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let applications = self.applications.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(applications
            .iter()
            .any(|a| a.email == email && a.position == position && a.created_at >= since))
    }
}

/// Thread-safe in-memory implementation of [`NewsletterRepository`].
#[derive(Debug, Default)]
pub struct InMemoryNewsletterRepository {
    signups: RwLock<Vec<NewsletterSignup>>,
}

impl InMemoryNewsletterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsletterRepository for InMemoryNewsletterRepository {
    async fn subscribe(&self, signup: NewsletterSignup) -> Result<NewsletterSignup, DomainError> {
        let mut signups = self.signups.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if signups.iter().any(|s| s.email == signup.email) {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already subscribed",
                signup.email
            )));
        }

        signups.push(signup.clone());
        Ok(signup)
    }
}

/// In-memory implementation of [`SubmissionThrottle`].
///
/// Single-process only; the shared-store backend is what makes the bound
/// hold across instances.
#[derive(Debug)]
pub struct InMemorySubmissionThrottle {
    windows: Mutex<HashMap<String, (Instant, u32)>>,
    window: Duration,
    max_per_window: u32,
}

impl InMemorySubmissionThrottle {
    pub fn new(window: Duration, max_per_window: u32) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window,
            max_per_window,
        }
    }
}

#[async_trait]
impl SubmissionThrottle for InMemorySubmissionThrottle {
    async fn try_acquire(&self, origin: &str, form: &str) -> Result<bool, DomainError> {
        let mut windows = self.windows.lock().map_err(|e| {
            DomainError::storage(format!("Failed to acquire throttle lock: {}", e))
        })?;

        let key = format!("{}:{}", form, origin);
        let now = Instant::now();

        let entry = windows.entry(key).or_insert((now, 0));

        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }

        entry.1 += 1;
        Ok(entry.1 <= self.max_per_window)
    }
}
