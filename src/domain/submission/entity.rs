//! Anonymous form submission entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job application submitted through the careers form.
///
/// Applications deduplicate on email + position within a 30-day window;
/// this is the only submission path with a uniqueness window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub position: String,
    pub portfolio_url: Option<String>,
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobApplication {
    /// Length of the window within which a repeat application for the same
    /// position is rejected.
    pub const DEDUP_WINDOW_DAYS: i64 = 30;

    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            email: email.into(),
            position: position.into(),
            portfolio_url: None,
            cover_letter: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_portfolio_url(mut self, url: impl Into<String>) -> Self {
        self.portfolio_url = Some(url.into());
        self
    }

    pub fn with_cover_letter(mut self, letter: impl Into<String>) -> Self {
        self.cover_letter = Some(letter.into());
        self
    }
}

/// A newsletter subscription; emails are unique with no time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSignup {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl NewsletterSignup {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_builder() {
        let application = JobApplication::new("Grace Hopper", "grace@example.com", "compiler-engineer")
            .with_portfolio_url("https://example.com/grace")
            .with_cover_letter("I wrote the first one.");

        assert_eq!(application.position, "compiler-engineer");
        assert!(application.portfolio_url.is_some());
        assert!(application.cover_letter.is_some());
    }
}
