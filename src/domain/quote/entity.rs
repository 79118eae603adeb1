//! Quote request entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project quote request.
///
/// Quotes can be submitted anonymously, so the owner is optional. Repeated
/// identical submissions produce independent rows; quotes carry no
/// deduplication window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    /// Identity that submitted the quote, when a key was presented.
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: Option<String>,
    pub service_type: String,
    pub project_details: String,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        service_type: impl Into<String>,
        project_details: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            company: None,
            service_type: service_type.into(),
            project_details: project_details.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}
