//! Catalog entities: published content, courses and products

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published article or resource page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    /// URL slug, unique across content.
    pub slug: String,
    pub content: String,
    pub category: String,
    pub featured: bool,
    /// Identity that created the item, when created through the API.
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            content: content.into(),
            category: category.into(),
            featured: false,
            author_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_author(mut self, author_id: Uuid) -> Self {
        self.author_id = Some(author_id);
        self
    }
}

/// Difficulty tier of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a stored level string, defaulting to beginner.
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sellable course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub instructor_name: String,
    pub category: String,
    pub level: CourseLevel,
    /// Price in minor currency units.
    pub price: i64,
    pub featured: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn new(
        title: impl Into<String>,
        instructor_name: impl Into<String>,
        category: impl Into<String>,
        level: CourseLevel,
        price: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            instructor_name: instructor_name.into(),
            category: category.into(),
            level,
            price,
            featured: false,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_created_by(mut self, created_by: Uuid) -> Self {
        self.created_by = Some(created_by);
        self
    }
}

/// A shop product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    /// Price in minor currency units.
    pub price: i64,
    pub featured: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(title: impl Into<String>, category: impl Into<String>, price: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            category: category.into(),
            price,
            featured: false,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_created_by(mut self, created_by: Uuid) -> Self {
        self.created_by = Some(created_by);
        self
    }
}
