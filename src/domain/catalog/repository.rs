//! Catalog repository traits and query types

use std::fmt::Debug;

use async_trait::async_trait;

use super::{ContentItem, Course, Product};
use crate::domain::DomainError;

/// Filter and pagination parameters shared by the catalog list endpoints.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

impl CatalogQuery {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// One page of results plus the true matching-row count.
#[derive(Debug, Clone)]
pub struct CatalogPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[async_trait]
pub trait ContentRepository: Send + Sync + Debug {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<ContentItem>, DomainError>;

    /// Rejects a duplicate slug with [`DomainError::Conflict`].
    async fn create(&self, item: ContentItem) -> Result<ContentItem, DomainError>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync + Debug {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<Course>, DomainError>;
    async fn create(&self, course: Course) -> Result<Course, DomainError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync + Debug {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<Product>, DomainError>;
    async fn create(&self, product: Product) -> Result<Product, DomainError>;
}
