//! In-memory catalog repository implementations

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::catalog::{
    CatalogPage, CatalogQuery, ContentItem, ContentRepository, Course, CourseRepository, Product,
    ProductRepository,
};
use crate::domain::DomainError;

fn matches(query: &CatalogQuery, title: &str, category: &str, featured: bool) -> bool {
    if let Some(ref wanted) = query.category {
        if category != wanted {
            return false;
        }
    }

    if let Some(wanted) = query.featured {
        if featured != wanted {
            return false;
        }
    }

    if let Some(ref search) = query.search {
        if !title.to_lowercase().contains(&search.to_lowercase()) {
            return false;
        }
    }

    true
}

fn page_of<T>(
    mut filtered: Vec<T>,
    query: &CatalogQuery,
    created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> CatalogPage<T> {
    filtered.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    let total = filtered.len() as u64;

    let items = filtered
        .into_iter()
        .skip(usize::try_from(query.offset).unwrap_or(usize::MAX))
        .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
        .collect();

    CatalogPage { items, total }
}

/// Thread-safe in-memory implementation of [`ContentRepository`].
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    items: RwLock<Vec<ContentItem>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<ContentItem>, DomainError> {
        let items = self.items.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let filtered: Vec<_> = items
            .iter()
            .filter(|i| matches(query, &i.title, &i.category, i.featured))
            .cloned()
            .collect();

        Ok(page_of(filtered, query, |i| i.created_at))
    }

    async fn create(&self, item: ContentItem) -> Result<ContentItem, DomainError> {
        let mut items = self.items.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if items.iter().any(|existing| existing.slug == item.slug) {
            return Err(DomainError::conflict(format!(
                "Content slug '{}' already exists",
                item.slug
            )));
        }

        items.push(item.clone());
        Ok(item)
    }
}

/// Thread-safe in-memory implementation of [`CourseRepository`].
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<Course>, DomainError> {
        let courses = self.courses.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let filtered: Vec<_> = courses
            .iter()
            .filter(|c| matches(query, &c.title, &c.category, c.featured))
            .cloned()
            .collect();

        Ok(page_of(filtered, query, |i| i.created_at))
    }

    async fn create(&self, course: Course) -> Result<Course, DomainError> {
        let mut courses = self.courses.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        courses.push(course.clone());
        Ok(course)
    }
}

/// Thread-safe in-memory implementation of [`ProductRepository`].
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage<Product>, DomainError> {
        let products = self.products.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let filtered: Vec<_> = products
            .iter()
            .filter(|p| matches(query, &p.title, &p.category, p.featured))
            .cloned()
            .collect();

        Ok(page_of(filtered, query, |i| i.created_at))
    }

    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        let mut products = self.products.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        products.push(product.clone());
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CourseLevel;

    #[tokio::test]
    async fn test_content_slug_conflict() {
        let repo = InMemoryContentRepository::new();

        repo.create(ContentItem::new("First", "the-slug", "...", "news"))
            .await
            .unwrap();

        let result = repo
            .create(ContentItem::new("Second", "the-slug", "...", "news"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_category_and_featured_filters() {
        let repo = InMemoryProductRepository::new();

        repo.create(Product::new("Theme Pack", "themes", 2_500).with_featured(true))
            .await
            .unwrap();
        repo.create(Product::new("Logo Kit", "branding", 5_000))
            .await
            .unwrap();

        let query = CatalogQuery::new(10, 0).with_category("themes");
        let page = repo.list(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Theme Pack");

        let query = CatalogQuery::new(10, 0).with_featured(false);
        let page = repo.list(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Logo Kit");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = InMemoryCourseRepository::new();

        repo.create(Course::new(
            "Advanced Shopify Theming",
            "Ada",
            "ecommerce",
            CourseLevel::Advanced,
            99_00,
        ))
        .await
        .unwrap();

        let query = CatalogQuery::new(10, 0).with_search("shopify");
        let page = repo.list(&query).await.unwrap();
        assert_eq!(page.items.len(), 1);

        let query = CatalogQuery::new(10, 0).with_search("django");
        let page = repo.list(&query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_total_counts_all_matches_not_the_page() {
        let repo = InMemoryProductRepository::new();

        for n in 0..15 {
            repo.create(Product::new(format!("Product {}", n), "kits", 1_000))
                .await
                .unwrap();
        }

        let query = CatalogQuery::new(10, 10);
        let page = repo.list(&query).await.unwrap();

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 15);
    }
}
