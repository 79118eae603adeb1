//! Public v1 API endpoints

pub mod ai_assistant;
pub mod content;
pub mod courses;
pub mod products;
pub mod quotes;
pub mod va_booking;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use super::state::AppState;
use super::types::{PageParams, Pagination};
use crate::domain::catalog::CatalogQuery;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/content", get(content::list_content).post(content::create_content))
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route("/products", get(products::list_products).post(products::create_product))
        .route("/quotes", get(quotes::list_quotes).post(quotes::create_quote))
        .route(
            "/va-booking",
            get(va_booking::list_bookings).post(va_booking::create_booking),
        )
        .route("/ai-assistant", post(ai_assistant::assist))
}

/// Query parameters shared by the catalog list endpoints.
#[derive(Debug, Deserialize)]
pub struct CatalogListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

impl CatalogListParams {
    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(10),
        }
    }

    pub fn to_query(&self) -> CatalogQuery {
        let page = self.page_params();
        let mut query = CatalogQuery::new(u64::from(page.limit()), page.offset());

        if let Some(ref category) = self.category {
            query = query.with_category(category.clone());
        }

        if let Some(featured) = self.featured {
            query = query.with_featured(featured);
        }

        if let Some(ref search) = self.search {
            query = query.with_search(search.clone());
        }

        query
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        self.page_params().pagination(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_to_query() {
        let params = CatalogListParams {
            page: Some(3),
            limit: Some(5),
            category: Some("ecommerce".to_string()),
            featured: Some(true),
            search: None,
        };

        let query = params.to_query();
        assert_eq!(query.limit, 5);
        assert_eq!(query.offset, 10);
        assert_eq!(query.category.as_deref(), Some("ecommerce"));
        assert_eq!(query.featured, Some(true));
        assert!(query.search.is_none());
    }

    #[test]
    fn test_params_defaults() {
        let params = CatalogListParams {
            page: None,
            limit: None,
            category: None,
            featured: None,
            search: None,
        };

        let query = params.to_query();
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);

        let pagination = params.pagination(42);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.total, 42);
    }
}
