//! In-memory quote repository implementation

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::quote::{Quote, QuoteRepository};
use crate::domain::{DomainError, ListScope};

/// Thread-safe in-memory implementation of [`QuoteRepository`].
#[derive(Debug, Default)]
pub struct InMemoryQuoteRepository {
    quotes: RwLock<Vec<Quote>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn create(&self, quote: Quote) -> Result<Quote, DomainError> {
        let mut quotes = self.quotes.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        quotes.push(quote.clone());
        Ok(quote)
    }

    async fn list(&self, scope: ListScope) -> Result<Vec<Quote>, DomainError> {
        let quotes = self.quotes.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut visible: Vec<_> = quotes
            .iter()
            .filter(|q| scope.includes(q.user_id))
            .cloned()
            .collect();

        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Identity, Role};

    #[tokio::test]
    async fn test_non_premium_sees_only_own_rows() {
        let repo = InMemoryQuoteRepository::new();
        let business = Identity::new("ak_live_b", Role::Business, 100);

        repo.create(
            Quote::new("Ada", "Lovelace", "ada@example.com", "web-development", "Own quote")
                .with_user(business.id),
        )
        .await
        .unwrap();
        repo.create(
            Quote::new("Mary", "Shelley", "mary@example.com", "seo", "Someone else's")
                .with_user(Uuid::new_v4()),
        )
        .await
        .unwrap();

        let visible = repo.list(business.visibility_scope()).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].project_details, "Own quote");
    }

    #[tokio::test]
    async fn test_premium_sees_all_rows() {
        let repo = InMemoryQuoteRepository::new();
        let premium = Identity::new("ak_live_p", Role::Premium, 100);

        repo.create(
            Quote::new("Ada", "Lovelace", "ada@example.com", "web-development", "Owned")
                .with_user(Uuid::new_v4()),
        )
        .await
        .unwrap();
        repo.create(Quote::new("Anon", "Visitor", "anon@example.com", "seo", "Anonymous"))
            .await
            .unwrap();

        let visible = repo.list(premium.visibility_scope()).await.unwrap();
        assert_eq!(visible.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_submissions_create_independent_rows() {
        let repo = InMemoryQuoteRepository::new();

        let quote = Quote::new("Ada", "Lovelace", "ada@example.com", "seo", "Same payload");
        repo.create(quote.clone()).await.unwrap();
        repo.create(Quote::new("Ada", "Lovelace", "ada@example.com", "seo", "Same payload"))
            .await
            .unwrap();

        let all = repo.list(ListScope::All).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id, all[1].id);
    }
}
