//! Quote repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::Quote;
use crate::domain::{DomainError, ListScope};

#[async_trait]
pub trait QuoteRepository: Send + Sync + Debug {
    async fn create(&self, quote: Quote) -> Result<Quote, DomainError>;

    /// Newest first, narrowed by the caller's visibility scope.
    async fn list(&self, scope: ListScope) -> Result<Vec<Quote>, DomainError>;
}
