//! Booking repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::VaBooking;
use crate::domain::{DomainError, ListScope};

#[async_trait]
pub trait BookingRepository: Send + Sync + Debug {
    async fn create(&self, booking: VaBooking) -> Result<VaBooking, DomainError>;

    /// Newest first, narrowed by the caller's visibility scope.
    async fn list(&self, scope: ListScope) -> Result<Vec<VaBooking>, DomainError>;
}
