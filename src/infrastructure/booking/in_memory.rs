//! In-memory booking repository implementation

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::booking::{BookingRepository, VaBooking};
use crate::domain::{DomainError, ListScope};

/// Thread-safe in-memory implementation of [`BookingRepository`].
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<Vec<VaBooking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: VaBooking) -> Result<VaBooking, DomainError> {
        let mut bookings = self.bookings.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn list(&self, scope: ListScope) -> Result<Vec<VaBooking>, DomainError> {
        let bookings = self.bookings.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut visible: Vec<_> = bookings
            .iter()
            .filter(|b| scope.includes(Some(b.user_id)))
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
    async fn test_scoped_listing() {
        let repo = InMemoryBookingRepository::new();
        let general = Identity::new("ak_live_g", Role::General, 100);

        repo.create(VaBooking::new(general.id, "admin-support", "Mine", 2, 15_000))
            .await
            .unwrap();
        repo.create(VaBooking::new(Uuid::new_v4(), "admin-support", "Theirs", 3, 15_000))
            .await
            .unwrap();

        let visible = repo.list(general.visibility_scope()).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].description, "Mine");

        let all = repo.list(ListScope::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
