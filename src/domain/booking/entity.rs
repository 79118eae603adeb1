//! Virtual assistant booking entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booked block of virtual-assistant hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaBooking {
    pub id: Uuid,
    /// Identity that created the booking.
    pub user_id: Uuid,
    pub service_type: String,
    pub description: String,
    pub duration_hours: u32,
    /// Rate in minor currency units per hour.
    pub hourly_rate: i64,
    /// Always `duration_hours * hourly_rate`; computed server-side, never
    /// taken from the request.
    pub total_cost: i64,
    pub created_at: DateTime<Utc>,
}

impl VaBooking {
    pub fn new(
        user_id: Uuid,
        service_type: impl Into<String>,
        description: impl Into<String>,
        duration_hours: u32,
        hourly_rate: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            service_type: service_type.into(),
            description: description.into(),
            duration_hours,
            hourly_rate,
            total_cost: i64::from(duration_hours) * hourly_rate,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_cost_is_computed() {
        let booking = VaBooking::new(Uuid::new_v4(), "admin-support", "Inbox triage", 5, 20_000);
        assert_eq!(booking.total_cost, 100_000);
    }

    #[test]
    fn test_zero_hours_costs_nothing() {
        let booking = VaBooking::new(Uuid::new_v4(), "admin-support", "Nothing", 0, 20_000);
        assert_eq!(booking.total_cost, 0);
    }
}
