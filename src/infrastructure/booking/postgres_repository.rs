//! PostgreSQL booking repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::booking::{BookingRepository, VaBooking};
use crate::domain::{DomainError, ListScope};

/// PostgreSQL implementation of [`BookingRepository`].
#[derive(Debug, Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn create(&self, booking: VaBooking) -> Result<VaBooking, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO va_bookings
                (id, user_id, service_type, description, duration_hours, hourly_rate,
                 total_cost, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(&booking.service_type)
        .bind(&booking.description)
        .bind(i32::try_from(booking.duration_hours).unwrap_or(i32::MAX))
        .bind(booking.hourly_rate)
        .bind(booking.total_cost)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create booking: {}", e)))?;

        Ok(booking)
    }

    async fn list(&self, scope: ListScope) -> Result<Vec<VaBooking>, DomainError> {
        let rows = match scope {
            ListScope::All => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, service_type, description, duration_hours,
                           hourly_rate, total_cost, created_at
                    FROM va_bookings
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
            ListScope::OwnedBy(user_id) => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, service_type, description, duration_hours,
                           hourly_rate, total_cost, created_at
                    FROM va_bookings
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list bookings: {}", e)))?;

        let mut bookings = Vec::with_capacity(rows.len());

        for row in rows {
            let duration_hours: i32 = row.get("duration_hours");

            bookings.push(VaBooking {
                id: row.get("id"),
                user_id: row.get("user_id"),
                service_type: row.get("service_type"),
                description: row.get("description"),
                duration_hours: u32::try_from(duration_hours)
                    .map_err(|_| DomainError::storage("Negative duration_hours in database"))?,
                hourly_rate: row.get("hourly_rate"),
                total_cost: row.get("total_cost"),
                created_at: row.get("created_at"),
            });
        }

        Ok(bookings)
    }
}
