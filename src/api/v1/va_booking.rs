//! Virtual assistant booking endpoint handlers

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::{RequestContext, RequireApiKey};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::booking::VaBooking;
use crate::domain::Role;

/// Roles allowed to book virtual assistant hours.
const BOOKING_WRITERS: &[Role] = &[Role::Business, Role::Developer, Role::Premium];

/// GET /api/v1/va-booking
///
/// Any valid identity; non-premium callers see only their own bookings.
pub async fn list_bookings(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireApiKey(identity): RequireApiKey,
) -> Result<Json<ApiResponse<Vec<VaBooking>>>, ApiError> {
    match state.bookings.list(identity.visibility_scope()).await {
        Ok(bookings) => {
            ctx.finish(&state.usage, &identity, StatusCode::OK);
            Ok(Json(ApiResponse::new(bookings)))
        }
        Err(err) => {
            let err = ApiError::from(err);
            ctx.finish(&state.usage, &identity, err.status);
            Err(err)
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub service_type: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    #[validate(range(min = 1, message = "must be at least one hour"))]
    pub duration_hours: u32,
    #[validate(range(min = 1, message = "must be positive"))]
    pub hourly_rate: i64,
}

/// POST /api/v1/va-booking
///
/// `total_cost` is always computed server-side as
/// `duration_hours * hourly_rate`; the request cannot supply it.
pub async fn create_booking(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireApiKey(identity): RequireApiKey,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VaBooking>>), ApiError> {
    if !identity.role.permits(BOOKING_WRITERS) {
        ctx.finish(&state.usage, &identity, StatusCode::FORBIDDEN);
        return Err(ApiError::forbidden("Insufficient role for this operation"));
    }

    if let Err(errors) = body.validate() {
        ctx.finish(&state.usage, &identity, StatusCode::BAD_REQUEST);
        return Err(ApiError::from_validation(errors));
    }

    let booking = VaBooking::new(
        identity.id,
        body.service_type,
        body.description,
        body.duration_hours,
        body.hourly_rate,
    );

    match state.bookings.create(booking).await {
        Ok(created) => {
            ctx.finish(&state.usage, &identity, StatusCode::CREATED);

            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::new(created).with_message("Booking created")),
            ))
        }
        Err(err) => {
            let err = ApiError::from(err);
            ctx.finish(&state.usage, &identity, err.status);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use uuid::Uuid;

    use super::*;
    use crate::api::state::testing::test_state;
    use crate::domain::booking::BookingRepository;
    use crate::domain::identity::IdentityRepository;
    use crate::domain::identity::Admission;
    use crate::domain::{Identity, ListScope};

    fn post_ctx() -> RequestContext {
        RequestContext {
            started: Instant::now(),
            method: "POST".to_string(),
            path: "/api/v1/va-booking".to_string(),
            origin: None,
            user_agent: None,
        }
    }

    #[tokio::test]
    async fn test_booking_round_trip_computes_total_cost() {
        let fixture = test_state();
        fixture
            .identities
            .insert(Identity::new("ak_live_b", Role::Business, 10));

        let Admission::Admitted(identity) = fixture.identities.admit("ak_live_b").await.unwrap()
        else {
            panic!("expected admission");
        };
        let identity_id = identity.id;

        let body = CreateBookingRequest {
            service_type: "admin-support".to_string(),
            description: "Inbox triage".to_string(),
            duration_hours: 5,
            hourly_rate: 20_000,
        };

        let (status, response) = create_booking(
            axum::extract::State(fixture.state.clone()),
            post_ctx(),
            RequireApiKey(identity),
            Json(body),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.0.data.total_cost, 100_000);
        assert_eq!(response.0.data.user_id, identity_id);

        let stored = fixture.bookings.list(ListScope::All).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_general_role_cannot_book() {
        let fixture = test_state();
        fixture
            .identities
            .insert(Identity::new("ak_live_g", Role::General, 10));

        let Admission::Admitted(identity) = fixture.identities.admit("ak_live_g").await.unwrap()
        else {
            panic!("expected admission");
        };

        let body = CreateBookingRequest {
            service_type: "admin-support".to_string(),
            description: "Inbox triage".to_string(),
            duration_hours: 2,
            hourly_rate: 10_000,
        };

        let err = create_booking(
            axum::extract::State(fixture.state.clone()),
            post_ctx(),
            RequireApiKey(identity),
            Json(body),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let stored = fixture.bookings.list(ListScope::All).await.unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_writer_roles() {
        assert!(!Role::General.permits(BOOKING_WRITERS));
        assert!(Role::Business.permits(BOOKING_WRITERS));
    }

    #[test]
    fn test_total_cost_from_request_fields() {
        let booking = VaBooking::new(Uuid::new_v4(), "admin-support", "Inbox triage", 5, 20_000);
        assert_eq!(booking.total_cost, 100_000);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let request = CreateBookingRequest {
            service_type: "admin-support".to_string(),
            description: "Inbox triage".to_string(),
            duration_hours: 0,
            hourly_rate: 20_000,
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("duration_hours"));
    }
}
