//! Job application form handler

use axum::extract::State;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::RequestContext;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::submission::JobApplication;

#[derive(Debug, Deserialize, Validate)]
pub struct ApplicationRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub position: String,
    #[validate(url(message = "must be a valid URL"))]
    pub portfolio_url: Option<String>,
    pub cover_letter: Option<String>,
}

/// POST /api/forms/applications
///
/// Anonymous, origin-throttled. Unlike quotes, applications carry a
/// uniqueness window: a repeat for the same email + position within 30
/// days is a conflict.
pub async fn submit_application(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(body): Json<ApplicationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobApplication>>), ApiError> {
    let origin = ctx.origin.clone().unwrap_or_else(|| "unknown".to_string());

    if !state.throttle.try_acquire(&origin, "applications").await? {
        return Err(ApiError::rate_limited(
            "Too many submissions, please try again later",
        ));
    }

    body.validate().map_err(ApiError::from_validation)?;

    let since = Utc::now() - Duration::days(JobApplication::DEDUP_WINDOW_DAYS);

    if state
        .applications
        .recent_exists(&body.email, &body.position, since)
        .await?
    {
        return Err(ApiError::conflict(
            "An application for this position was already received recently",
        ));
    }

    let mut application = JobApplication::new(body.full_name, body.email, body.position);

    if let Some(url) = body.portfolio_url {
        application = application.with_portfolio_url(url);
    }

    if let Some(letter) = body.cover_letter {
        application = application.with_cover_letter(letter);
    }

    let created = state.applications.create(application).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(created).with_message("Application received")),
    ))
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use axum::extract::State;

    use super::*;
    use crate::api::state::testing::test_state;

    fn form_ctx(origin: &str) -> RequestContext {
        RequestContext {
            started: Instant::now(),
            method: "POST".to_string(),
            path: "/api/forms/applications".to_string(),
            origin: Some(origin.to_string()),
            user_agent: None,
        }
    }

    fn application_body(position: &str) -> ApplicationRequest {
        ApplicationRequest {
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            position: position.to_string(),
            portfolio_url: None,
            cover_letter: None,
        }
    }

    #[tokio::test]
    async fn test_repeat_application_within_window_conflicts() {
        let fixture = test_state();

        let (status, _) = submit_application(
            State(fixture.state.clone()),
            form_ctx("203.0.113.7"),
            Json(application_body("compiler-engineer")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = submit_application(
            State(fixture.state.clone()),
            form_ctx("203.0.113.7"),
            Json(application_body("compiler-engineer")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_origin_throttle_bounds_submissions() {
        // the test throttle allows 5 submissions per window
        let fixture = test_state();

        for n in 0..5 {
            submit_application(
                State(fixture.state.clone()),
                form_ctx("203.0.113.7"),
                Json(application_body(&format!("position-{}", n))),
            )
            .await
            .unwrap();
        }

        let err = submit_application(
            State(fixture.state.clone()),
            form_ctx("203.0.113.7"),
            Json(application_body("position-6")),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);

        // a different origin is unaffected
        let (status, _) = submit_application(
            State(fixture.state.clone()),
            form_ctx("198.51.100.9"),
            Json(application_body("position-7")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    #[test]
    fn test_request_validation() {
        let request = ApplicationRequest {
            full_name: "Grace Hopper".to_string(),
            email: "not-an-email".to_string(),
            position: "".to_string(),
            portfolio_url: Some("not a url".to_string()),
            cover_letter: None,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("position"));
        assert!(fields.contains_key("portfolio_url"));
    }
}
