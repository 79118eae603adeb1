//! Newsletter signup form handler

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::RequestContext;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::submission::NewsletterSignup;

#[derive(Debug, Deserialize, Validate)]
pub struct NewsletterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// POST /api/forms/newsletter
///
/// Anonymous, origin-throttled. Emails are unique with no time window;
/// re-subscribing is a conflict.
pub async fn subscribe(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(body): Json<NewsletterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NewsletterSignup>>), ApiError> {
    let origin = ctx.origin.clone().unwrap_or_else(|| "unknown".to_string());

    if !state.throttle.try_acquire(&origin, "newsletter").await? {
        return Err(ApiError::rate_limited(
            "Too many submissions, please try again later",
        ));
    }

    body.validate().map_err(ApiError::from_validation)?;

    let created = state.newsletter.subscribe(NewsletterSignup::new(body.email)).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(created).with_message("Subscribed")),
    ))
}
