//! Quote endpoint handlers

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::{OptionalApiKey, RequestContext, RequireApiKey};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::quote::Quote;
use crate::domain::Role;

/// Roles allowed to read the quote inbox.
const QUOTE_READERS: &[Role] = &[Role::Business, Role::Developer, Role::Premium];

/// GET /api/v1/quotes
///
/// Key required. The role gate opens the endpoint; a separate ownership
/// filter narrows which rows are visible: non-premium callers see only
/// their own quotes.
pub async fn list_quotes(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireApiKey(identity): RequireApiKey,
) -> Result<Json<ApiResponse<Vec<Quote>>>, ApiError> {
    if !identity.role.permits(QUOTE_READERS) {
        ctx.finish(&state.usage, &identity, StatusCode::FORBIDDEN);
        return Err(ApiError::forbidden("Insufficient role for this operation"));
    }

    match state.quotes.list(identity.visibility_scope()).await {
        Ok(quotes) => {
            ctx.finish(&state.usage, &identity, StatusCode::OK);
            Ok(Json(ApiResponse::new(quotes)))
        }
        Err(err) => {
            let err = ApiError::from(err);
            ctx.finish(&state.usage, &identity, err.status);
            Err(err)
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub company: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub service_type: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub project_details: String,
}

/// POST /api/v1/quotes
///
/// Key optional: anonymous submissions pass through unaccounted, while a
/// presented key must validate and ties the quote to its identity.
/// Identical payloads always produce independent rows.
pub async fn create_quote(
    State(state): State<AppState>,
    ctx: RequestContext,
    OptionalApiKey(identity): OptionalApiKey,
    Json(body): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Quote>>), ApiError> {
    if let Err(errors) = body.validate() {
        ctx.finish_optional(&state.usage, identity.as_ref(), StatusCode::BAD_REQUEST);
        return Err(ApiError::from_validation(errors));
    }

    let mut quote = Quote::new(
        body.first_name,
        body.last_name,
        body.email,
        body.service_type,
        body.project_details,
    );

    if let Some(company) = body.company {
        quote = quote.with_company(company);
    }

    if let Some(ref identity) = identity {
        quote = quote.with_user(identity.id);
    }

    match state.quotes.create(quote).await {
        Ok(created) => {
            ctx.finish_optional(&state.usage, identity.as_ref(), StatusCode::CREATED);

            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::new(created).with_message("Quote request received")),
            ))
        }
        Err(err) => {
            let err = ApiError::from(err);
            ctx.finish_optional(&state.usage, identity.as_ref(), err.status);
            Err(err)
        }
    }
}
