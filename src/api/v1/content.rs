//! Content endpoint handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use super::CatalogListParams;
use crate::api::middleware::{OptionalApiKey, RequestContext, RequireApiKey};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::catalog::ContentItem;
use crate::domain::Role;

/// Roles allowed to publish content.
const CONTENT_WRITERS: &[Role] = &[Role::Business, Role::Developer, Role::Premium];

/// GET /api/v1/content
///
/// Public; a presented key must be valid and the call is then accounted.
pub async fn list_content(
    State(state): State<AppState>,
    ctx: RequestContext,
    OptionalApiKey(identity): OptionalApiKey,
    Query(params): Query<CatalogListParams>,
) -> Result<Json<ApiResponse<Vec<ContentItem>>>, ApiError> {
    match state.content.list(&params.to_query()).await {
        Ok(page) => {
            ctx.finish_optional(&state.usage, identity.as_ref(), StatusCode::OK);

            Ok(Json(
                ApiResponse::new(page.items).with_pagination(params.pagination(page.total)),
            ))
        }
        Err(err) => {
            let err = ApiError::from(err);
            ctx.finish_optional(&state.usage, identity.as_ref(), err.status);
            Err(err)
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateContentRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub slug: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

/// POST /api/v1/content
pub async fn create_content(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireApiKey(identity): RequireApiKey,
    Json(body): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContentItem>>), ApiError> {
    if !identity.role.permits(CONTENT_WRITERS) {
        ctx.finish(&state.usage, &identity, StatusCode::FORBIDDEN);
        return Err(ApiError::forbidden("Insufficient role for this operation"));
    }

    if let Err(errors) = body.validate() {
        ctx.finish(&state.usage, &identity, StatusCode::BAD_REQUEST);
        return Err(ApiError::from_validation(errors));
    }

    let item = ContentItem::new(body.title, body.slug, body.content, body.category)
        .with_featured(body.featured)
        .with_author(identity.id);

    match state.content.create(item).await {
        Ok(created) => {
            ctx.finish(&state.usage, &identity, StatusCode::CREATED);

            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::new(created).with_message("Content created")),
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
    use super::*;

    #[test]
    fn test_writer_roles() {
        assert!(!Role::General.permits(CONTENT_WRITERS));
        assert!(Role::Business.permits(CONTENT_WRITERS));
        assert!(Role::Developer.permits(CONTENT_WRITERS));
        assert!(Role::Premium.permits(CONTENT_WRITERS));
    }

    #[test]
    fn test_request_validation() {
        let request = CreateContentRequest {
            title: "".to_string(),
            slug: "a-slug".to_string(),
            content: "body".to_string(),
            category: "news".to_string(),
            featured: false,
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}
