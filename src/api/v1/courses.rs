//! Course endpoint handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use super::CatalogListParams;
use crate::api::middleware::{OptionalApiKey, RequestContext, RequireApiKey};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::catalog::{Course, CourseLevel};
use crate::domain::Role;

/// Roles allowed to publish courses.
const COURSE_WRITERS: &[Role] = &[Role::Developer, Role::Premium];

/// GET /api/v1/courses
///
/// Public; a presented key must be valid and the call is then accounted.
pub async fn list_courses(
    State(state): State<AppState>,
    ctx: RequestContext,
    OptionalApiKey(identity): OptionalApiKey,
    Query(params): Query<CatalogListParams>,
) -> Result<Json<ApiResponse<Vec<Course>>>, ApiError> {
    match state.courses.list(&params.to_query()).await {
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
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub instructor_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    pub level: CourseLevel,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: i64,
    #[serde(default)]
    pub featured: bool,
}

/// POST /api/v1/courses
pub async fn create_course(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireApiKey(identity): RequireApiKey,
    Json(body): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), ApiError> {
    if !identity.role.permits(COURSE_WRITERS) {
        ctx.finish(&state.usage, &identity, StatusCode::FORBIDDEN);
        return Err(ApiError::forbidden("Insufficient role for this operation"));
    }

    if let Err(errors) = body.validate() {
        ctx.finish(&state.usage, &identity, StatusCode::BAD_REQUEST);
        return Err(ApiError::from_validation(errors));
    }

    let course = Course::new(
        body.title,
        body.instructor_name,
        body.category,
        body.level,
        body.price,
    )
    .with_featured(body.featured)
    .with_created_by(identity.id);

    match state.courses.create(course).await {
        Ok(created) => {
            ctx.finish(&state.usage, &identity, StatusCode::CREATED);

            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::new(created).with_message("Course created")),
            ))
        }
        Err(err) => {
            let err = ApiError::from(err);
            ctx.finish(&state.usage, &identity, err.status);
            Err(err)
        }
    }
}
