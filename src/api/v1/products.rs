//! Product endpoint handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use super::CatalogListParams;
use crate::api::middleware::{OptionalApiKey, RequestContext, RequireApiKey};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::catalog::Product;
use crate::domain::Role;

/// Roles allowed to publish products.
const PRODUCT_WRITERS: &[Role] = &[Role::Business, Role::Developer, Role::Premium];

/// GET /api/v1/products
///
/// Public; a presented key must be valid and the call is then accounted.
pub async fn list_products(
    State(state): State<AppState>,
    ctx: RequestContext,
    OptionalApiKey(identity): OptionalApiKey,
    Query(params): Query<CatalogListParams>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    match state.products.list(&params.to_query()).await {
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
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: i64,
    #[serde(default)]
    pub featured: bool,
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireApiKey(identity): RequireApiKey,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), ApiError> {
    if !identity.role.permits(PRODUCT_WRITERS) {
        ctx.finish(&state.usage, &identity, StatusCode::FORBIDDEN);
        return Err(ApiError::forbidden("Insufficient role for this operation"));
    }

    if let Err(errors) = body.validate() {
        ctx.finish(&state.usage, &identity, StatusCode::BAD_REQUEST);
        return Err(ApiError::from_validation(errors));
    }

    let product = Product::new(body.title, body.category, body.price)
        .with_featured(body.featured)
        .with_created_by(identity.id);

    match state.products.create(product).await {
        Ok(created) => {
            ctx.finish(&state.usage, &identity, StatusCode::CREATED);

            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::new(created).with_message("Product created")),
            ))
        }
        Err(err) => {
            let err = ApiError::from(err);
            ctx.finish(&state.usage, &identity, err.status);
            Err(err)
        }
    }
}
