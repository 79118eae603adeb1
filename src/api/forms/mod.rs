//! Anonymous form submission endpoints

pub mod applications;
pub mod newsletter;

use axum::{Router, routing::post};

use super::state::AppState;

/// Create forms router
pub fn create_forms_router() -> Router<AppState> {
    Router::new()
        .route("/applications", post(applications::submit_application))
        .route("/newsletter", post(newsletter::subscribe))
}
