//! Custom JSON extractor that returns errors as JSON
//!
//! A wrapper around `axum::Json` so deserialization failures come back in
//! the `{error, code}` failure envelope instead of axum's plain-text
//! rejection. Because body parsing runs after key validation has already
//! charged the caller, a rejected body still produces a usage log entry.

use axum::{
    Json as AxumJson,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use super::error::{ApiErrorBody, ErrorCode};
use crate::api::middleware::RequestContext;
use crate::api::state::AppState;
use crate::domain::Identity;

/// JSON body extractor producing failure-envelope rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JSON rejection error carrying the failure envelope
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.message,
            code: Some(ErrorCode::ValidationError),
        };

        (self.status, AxumJson(body)).into_response()
    }
}

impl<T> FromRequest<AppState> for Json<T>
where
    T: DeserializeOwned,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        // snapshot before the body is consumed, for rejection accounting
        let ctx = req.extensions().get::<RequestContext>().cloned();
        let identity = req.extensions().get::<Identity>().cloned();

        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => {
                // every body failure is a 400 to the caller, whatever axum
                // classified it as
                let status = StatusCode::BAD_REQUEST;

                if let (Some(ctx), Some(identity)) = (ctx, identity) {
                    ctx.finish(&state.usage, &identity, status);
                }

                Err(JsonRejection {
                    status,
                    message: format_rejection_message(&rejection),
                })
            }
        }
    }
}

fn format_rejection_message(rejection: &axum::extract::rejection::JsonRejection) -> String {
    use axum::extract::rejection::JsonRejection::*;

    match rejection {
        JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        BytesRejection(err) => format!("Failed to read request body: {}", err.body_text()),
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
