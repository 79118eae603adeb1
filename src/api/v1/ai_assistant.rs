//! AI assistant endpoint handler
//!
//! Any valid identity may call this endpoint; the role only selects the
//! canned response content, never access.

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::{RequestContext, RequireApiKey};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::Role;

#[derive(Debug, Deserialize, Validate)]
pub struct AssistantRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AssistantReply {
    pub reply: String,
    pub tier: Role,
}

/// POST /api/v1/ai-assistant
pub async fn assist(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireApiKey(identity): RequireApiKey,
    Json(body): Json<AssistantRequest>,
) -> Result<Json<ApiResponse<AssistantReply>>, ApiError> {
    if let Err(errors) = body.validate() {
        ctx.finish(&state.usage, &identity, StatusCode::BAD_REQUEST);
        return Err(ApiError::from_validation(errors));
    }

    let reply = canned_reply(identity.role, &body.message);

    ctx.finish(&state.usage, &identity, StatusCode::OK);

    Ok(Json(ApiResponse::new(AssistantReply {
        reply,
        tier: identity.role,
    })))
}

fn canned_reply(role: Role, message: &str) -> String {
    match role {
        Role::General => format!(
            "Thanks for asking about \"{}\". Start with our guides and tutorials; \
             upgrading your plan unlocks tailored recommendations.",
            message
        ),
        Role::Business => format!(
            "Here's a growth-focused take on \"{}\": we'd pair it with an audit of \
             your current funnel and a conversion plan.",
            message
        ),
        Role::Developer => format!(
            "On \"{}\": check the API reference and integration samples; the \
             sandbox environment mirrors production behavior.",
            message
        ),
        Role::Premium => format!(
            "Priority answer for \"{}\": your dedicated strategist will follow up \
             within one business day with a full proposal.",
            message
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_reply_varies_by_role_only() {
        let roles = [Role::General, Role::Business, Role::Developer, Role::Premium];

        let replies: HashSet<String> = roles
            .iter()
            .map(|role| canned_reply(*role, "seo"))
            .collect();

        assert_eq!(replies.len(), roles.len());
    }

    #[test]
    fn test_reply_echoes_the_message() {
        let reply = canned_reply(Role::Developer, "webhooks");
        assert!(reply.contains("webhooks"));
    }
}
