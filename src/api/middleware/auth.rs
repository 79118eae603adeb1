//! API key validation extractors
//!
//! Admission order is fixed: the counter is charged before any resource
//! logic runs, so a request that fails downstream (bad role, bad body,
//! store error) has still consumed quota. Rejections at this stage are
//! themselves logged, tagged with their outcome status.

use axum::http::{HeaderMap, StatusCode, request::Parts};
use tracing::{debug, warn};

use super::context::RequestContext;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::identity::{Admission, Identity};

/// Extractor that requires a valid API key in the `x-api-key` header.
///
/// Validation charges one unit of quota; the wrapped identity carries the
/// counter as it stood before the charge.
#[derive(Debug, Clone)]
pub struct RequireApiKey(pub Identity);

impl axum::extract::FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::capture(parts);

        let Some(api_key) = api_key_from_headers(&parts.headers)? else {
            return Err(ApiError::unauthorized("API key is required"));
        };

        let identity = validate_and_charge(state, &ctx, &api_key).await?;
        parts.extensions.insert(identity.clone());

        Ok(RequireApiKey(identity))
    }
}

/// Extractor for endpoints that work anonymously but must account any key
/// that is presented.
///
/// No header passes through as `None`; a present key escalates the request
/// to "must be valid" and a failed validation fails the whole request even
/// though the anonymous path would have succeeded.
#[derive(Debug, Clone)]
pub struct OptionalApiKey(pub Option<Identity>);

impl axum::extract::FromRequestParts<AppState> for OptionalApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::capture(parts);

        let Some(api_key) = api_key_from_headers(&parts.headers)? else {
            return Ok(OptionalApiKey(None));
        };

        let identity = validate_and_charge(state, &ctx, &api_key).await?;
        parts.extensions.insert(identity.clone());

        Ok(OptionalApiKey(Some(identity)))
    }
}

/// Read the `x-api-key` header; an empty or missing value is absent.
fn api_key_from_headers(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    let Some(value) = headers.get("x-api-key") else {
        return Ok(None);
    };

    let key = value
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid x-api-key header encoding"))?
        .trim();

    if key.is_empty() {
        return Ok(None);
    }

    Ok(Some(key.to_string()))
}

async fn validate_and_charge(
    state: &AppState,
    ctx: &RequestContext,
    api_key: &str,
) -> Result<Identity, ApiError> {
    debug!(
        key_prefix = %api_key.chars().take(8).collect::<String>(),
        "Validating API key"
    );

    match state.identities.admit(api_key).await {
        Ok(Admission::Admitted(identity)) => Ok(identity),
        Ok(Admission::UnknownKey) => {
            state
                .usage
                .record(ctx.rejection_entry(None, api_key, StatusCode::UNAUTHORIZED));

            Err(ApiError::unauthorized("Invalid API key"))
        }
        Ok(Admission::LimitExceeded(identity)) => {
            state.usage.record(ctx.rejection_entry(
                Some(identity.id),
                api_key,
                StatusCode::TOO_MANY_REQUESTS,
            ));

            Err(ApiError::rate_limited("API call limit exceeded"))
        }
        Err(err) => {
            // a lookup failure must look exactly like an unknown key
            warn!(error = %err, "Identity lookup failed; rejecting presented key");

            state
                .usage
                .record(ctx.rejection_entry(None, api_key, StatusCode::UNAUTHORIZED));

            Err(ApiError::unauthorized("Invalid API key"))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    use super::*;
    use crate::api::state::testing::{test_state, wait_for_usage_entries};
    use crate::api::types::ErrorCode;
    use crate::domain::identity::IdentityRepository;
    use crate::domain::{Identity, Role};

    fn request_parts(key: Option<&str>) -> Parts {
        let mut builder = Request::builder().method("GET").uri("/api/v1/quotes");

        if let Some(key) = key {
            builder = builder.header("x-api-key", key);
        }

        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_missing_key_is_unauthenticated() {
        let fixture = test_state();
        let mut parts = request_parts(None);

        let err = RequireApiKey::from_request_parts(&mut parts, &fixture.state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.body.error, "API key is required");
        assert_eq!(err.body.code, Some(ErrorCode::Unauthenticated));
    }

    #[tokio::test]
    async fn test_unknown_key_is_unauthenticated_and_logged() {
        let fixture = test_state();
        let mut parts = request_parts(Some("bogus-key"));

        let err = RequireApiKey::from_request_parts(&mut parts, &fixture.state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.body.error, "Invalid API key");

        wait_for_usage_entries(&fixture.usage_log, 1).await;

        let entries = fixture.usage_log.entries();
        assert_eq!(entries[0].status, 401);
        assert_eq!(entries[0].api_key, "bogus-key");
        assert!(entries[0].identity_id.is_none());
    }

    #[tokio::test]
    async fn test_exhausted_quota_is_rejected_without_charge() {
        let fixture = test_state();
        let identity = Identity::new("ak_live_1", Role::Business, 5).with_usage_count(5);
        let identity_id = identity.id;
        fixture.identities.insert(identity);

        let mut parts = request_parts(Some("ak_live_1"));

        let err = RequireApiKey::from_request_parts(&mut parts, &fixture.state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.body.error, "API call limit exceeded");
        assert_eq!(err.body.code, Some(ErrorCode::RateLimitExceeded));

        let stored = fixture.identities.get_by_key("ak_live_1").await.unwrap().unwrap();
        assert_eq!(stored.usage_count, 5);

        wait_for_usage_entries(&fixture.usage_log, 1).await;
        assert_eq!(fixture.usage_log.entries()[0].identity_id, Some(identity_id));
        assert_eq!(fixture.usage_log.entries()[0].status, 429);
    }

    #[tokio::test]
    async fn test_valid_key_charges_quota_before_the_handler_runs() {
        let fixture = test_state();
        fixture
            .identities
            .insert(Identity::new("ak_live_1", Role::Developer, 10).with_usage_count(3));

        let mut parts = request_parts(Some("ak_live_1"));

        let RequireApiKey(identity) = RequireApiKey::from_request_parts(&mut parts, &fixture.state)
            .await
            .unwrap();

        assert_eq!(identity.role, Role::Developer);
        // the wrapped identity reports the pre-charge counter
        assert_eq!(identity.usage_count, 3);

        let stored = fixture.identities.get_by_key("ak_live_1").await.unwrap().unwrap();
        assert_eq!(stored.usage_count, 4);
    }

    #[tokio::test]
    async fn test_optional_key_absent_passes_through_anonymous() {
        let fixture = test_state();
        let mut parts = request_parts(None);

        let OptionalApiKey(identity) = OptionalApiKey::from_request_parts(&mut parts, &fixture.state)
            .await
            .unwrap();

        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_optional_key_present_must_be_valid() {
        let fixture = test_state();
        let mut parts = request_parts(Some("bogus-key"));

        let err = OptionalApiKey::from_request_parts(&mut parts, &fixture.state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_extract_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "ak_live_67890".parse().unwrap());

        let result = api_key_from_headers(&headers).unwrap();
        assert_eq!(result.as_deref(), Some("ak_live_67890"));
    }

    #[test]
    fn test_missing_header_is_absent() {
        let result = api_key_from_headers(&HeaderMap::new()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "   ".parse().unwrap());

        let result = api_key_from_headers(&headers).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_key_is_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "  ak_live_1  ".parse().unwrap());

        let result = api_key_from_headers(&headers).unwrap();
        assert_eq!(result.as_deref(), Some("ak_live_1"));
    }
}
