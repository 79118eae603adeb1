//! Per-request metadata capture
//!
//! Latency is measured from the moment the context is captured (the first
//! extractor run for the request) to the moment the handler finalizes its
//! response, in whole milliseconds.

use std::time::Instant;

use axum::http::{HeaderMap, Method, StatusCode, Uri, request::Parts};
use uuid::Uuid;

use crate::domain::usage::UsageLogEntry;
use crate::domain::Identity;
use crate::infrastructure::usage::UsageRecorder;

/// Request metadata needed to build a usage log entry.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub started: Instant,
    pub method: String,
    pub path: String,
    pub origin: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Capture metadata from request parts, reusing an already-captured
    /// context so `started` stays anchored to the first extractor run.
    pub fn capture(parts: &mut Parts) -> Self {
        if let Some(existing) = parts.extensions.get::<RequestContext>() {
            return existing.clone();
        }

        let ctx = Self::from_request_meta(&parts.method, &parts.uri, &parts.headers);
        parts.extensions.insert(ctx.clone());
        ctx
    }

    fn from_request_meta(method: &Method, uri: &Uri, headers: &HeaderMap) -> Self {
        Self {
            started: Instant::now(),
            method: method.to_string(),
            path: uri.path().to_string(),
            origin: caller_origin(headers),
            user_agent: headers
                .get(axum::http::header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string()),
        }
    }

    /// Entry for a call that completed with a resolved identity.
    pub fn entry(&self, identity: &Identity, status: StatusCode) -> UsageLogEntry {
        UsageLogEntry::new(&identity.api_key, &self.path, &self.method, status.as_u16())
            .with_identity(identity.id)
            .with_latency_ms(self.elapsed_ms())
            .with_origin(self.origin.clone())
            .with_user_agent(self.user_agent.clone())
    }

    /// Entry for a call rejected at the validation stage.
    pub fn rejection_entry(
        &self,
        identity_id: Option<Uuid>,
        api_key: &str,
        status: StatusCode,
    ) -> UsageLogEntry {
        let mut entry = UsageLogEntry::new(api_key, &self.path, &self.method, status.as_u16())
            .with_latency_ms(self.elapsed_ms())
            .with_origin(self.origin.clone())
            .with_user_agent(self.user_agent.clone());

        if let Some(id) = identity_id {
            entry = entry.with_identity(id);
        }

        entry
    }

    /// Dispatch the completion entry for a charged call.
    pub fn finish(&self, recorder: &UsageRecorder, identity: &Identity, status: StatusCode) {
        recorder.record(self.entry(identity, status));
    }

    /// Dispatch a completion entry only when the call was accounted.
    pub fn finish_optional(
        &self,
        recorder: &UsageRecorder,
        identity: Option<&Identity>,
        status: StatusCode,
    ) {
        if let Some(identity) = identity {
            self.finish(recorder, identity, status);
        }
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl<S: Send + Sync> axum::extract::FromRequestParts<S> for RequestContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::capture(parts))
    }
}

/// Caller network origin from proxy headers; the first `x-forwarded-for`
/// hop wins, then `x-real-ip`.
pub fn caller_origin(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();

                if !first.is_empty() {
                    return Some(first.to_string());
                }
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
