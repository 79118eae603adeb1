//! Request extractors: key validation and metadata capture

mod auth;
mod context;

pub use auth::{OptionalApiKey, RequireApiKey};
pub use context::RequestContext;
