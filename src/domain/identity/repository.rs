//! Identity repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::{Admission, Identity};
use crate::domain::DomainError;

/// Store of registered API consumers and their usage counters.
///
/// The usage counter is the only shared mutable state in the system;
/// implementations must make [`admit`](IdentityRepository::admit) a single
/// atomic check-and-increment so that concurrent calls against the same key
/// never admit more than the remaining quota.
#[async_trait]
pub trait IdentityRepository: Send + Sync + Debug {
    /// Admit one call for the identity holding `api_key`.
    ///
    /// On admission the counter is incremented by exactly one and the
    /// returned identity carries the pre-increment count. A rejected call
    /// leaves the counter untouched.
    async fn admit(&self, api_key: &str) -> Result<Admission, DomainError>;

    /// Look up an identity without charging it.
    async fn get_by_key(&self, api_key: &str) -> Result<Option<Identity>, DomainError>;
}
