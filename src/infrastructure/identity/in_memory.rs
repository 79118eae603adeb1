//! In-memory identity repository implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::identity::{Admission, Identity, IdentityRepository};
use crate::domain::DomainError;

/// Thread-safe in-memory implementation of [`IdentityRepository`].
///
/// Useful for testing and development. The write lock makes the
/// check-and-increment atomic, matching the conditional-update guarantee of
/// the PostgreSQL backend.
#[derive(Debug, Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<HashMap<String, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identities(identities: Vec<Identity>) -> Self {
        let repository = Self::new();
        {
            let mut map = repository
                .identities
                .write()
                .expect("identity lock poisoned");

            for identity in identities {
                map.insert(identity.api_key.clone(), identity);
            }
        }
        repository
    }

    pub fn insert(&self, identity: Identity) {
        self.identities
            .write()
            .expect("identity lock poisoned")
            .insert(identity.api_key.clone(), identity);
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn admit(&self, api_key: &str) -> Result<Admission, DomainError> {
        let mut identities = self.identities.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let Some(identity) = identities.get_mut(api_key) else {
            return Ok(Admission::UnknownKey);
        };

        if !identity.has_quota_remaining() {
            return Ok(Admission::LimitExceeded(identity.clone()));
        }

        let admitted = identity.clone();
        identity.usage_count += 1;

        Ok(Admission::Admitted(admitted))
    }

    async fn get_by_key(&self, api_key: &str) -> Result<Option<Identity>, DomainError> {
        let identities = self.identities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(identities.get(api_key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Role;

    fn repo_with(identity: Identity) -> InMemoryIdentityRepository {
        InMemoryIdentityRepository::with_identities(vec![identity])
    }

    #[tokio::test]
    async fn test_admit_unknown_key() {
        let repo = InMemoryIdentityRepository::new();
        let admission = repo.admit("no-such-key").await.unwrap();
        assert_eq!(admission, Admission::UnknownKey);
    }

    #[tokio::test]
    async fn test_admit_increments_by_exactly_one() {
        let identity = Identity::new("ak_live_1", Role::Business, 10).with_usage_count(3);
        let repo = repo_with(identity);

        let admission = repo.admit("ak_live_1").await.unwrap();
        let Admission::Admitted(admitted) = admission else {
            panic!("expected admission");
        };

        // the returned snapshot carries the pre-charge counter
        assert_eq!(admitted.usage_count, 3);

        let stored = repo.get_by_key("ak_live_1").await.unwrap().unwrap();
        assert_eq!(stored.usage_count, 4);
    }

    #[tokio::test]
    async fn test_exhausted_quota_rejects_without_charging() {
        let identity = Identity::new("ak_live_1", Role::General, 5).with_usage_count(5);
        let repo = repo_with(identity);

        let admission = repo.admit("ak_live_1").await.unwrap();
        assert!(matches!(admission, Admission::LimitExceeded(_)));

        let stored = repo.get_by_key("ak_live_1").await.unwrap().unwrap();
        assert_eq!(stored.usage_count, 5);
    }

    #[tokio::test]
    async fn test_counter_may_reach_but_never_exceed_limit() {
        let identity = Identity::new("ak_live_1", Role::General, 2);
        let repo = repo_with(identity);

        assert!(matches!(
            repo.admit("ak_live_1").await.unwrap(),
            Admission::Admitted(_)
        ));
        assert!(matches!(
            repo.admit("ak_live_1").await.unwrap(),
            Admission::Admitted(_)
        ));
        assert!(matches!(
            repo.admit("ak_live_1").await.unwrap(),
            Admission::LimitExceeded(_)
        ));

        let stored = repo.get_by_key("ak_live_1").await.unwrap().unwrap();
        assert_eq!(stored.usage_count, 2);
    }

    #[tokio::test]
    async fn test_concurrent_admissions_admit_exactly_remaining_quota() {
        let identity = Identity::new("ak_live_1", Role::Premium, 25).with_usage_count(20);
        let repo = Arc::new(repo_with(identity));

        let mut handles = Vec::new();

        for _ in 0..20 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.admit("ak_live_1").await.unwrap()
            }));
        }

        let mut admitted = 0;
        let mut rejected = 0;

        for handle in handles {
            match handle.await.unwrap() {
                Admission::Admitted(_) => admitted += 1,
                Admission::LimitExceeded(_) => rejected += 1,
                Admission::UnknownKey => panic!("key exists"),
            }
        }

        assert_eq!(admitted, 5);
        assert_eq!(rejected, 15);

        let stored = repo.get_by_key("ak_live_1").await.unwrap().unwrap();
        assert_eq!(stored.usage_count, 25);
    }
}
