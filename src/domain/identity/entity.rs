//! Identity entity and the role order behind access decisions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ListScope;

/// Access tier of a registered API consumer.
///
/// Roles form a total order; every role is comparable through its
/// [`rank`](Role::rank). Strings that do not name a known role resolve to
/// [`Role::General`], the most restrictive tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    General,
    Business,
    Developer,
    Premium,
}

impl Role {
    /// Integer rank in the total order: general < business < developer < premium.
    pub fn rank(self) -> u8 {
        match self {
            Self::General => 0,
            Self::Business => 1,
            Self::Developer => 2,
            Self::Premium => 3,
        }
    }

    /// Whether this role clears the weakest rank present in `allowed`.
    ///
    /// Membership in *any* of the allowed roles is sufficient, so the
    /// required rank is the minimum over the set. An empty set denies.
    /// Pure and total; never panics.
    pub fn permits(self, allowed: &[Role]) -> bool {
        allowed
            .iter()
            .map(|role| role.rank())
            .min()
            .is_some_and(|required| self.rank() >= required)
    }

    /// Parse a stored role string, falling back to the lowest tier for
    /// anything unrecognized.
    pub fn from_str_lossy(value: &str) -> Self {
        match value {
            "business" => Self::Business,
            "developer" => Self::Developer,
            "premium" => Self::Premium,
            _ => Self::General,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Business => "business",
            Self::Developer => "developer",
            Self::Premium => "premium",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resolved account behind a presented API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier.
    pub id: Uuid,
    /// Opaque bearer key, stored verbatim.
    pub api_key: String,
    /// Access tier.
    pub role: Role,
    /// Calls consumed in the current accounting period.
    ///
    /// On an admitted identity this is the value as it stood before the
    /// admission charge; it is informational and only used for logging.
    pub usage_count: u32,
    /// Calls allowed in the current accounting period.
    pub usage_limit: u32,
    /// Informational subscription state; not enforced by the gate.
    pub subscription_status: String,
}

impl Identity {
    pub fn new(api_key: impl Into<String>, role: Role, usage_limit: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            api_key: api_key.into(),
            role,
            usage_count: 0,
            usage_limit,
            subscription_status: "active".to_string(),
        }
    }

    pub fn with_usage_count(mut self, usage_count: u32) -> Self {
        self.usage_count = usage_count;
        self
    }

    pub fn with_subscription_status(mut self, status: impl Into<String>) -> Self {
        self.subscription_status = status.into();
        self
    }

    /// The admission condition: the counter may reach the limit, and the
    /// call that would exceed it is the one rejected.
    pub fn has_quota_remaining(&self) -> bool {
        self.usage_count < self.usage_limit
    }

    /// Row visibility for list endpoints: premium sees everything, every
    /// other tier only its own rows.
    pub fn visibility_scope(&self) -> ListScope {
        if self.role == Role::Premium {
            ListScope::All
        } else {
            ListScope::OwnedBy(self.id)
        }
    }
}

/// Outcome of presenting a key to the admission gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Key resolved and the call was charged; the identity carries the
    /// counter as it stood before this call's charge.
    Admitted(Identity),
    /// No identity holds this key.
    UnknownKey,
    /// The identity exists but its quota is exhausted; nothing was charged.
    LimitExceeded(Identity),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_rank_order() {
        assert!(Role::General.rank() < Role::Business.rank());
        assert!(Role::Business.rank() < Role::Developer.rank());
        assert!(Role::Developer.rank() < Role::Premium.rank());
    }

    #[test]
    fn test_permits_minimum_of_allowed_set() {
        let writers = [Role::Business, Role::Developer, Role::Premium];

        assert!(!Role::General.permits(&writers));
        assert!(Role::Business.permits(&writers));
        assert!(Role::Developer.permits(&writers));
        assert!(Role::Premium.permits(&writers));
    }

    #[test]
    fn test_permits_rank_at_least_weakest_qualifying() {
        // developer is not listed, but outranks business, so it passes
        let allowed = [Role::Business];
        assert!(Role::Developer.permits(&allowed));
        assert!(Role::Premium.permits(&allowed));
        assert!(!Role::General.permits(&allowed));
    }

    #[test]
    fn test_permits_empty_set_denies() {
        assert!(!Role::Premium.permits(&[]));
        assert!(!Role::General.permits(&[]));
    }

    #[test]
    fn test_permits_general_when_general_allowed() {
        assert!(Role::General.permits(&[Role::General]));
        assert!(Role::General.permits(&[Role::General, Role::Premium]));
    }

    #[test]
    fn test_unknown_role_fails_closed() {
        assert_eq!(Role::from_str_lossy("superuser"), Role::General);
        assert_eq!(Role::from_str_lossy(""), Role::General);
        assert_eq!(Role::from_str_lossy("premium"), Role::Premium);
        assert_eq!(Role::from_str_lossy("business"), Role::Business);
        assert_eq!(Role::from_str_lossy("developer"), Role::Developer);
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::General, Role::Business, Role::Developer, Role::Premium] {
            assert_eq!(Role::from_str_lossy(role.as_str()), role);
        }
    }

    #[test]
    fn test_quota_admission_condition() {
        let identity = Identity::new("ak_live_1", Role::General, 10);
        assert!(identity.has_quota_remaining());

        let exhausted = identity.with_usage_count(10);
        assert!(!exhausted.has_quota_remaining());
    }

    #[test]
    fn test_visibility_scope_by_role() {
        let premium = Identity::new("ak_live_p", Role::Premium, 100);
        assert_eq!(premium.visibility_scope(), ListScope::All);

        let business = Identity::new("ak_live_b", Role::Business, 100);
        assert_eq!(business.visibility_scope(), ListScope::OwnedBy(business.id));
    }
}
