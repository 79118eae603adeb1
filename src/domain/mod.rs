//! Domain entities, access rules and repository contracts

pub mod booking;
pub mod catalog;
pub mod error;
pub mod identity;
pub mod quote;
pub mod submission;
pub mod usage;

pub use error::DomainError;
pub use identity::{Admission, Identity, Role};

use uuid::Uuid;

/// Visibility of a list endpoint's rows for a given caller.
///
/// Premium callers see every row; everyone else is narrowed to rows they
/// own. Anonymous rows (no owner) are only visible under [`ListScope::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// No ownership filter.
    All,
    /// Only rows owned by this identity.
    OwnedBy(Uuid),
}

impl ListScope {
    /// Whether a row with the given owner is visible under this scope.
    pub fn includes(&self, owner: Option<Uuid>) -> bool {
        match self {
            Self::All => true,
            Self::OwnedBy(id) => owner == Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_all_includes_everything() {
        assert!(ListScope::All.includes(None));
        assert!(ListScope::All.includes(Some(Uuid::new_v4())));
    }

    #[test]
    fn test_scope_owned_by_filters() {
        let me = Uuid::new_v4();
        let scope = ListScope::OwnedBy(me);

        assert!(scope.includes(Some(me)));
        assert!(!scope.includes(Some(Uuid::new_v4())));
        assert!(!scope.includes(None));
    }
}
