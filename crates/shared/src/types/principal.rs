//! The authenticated caller, as supplied by the identity collaborator.
//!
//! The engine never verifies identity itself; a `Principal` is trusted input
//! used only to stamp `owner_id` and `created_by` audit fields.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// An authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The caller's user ID.
    pub user_id: UserId,
}

impl Principal {
    /// Creates a principal for the given user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl From<UserId> for Principal {
    fn from(user_id: UserId) -> Self {
        Self::new(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_carries_user_id() {
        let user_id = UserId::new();
        let principal = Principal::new(user_id);
        assert_eq!(principal.user_id, user_id);
        assert_eq!(Principal::from(user_id), principal);
    }
}
