//! Authorization policy.
//!
//! Endpoints declare an allow-list of roles; a caller is admitted when any
//! of its capabilities appears in that list.

use super::UserRole;

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Decide whether a caller holding `capabilities` may use an endpoint open to `allowed`.
pub fn authorize(capabilities: &[UserRole], allowed: &[UserRole]) -> Access {
    if capabilities.iter().any(|role| allowed.contains(role)) {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Endpoints open to administrators only
pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Endpoints open to regular users only
pub const USER_ONLY: &[UserRole] = &[UserRole::User];

/// Endpoints open to any authenticated role
pub const USER_OR_ADMIN: &[UserRole] = &[UserRole::User, UserRole::Admin];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_table() {
        let cases = [
            (&[UserRole::User][..], ADMIN_ONLY, Access::Deny),
            (&[UserRole::Admin][..], ADMIN_ONLY, Access::Allow),
            (&[UserRole::User][..], USER_ONLY, Access::Allow),
            (&[UserRole::Admin][..], USER_ONLY, Access::Deny),
            (&[UserRole::User][..], USER_OR_ADMIN, Access::Allow),
            (&[UserRole::Admin][..], USER_OR_ADMIN, Access::Allow),
        ];

        for (capabilities, allowed, expected) in cases {
            assert_eq!(authorize(capabilities, allowed), expected);
        }
    }

    #[test]
    fn empty_capabilities_are_denied() {
        assert_eq!(authorize(&[], USER_OR_ADMIN), Access::Deny);
    }

    #[test]
    fn empty_allow_list_denies_everyone() {
        assert!(!authorize(&[UserRole::Admin, UserRole::User], &[]).is_allowed());
    }
}
