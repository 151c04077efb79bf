//! Account roles and role-set authorization.
//!
//! The role model is flat: an account holds exactly one role and a route is
//! allowed only when that role is a member of the route's declared set. There
//! is no inheritance between roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Stored/serialized name of [`Role::User`]. Must match the `accounts.role` check constraint.
pub const ROLE_USER: &str = "USER";
/// Stored/serialized name of [`Role::Admin`].
pub const ROLE_ADMIN: &str = "ADMIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// Routes open to every registered account.
pub const ANY_ACCOUNT: &[Role] = &[Role::User, Role::Admin];

/// Routes restricted to administrators.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Exact, case-sensitive match against the stored names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Internal(format!("Unknown role '{other}'"))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Allow iff `role` is one of `required`.
pub fn authorize(role: Role, required: &[Role]) -> bool {
    required.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_not_implicitly_a_user() {
        assert!(!authorize(Role::Admin, &[Role::User]));
        assert!(authorize(Role::User, &[Role::User]));
    }

    #[test]
    fn user_denied_admin_only() {
        assert!(!authorize(Role::User, ADMIN_ONLY));
        assert!(authorize(Role::Admin, ADMIN_ONLY));
    }

    #[test]
    fn any_account_admits_both() {
        assert!(authorize(Role::User, ANY_ACCOUNT));
        assert!(authorize(Role::Admin, ANY_ACCOUNT));
    }

    #[test]
    fn empty_set_denies_everyone() {
        assert!(!authorize(Role::Admin, &[]));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("admin".parse::<Role>().is_err());
        assert!("ROOT".parse::<Role>().is_err());
    }

    #[test]
    fn try_from_string_rejects_unknown_names() {
        assert_eq!(Role::try_from("USER".to_string()).unwrap(), Role::User);
        assert!(Role::try_from("SUPERUSER".to_string()).is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
