//! Account entity model and DTOs.

use cardb_core::roles::Role;
use cardb_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`AccountSummary`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    /// Stored as `"USER"` or `"ADMIN"`; any other name fails the row decode.
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AccountSummary {
    pub id: DbId,
    pub username: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            role: account.role,
        }
    }
}

/// DTO for creating a new account. The hash is computed by the caller.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}
