//! Startup bootstrap of the first administrator.
//!
//! Self-registration only ever creates `USER` accounts, so the first `ADMIN`
//! has to come from configuration.

use cardb_core::error::CoreError;
use cardb_core::roles::Role;

use crate::error::{AppError, AppResult};
use crate::services::credentials::CredentialService;

/// Create the administrator account unless the username is already taken.
///
/// Returns `true` when a new account was created. An existing account with the
/// same username is left untouched, whatever its role.
pub async fn ensure_admin(
    credentials: &CredentialService,
    username: &str,
    password: &str,
) -> AppResult<bool> {
    match credentials.provision(username, password, Role::Admin).await {
        Ok(account) => {
            tracing::info!(username = %account.username, "Seed administrator created");
            Ok(true)
        }
        Err(AppError::Core(CoreError::DuplicateUsername(_))) => {
            tracing::debug!(username, "Seed administrator already present");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
