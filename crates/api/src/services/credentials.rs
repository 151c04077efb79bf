//! Account registration, login, and session-token checks.

use std::sync::Arc;

use cardb_core::error::CoreError;
use cardb_core::roles::{self, Role};
use cardb_core::types::Timestamp;
use cardb_db::models::account::{Account, CreateAccount};
use cardb_db::store::Store;
use cardb_db::StoreError;

use crate::auth::jwt::{self, Claims, IssuedToken, JwtConfig};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};

/// Issues and checks credentials against the account store.
///
/// The signing key arrives through [`JwtConfig`] at construction and is
/// read-only afterwards.
pub struct CredentialService {
    store: Arc<dyn Store>,
    jwt: JwtConfig,
    password_min_length: usize,
}

impl CredentialService {
    pub fn new(store: Arc<dyn Store>, jwt: JwtConfig, password_min_length: usize) -> Self {
        Self {
            store,
            jwt,
            password_min_length,
        }
    }

    /// Self-registration. The account always gets [`Role::User`].
    pub async fn register(&self, username: &str, password: &str) -> AppResult<Account> {
        validate_password_strength(password, self.password_min_length)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
        let account = self.provision(username, password, Role::User).await?;
        tracing::info!(username = %account.username, "Account registered");
        Ok(account)
    }

    /// Create an account with an explicit role.
    ///
    /// Not reachable over HTTP; used by the startup bootstrap.
    pub async fn provision(&self, username: &str, password: &str, role: Role) -> AppResult<Account> {
        if self.store.username_exists(username).await? {
            return Err(CoreError::DuplicateUsername(username.to_string()).into());
        }

        let password_hash = hash_blocking(password.to_string()).await?;
        let input = CreateAccount {
            username: username.to_string(),
            password_hash,
            role,
        };

        // A concurrent registration can pass the existence check; the unique
        // constraint still rejects it.
        self.store
            .create_account(&input)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => {
                    CoreError::DuplicateUsername(username.to_string()).into()
                }
                other => AppError::Store(other),
            })
    }

    /// Check a username/password pair and issue a session token.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// [`CoreError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<IssuedToken> {
        let Some(account) = self.store.find_account_by_username(username).await? else {
            tracing::debug!("Login rejected");
            return Err(CoreError::InvalidCredentials.into());
        };

        let valid = verify_blocking(password.to_string(), account.password_hash.clone()).await?;
        if !valid {
            tracing::debug!("Login rejected");
            return Err(CoreError::InvalidCredentials.into());
        }

        let role = account.role;
        let issued = jwt::generate_token(&account.username, role, &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
        tracing::info!(username = %account.username, role = %role, "Session token issued");
        Ok(issued)
    }

    /// Claims of a valid token, or `None` for any validation failure.
    pub fn validate_token(&self, token: &str) -> Option<Claims> {
        jwt::validate_token(token, &self.jwt)
    }

    /// [`Self::validate_token`] evaluated at `now`.
    pub fn validate_token_at(&self, token: &str, now: Timestamp) -> Option<Claims> {
        jwt::validate_token_at(token, &self.jwt, now)
    }

    /// Exact role-set membership; no role inherits another's permissions.
    pub fn authorize(claims: &Claims, required: &[Role]) -> bool {
        roles::authorize(claims.role, required)
    }
}

/// Argon2 is deliberately slow; keep it off the async workers.
async fn hash_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

async fn verify_blocking(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Verification task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}
