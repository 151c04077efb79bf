//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cardb_core::error::CoreError;
use cardb_core::roles::Role;
use cardb_db::models::account::AccountSummary;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
///
/// Password length is checked by the credential service against the
/// configured minimum.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a `USER` account. Returns 201 with the account summary.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AccountSummary>)> {
    validate(&input)?;
    let account = state
        .credentials
        .register(&input.username, &input.password)
        .await?;
    Ok((StatusCode::CREATED, Json(AccountSummary::from(&account))))
}

/// POST /api/v1/auth/login
///
/// Exchange username + password for a session token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Blank fields are treated as a failed login, not a validation error,
    // so the response never hints at which field was wrong.
    if input.validate().is_err() {
        return Err(CoreError::InvalidCredentials.into());
    }

    let issued = state
        .credentials
        .authenticate(&input.username, &input.password)
        .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        username: issued.claims.sub,
        role: issued.claims.role,
        expires_in: issued.claims.exp - issued.claims.iat,
    }))
}

fn validate(input: &impl Validate) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}
