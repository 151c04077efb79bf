//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects callers whose role is not in
//! the route's role set. Membership is exact; `ADMIN` does not imply `USER`
//! unless the set names both.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cardb_core::error::CoreError;
use cardb_core::roles::{authorize, ADMIN_ONLY, ANY_ACCOUNT};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `ADMIN` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !authorize(user.role, ADMIN_ONLY) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `USER` or `ADMIN`.
pub struct RequireAccount(pub AuthUser);

impl FromRequestParts<AppState> for RequireAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !authorize(user.role, ANY_ACCOUNT) {
            return Err(AppError::Core(CoreError::Forbidden(
                "User or Admin role required".into(),
            )));
        }
        Ok(RequireAccount(user))
    }
}
