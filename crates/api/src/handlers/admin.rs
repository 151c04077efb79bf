//! Handlers for the `/admin` resource. Every route requires `ADMIN`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cardb_core::types::DbId;
use cardb_db::models::account::AccountSummary;
use cardb_db::models::stats::Stats;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::middleware::rbac::RequireAdmin;
use crate::services::admin::AdminService;
use crate::state::AppState;

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AccountSummary>>> {
    let accounts = AdminService::list_accounts(state.store.as_ref()).await?;
    Ok(Json(accounts))
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    AdminService::delete_account(state.store.as_ref(), id).await?;
    tracing::info!(admin = %admin.username, account_id = id, "Account removed by admin");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Stats>> {
    let stats = AdminService::stats(state.store.as_ref()).await?;
    Ok(Json(stats))
}
