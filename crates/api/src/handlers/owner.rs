//! Handlers for the `/owners` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cardb_core::error::CoreError;
use cardb_core::types::DbId;
use cardb_db::models::owner::{Owner, OwnerInput, OwnerWithCars};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireAccount, RequireAdmin};
use crate::services::owners::OwnerService;
use crate::state::AppState;

/// POST /api/v1/owners
pub async fn create(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
    AppJson(input): AppJson<OwnerInput>,
) -> AppResult<(StatusCode, Json<Owner>)> {
    validate_names(&input)?;
    let owner = OwnerService::create(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(owner)))
}

/// GET /api/v1/owners
pub async fn list(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OwnerWithCars>>> {
    let owners = OwnerService::list(state.store.as_ref()).await?;
    Ok(Json(owners))
}

/// GET /api/v1/owners/{id}
pub async fn get_by_id(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<OwnerWithCars>> {
    let owner = OwnerService::get(state.store.as_ref(), id).await?;
    Ok(Json(owner))
}

/// PUT /api/v1/owners/{id}
pub async fn replace(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<OwnerInput>,
) -> AppResult<StatusCode> {
    validate_names(&input)?;
    OwnerService::replace(state.store.as_ref(), id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/owners/{id}
///
/// Admin only. Returns 409 while the owner still owns cars.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    OwnerService::delete(state.store.as_ref(), id).await?;
    tracing::info!(admin = %admin.username, owner_id = id, "Owner removed by admin");
    Ok(StatusCode::NO_CONTENT)
}

fn validate_names(input: &OwnerInput) -> AppResult<()> {
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "first_name and last_name must not be empty".into(),
        )));
    }
    Ok(())
}
