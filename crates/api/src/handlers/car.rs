//! Handlers for the `/cars` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cardb_core::car::{CarInput, CarPatch};
use cardb_core::types::DbId;
use cardb_db::models::car::CarWithOwner;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAccount;
use crate::services::cars::CarService;
use crate::state::AppState;

/// POST /api/v1/cars
pub async fn create(
    RequireAccount(user): RequireAccount,
    State(state): State<AppState>,
    AppJson(input): AppJson<CarInput>,
) -> AppResult<(StatusCode, Json<CarWithOwner>)> {
    let car = CarService::create(state.store.as_ref(), &input).await?;
    tracing::debug!(username = %user.username, car_id = car.id, "Car created via API");
    Ok((StatusCode::CREATED, Json(car)))
}

/// GET /api/v1/cars
pub async fn list(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CarWithOwner>>> {
    let cars = CarService::list(state.store.as_ref()).await?;
    Ok(Json(cars))
}

/// GET /api/v1/cars/brand/{brand}
pub async fn list_by_brand(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
    AppPath(brand): AppPath<String>,
) -> AppResult<Json<Vec<CarWithOwner>>> {
    let cars = CarService::list_by_brand(state.store.as_ref(), &brand).await?;
    Ok(Json(cars))
}

/// GET /api/v1/cars/{id}
pub async fn get_by_id(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<CarWithOwner>> {
    let car = CarService::get(state.store.as_ref(), id).await?;
    Ok(Json(car))
}

/// PUT /api/v1/cars/{id}
///
/// Full replacement; every field is required.
pub async fn replace(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CarInput>,
) -> AppResult<StatusCode> {
    CarService::replace(state.store.as_ref(), id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/cars/{id}
///
/// Partial update. Empty strings for `brand`/`model`/`color` are ignored.
pub async fn patch(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CarPatch>,
) -> AppResult<StatusCode> {
    CarService::patch(state.store.as_ref(), id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cars/{id}
pub async fn delete(
    RequireAccount(_user): RequireAccount,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    CarService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
