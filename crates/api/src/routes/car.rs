//! Route definitions for the `/cars` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::car;
use crate::state::AppState;

/// Routes mounted at `/cars`. All require `USER` or `ADMIN`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /brand/{brand}  -> list_by_brand
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> replace
/// PATCH  /{id}           -> patch
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(car::list).post(car::create))
        .route("/brand/{brand}", get(car::list_by_brand))
        .route(
            "/{id}",
            get(car::get_by_id)
                .put(car::replace)
                .patch(car::patch)
                .delete(car::delete),
        )
}
