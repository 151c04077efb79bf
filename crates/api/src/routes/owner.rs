//! Route definitions for the `/owners` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::owner;
use crate::state::AppState;

/// Routes mounted at `/owners`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> replace
/// DELETE /{id}  -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(owner::list).post(owner::create))
        .route(
            "/{id}",
            get(owner::get_by_id)
                .put(owner::replace)
                .delete(owner::delete),
        )
}
