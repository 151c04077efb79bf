//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require `ADMIN`.
///
/// ```text
/// GET    /users       -> list_users
/// DELETE /users/{id}  -> delete_user
/// GET    /stats       -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/stats", get(admin::stats))
}
