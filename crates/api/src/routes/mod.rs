pub mod admin;
pub mod auth;
pub mod car;
pub mod health;
pub mod owner;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
///
/// /cars                          list, create (USER, ADMIN)
/// /cars/brand/{brand}            search by brand (USER, ADMIN)
/// /cars/{id}                     get, replace, patch, delete (USER, ADMIN)
///
/// /owners                        list, create (USER, ADMIN)
/// /owners/{id}                   get, replace (USER, ADMIN); delete (ADMIN)
///
/// /admin/users                   list (ADMIN)
/// /admin/users/{id}              delete (ADMIN)
/// /admin/stats                   statistics (ADMIN)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/cars", car::router())
        .nest("/owners", owner::router())
        .nest("/admin", admin::router())
}
