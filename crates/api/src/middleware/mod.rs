//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a Bearer session token.
//! - [`rbac::RequireAdmin`] -- Requires the `ADMIN` role.
//! - [`rbac::RequireAccount`] -- Requires `USER` or `ADMIN`.

pub mod auth;
pub mod rbac;
