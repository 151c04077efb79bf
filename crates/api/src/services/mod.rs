//! Business operations behind the HTTP handlers.
//!
//! - [`credentials::CredentialService`] -- registration, login, token checks.
//! - [`cars::CarService`] -- car reads and the replace/patch update rules.
//! - [`owners::OwnerService`] -- owner CRUD with restricted deletion.
//! - [`admin::AdminService`] -- account listing, deletion and statistics.

pub mod admin;
pub mod cars;
pub mod credentials;
pub mod owners;
