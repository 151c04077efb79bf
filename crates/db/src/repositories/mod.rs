//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod car_repo;
pub mod owner_repo;

pub use account_repo::AccountRepo;
pub use car_repo::CarRepo;
pub use owner_repo::OwnerRepo;
