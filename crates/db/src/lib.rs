//! Persistence layer: row models, Postgres repositories, and the [`store::Store`]
//! seam the HTTP layer talks to.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors surfaced by [`store::Store`] implementations.
///
/// Constraint violations are lifted out of the driver error so callers can
/// react to them without inspecting SQLSTATE codes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint (e.g. `uq_accounts_username`) rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint (e.g. `fk_cars_owner_id`) rejected the write.
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => {
                    tracing::debug!(%constraint, "Unique constraint rejected write");
                    return StoreError::UniqueViolation(constraint);
                }
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    tracing::debug!(%constraint, "Foreign key constraint rejected write");
                    return StoreError::ForeignKeyViolation(constraint);
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
