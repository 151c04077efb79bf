//! Repository for the `owners` table.

use cardb_core::types::DbId;
use sqlx::PgPool;

use crate::models::owner::{Owner, OwnerInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, created_at, updated_at";

/// Provides CRUD operations for owners.
pub struct OwnerRepo;

impl OwnerRepo {
    /// Insert a new owner, returning the created row.
    pub async fn create(pool: &PgPool, input: &OwnerInput) -> Result<Owner, sqlx::Error> {
        let query = format!(
            "INSERT INTO owners (first_name, last_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Owner>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners WHERE id = $1");
        sqlx::query_as::<_, Owner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Existence check used for referential validation of `cars.owner_id`.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM owners WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// List all owners ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners ORDER BY id");
        sqlx::query_as::<_, Owner>(&query).fetch_all(pool).await
    }

    /// Overwrite both name fields. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &OwnerInput,
    ) -> Result<Option<Owner>, sqlx::Error> {
        let query = format!(
            "UPDATE owners SET
                first_name = $2,
                last_name = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Owner>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM owners")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Permanently delete an owner. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation (`fk_cars_owner_id`) while cars
    /// still reference the owner.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
