//! Repository for the `cars` table.

use cardb_core::car::CarFields;
use cardb_core::types::DbId;
use sqlx::PgPool;

use crate::models::car::{Car, CarOwnerRow, CarWithOwner};
use crate::models::stats::BrandCount;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, brand, model, color, year, price, owner_id, created_at, updated_at";

/// Select list for the car + owner join, aliased to [`CarOwnerRow`].
const JOINED: &str = "c.id, c.brand, c.model, c.color, c.year, c.price, c.owner_id, \
                      o.first_name AS owner_first_name, o.last_name AS owner_last_name \
                      FROM cars c JOIN owners o ON o.id = c.owner_id";

/// Provides CRUD operations for cars.
pub struct CarRepo;

impl CarRepo {
    /// Insert a new car, returning the created row.
    ///
    /// An unresolvable `owner_id` violates `fk_cars_owner_id`.
    pub async fn create(
        pool: &PgPool,
        fields: &CarFields,
        owner_id: DbId,
    ) -> Result<Car, sqlx::Error> {
        let query = format!(
            "INSERT INTO cars (brand, model, color, year, price, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(&fields.brand)
            .bind(&fields.model)
            .bind(&fields.color)
            .bind(fields.year)
            .bind(fields.price)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE id = $1");
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a car joined with its owner's identity and name.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CarWithOwner>, sqlx::Error> {
        let query = format!("SELECT {JOINED} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CarOwnerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(CarWithOwner::from))
    }

    /// List all cars with their owners, ordered by id.
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<CarWithOwner>, sqlx::Error> {
        let query = format!("SELECT {JOINED} ORDER BY c.id");
        let rows = sqlx::query_as::<_, CarOwnerRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CarWithOwner::from).collect())
    }

    /// List cars of exactly this brand (case-sensitive) with their owners.
    pub async fn list_by_brand_with_owner(
        pool: &PgPool,
        brand: &str,
    ) -> Result<Vec<CarWithOwner>, sqlx::Error> {
        let query = format!("SELECT {JOINED} WHERE c.brand = $1 ORDER BY c.id");
        let rows = sqlx::query_as::<_, CarOwnerRow>(&query)
            .bind(brand)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CarWithOwner::from).collect())
    }

    /// List the cars of one owner, ordered by id.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE owner_id = $1 ORDER BY id");
        sqlx::query_as::<_, Car>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column in one statement.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &CarFields,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cars SET
                brand = $2,
                model = $3,
                color = $4,
                year = $5,
                price = $6,
                owner_id = $7,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&fields.brand)
        .bind(&fields.model)
        .bind(&fields.color)
        .bind(fields.year)
        .bind(fields.price)
        .bind(owner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a car. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Car counts grouped by brand, ordered by brand name.
    pub async fn count_by_brand(pool: &PgPool) -> Result<Vec<BrandCount>, sqlx::Error> {
        sqlx::query_as::<_, BrandCount>(
            "SELECT brand, COUNT(*) AS count FROM cars GROUP BY brand ORDER BY brand",
        )
        .fetch_all(pool)
        .await
    }
}
