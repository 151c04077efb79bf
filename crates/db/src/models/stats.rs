//! Aggregate counts for the admin statistics view.

use serde::Serialize;
use sqlx::FromRow;

/// Number of cars sharing a brand.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_cars: i64,
    pub total_owners: i64,
    pub total_users: i64,
    pub cars_by_brand: Vec<BrandCount>,
}
