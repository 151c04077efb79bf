//! Car entity model and read shapes.

use cardb_core::car::CarFields;
use cardb_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::owner::{Owner, OwnerRef};

/// A car row from the `cars` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Car {
    pub id: DbId,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: i32,
    pub price: Decimal,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Car {
    pub fn fields(&self) -> CarFields {
        CarFields {
            brand: self.brand.clone(),
            model: self.model.clone(),
            color: self.color.clone(),
            year: self.year,
            price: self.price,
        }
    }
}

/// Car without its owner, as listed under an owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarSummary {
    pub id: DbId,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: i32,
    pub price: Decimal,
}

impl From<&Car> for CarSummary {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id,
            brand: car.brand.clone(),
            model: car.model.clone(),
            color: car.color.clone(),
            year: car.year,
            price: car.price,
        }
    }
}

impl From<&CarWithOwner> for CarSummary {
    fn from(car: &CarWithOwner) -> Self {
        Self {
            id: car.id,
            brand: car.brand.clone(),
            model: car.model.clone(),
            color: car.color.clone(),
            year: car.year,
            price: car.price,
        }
    }
}

/// Denormalized car read shape: the car plus its owner's identity and name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarWithOwner {
    pub id: DbId,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: i32,
    pub price: Decimal,
    pub owner: OwnerRef,
}

impl CarWithOwner {
    pub fn new(car: &Car, owner: &Owner) -> Self {
        Self {
            id: car.id,
            brand: car.brand.clone(),
            model: car.model.clone(),
            color: car.color.clone(),
            year: car.year,
            price: car.price,
            owner: OwnerRef::from(owner),
        }
    }
}

/// Flat join row used by the Postgres repository to build [`CarWithOwner`].
#[derive(Debug, Clone, FromRow)]
pub struct CarOwnerRow {
    pub id: DbId,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: i32,
    pub price: Decimal,
    pub owner_id: DbId,
    pub owner_first_name: String,
    pub owner_last_name: String,
}

impl From<CarOwnerRow> for CarWithOwner {
    fn from(row: CarOwnerRow) -> Self {
        Self {
            id: row.id,
            brand: row.brand,
            model: row.model,
            color: row.color,
            year: row.year,
            price: row.price,
            owner: OwnerRef {
                id: row.owner_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
            },
        }
    }
}
