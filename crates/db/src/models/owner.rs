//! Owner entity model and DTOs.

use cardb_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::car::CarSummary;

/// An owner row from the `owners` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Owner {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing an owner.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerInput {
    pub first_name: String,
    pub last_name: String,
}

/// Owner identity embedded in car read shapes. Never carries the owner's cars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerRef {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Owner> for OwnerRef {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id,
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
        }
    }
}

/// Owner read shape with its cars. Cars carry no owner back-reference.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerWithCars {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub cars: Vec<CarSummary>,
}

impl OwnerWithCars {
    pub fn new(owner: &Owner, cars: Vec<CarSummary>) -> Self {
        Self {
            id: owner.id,
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            cars,
        }
    }
}
