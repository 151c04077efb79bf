//! Car field sets and the partial-update rules applied by `PATCH`.
//!
//! A full replacement ([`CarInput`]) overwrites every field. A partial update
//! ([`CarPatch`]) follows per-field presence rules:
//!
//! - `brand`, `model`, `color`: applied only when present **and** non-empty.
//!   An empty string means "not supplied", never "clear this field".
//! - `year`, `price`: applied whenever present, including zero.
//! - `owner_id`: applied when present; the caller must have resolved it first.
//!
//! Prices must fit the `NUMERIC(12,2)` column: at most two fractional digits
//! and an absolute value below [`PRICE_LIMIT`]. Anything else is rejected
//! rather than rounded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of fractional digits a stored price keeps.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive bound on the absolute price (ten integer digits).
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Reject prices the storage column would round or overflow.
///
/// Trailing zeros are not significant: `19999.990` is accepted as `19999.99`.
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price.normalize().scale() > PRICE_SCALE {
        return Err(CoreError::Validation(format!(
            "price {price} has more than {PRICE_SCALE} decimal places"
        )));
    }
    if price.abs() >= PRICE_LIMIT {
        return Err(CoreError::Validation(format!(
            "price {price} must be below {PRICE_LIMIT}"
        )));
    }
    Ok(())
}

/// The mutable, owner-independent columns of a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarFields {
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: i32,
    pub price: Decimal,
}

/// Body of `POST /cars` and `PUT /cars/{id}`. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CarInput {
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: i32,
    pub price: Decimal,
    pub owner_id: DbId,
}

impl CarInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_price(self.price)
    }

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

/// Body of `PATCH /cars/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarPatch {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub year: Option<i32>,
    pub price: Option<Decimal>,
    pub owner_id: Option<DbId>,
}

impl CarPatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.price.map_or(Ok(()), validate_price)
    }

    /// Compute the field set that results from applying this patch to `current`.
    ///
    /// `current` is left untouched; the caller commits the returned value in a
    /// single write.
    pub fn apply(&self, current: &CarFields) -> CarFields {
        CarFields {
            brand: pick_text(&self.brand, &current.brand),
            model: pick_text(&self.model, &current.model),
            color: pick_text(&self.color, &current.color),
            year: self.year.unwrap_or(current.year),
            price: self.price.unwrap_or(current.price),
        }
    }

    /// Resulting owner id: the supplied one, or `current_owner` when absent.
    pub fn owner_or(&self, current_owner: DbId) -> DbId {
        self.owner_id.unwrap_or(current_owner)
    }
}

fn pick_text(supplied: &Option<String>, current: &str) -> String {
    match supplied.as_deref() {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => current.to_string(),
    }
}
