//! Car reads and mutations.
//!
//! Every mutation checks the submitted price against the storage column and
//! resolves the target owner before anything is written, and
//! replace/patch commit the resulting field set in one store call, so a
//! rejected request leaves the car exactly as it was.

use cardb_core::car::{CarFields, CarInput, CarPatch};
use cardb_core::error::CoreError;
use cardb_core::types::DbId;
use cardb_db::models::car::CarWithOwner;
use cardb_db::store::Store;
use cardb_db::StoreError;

use crate::error::{AppError, AppResult};

const ENTITY: &str = "Car";

pub struct CarService;

impl CarService {
    pub async fn create(store: &dyn Store, input: &CarInput) -> AppResult<CarWithOwner> {
        input.validate()?;
        ensure_owner(store, input.owner_id).await?;

        let car = store
            .create_car(&input.fields(), input.owner_id)
            .await
            .map_err(|e| unknown_owner_on_fk(e, input.owner_id))?;
        tracing::info!(car_id = car.id, owner_id = car.owner_id, "Car created");

        Self::get(store, car.id).await
    }

    pub async fn get(store: &dyn Store, id: DbId) -> AppResult<CarWithOwner> {
        store
            .find_car_with_owner(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }

    pub async fn list(store: &dyn Store) -> AppResult<Vec<CarWithOwner>> {
        Ok(store.list_cars_with_owner().await?)
    }

    /// Exact, case-sensitive brand match. No matches is reported as not found.
    pub async fn list_by_brand(store: &dyn Store, brand: &str) -> AppResult<Vec<CarWithOwner>> {
        let cars = store.list_cars_by_brand(brand).await?;
        if cars.is_empty() {
            return Err(CoreError::NoMatch {
                entity: "cars",
                query: brand.to_string(),
            }
            .into());
        }
        Ok(cars)
    }

    /// Overwrite every field of an existing car.
    ///
    /// An invalid price is reported first, then a missing car, then an
    /// unknown owner.
    pub async fn replace(store: &dyn Store, id: DbId, input: &CarInput) -> AppResult<()> {
        input.validate()?;
        if store.find_car(id).await?.is_none() {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }
        ensure_owner(store, input.owner_id).await?;

        commit(store, id, &input.fields(), input.owner_id).await?;
        tracing::info!(car_id = id, "Car replaced");
        Ok(())
    }

    /// Apply the supplied fields; see [`CarPatch::apply`] for the presence rules.
    pub async fn patch(store: &dyn Store, id: DbId, patch: &CarPatch) -> AppResult<()> {
        patch.validate()?;
        let current = store
            .find_car(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

        if let Some(owner_id) = patch.owner_id {
            ensure_owner(store, owner_id).await?;
        }

        let fields = patch.apply(&current.fields());
        let owner_id = patch.owner_or(current.owner_id);
        commit(store, id, &fields, owner_id).await?;
        tracing::info!(car_id = id, "Car patched");
        Ok(())
    }

    pub async fn delete(store: &dyn Store, id: DbId) -> AppResult<()> {
        if !store.delete_car(id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }
        tracing::info!(car_id = id, "Car deleted");
        Ok(())
    }
}

async fn ensure_owner(store: &dyn Store, owner_id: DbId) -> AppResult<()> {
    if store.owner_exists(owner_id).await? {
        Ok(())
    } else {
        Err(CoreError::UnknownOwner(owner_id).into())
    }
}

async fn commit(store: &dyn Store, id: DbId, fields: &CarFields, owner_id: DbId) -> AppResult<()> {
    let updated = store
        .update_car(id, fields, owner_id)
        .await
        .map_err(|e| unknown_owner_on_fk(e, owner_id))?;
    if updated {
        Ok(())
    } else {
        // Deleted between the read and the write.
        Err(CoreError::NotFound { entity: ENTITY, id }.into())
    }
}

/// The owner can disappear between the existence check and the write; the
/// foreign key still catches it.
fn unknown_owner_on_fk(err: StoreError, owner_id: DbId) -> AppError {
    match err {
        StoreError::ForeignKeyViolation(_) => CoreError::UnknownOwner(owner_id).into(),
        other => AppError::Store(other),
    }
}
