//! Owner management.

use std::collections::BTreeMap;

use cardb_core::error::CoreError;
use cardb_core::types::DbId;
use cardb_db::models::car::CarSummary;
use cardb_db::models::owner::{Owner, OwnerInput, OwnerWithCars};
use cardb_db::store::Store;
use cardb_db::StoreError;

use crate::error::{AppError, AppResult};

const ENTITY: &str = "Owner";

pub struct OwnerService;

impl OwnerService {
    pub async fn create(store: &dyn Store, input: &OwnerInput) -> AppResult<Owner> {
        let owner = store.create_owner(input).await?;
        tracing::info!(owner_id = owner.id, "Owner created");
        Ok(owner)
    }

    /// All owners with their cars, in id order.
    pub async fn list(store: &dyn Store) -> AppResult<Vec<OwnerWithCars>> {
        let owners = store.list_owners().await?;
        let mut cars_by_owner: BTreeMap<DbId, Vec<CarSummary>> = BTreeMap::new();
        for car in store.list_cars_with_owner().await? {
            cars_by_owner
                .entry(car.owner.id)
                .or_default()
                .push(CarSummary::from(&car));
        }

        Ok(owners
            .iter()
            .map(|owner| {
                let cars = cars_by_owner.remove(&owner.id).unwrap_or_default();
                OwnerWithCars::new(owner, cars)
            })
            .collect())
    }

    pub async fn get(store: &dyn Store, id: DbId) -> AppResult<OwnerWithCars> {
        let owner = store
            .find_owner(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
        let cars = store
            .list_cars_by_owner(id)
            .await?
            .iter()
            .map(CarSummary::from)
            .collect();
        Ok(OwnerWithCars::new(&owner, cars))
    }

    pub async fn replace(store: &dyn Store, id: DbId, input: &OwnerInput) -> AppResult<()> {
        store
            .update_owner(id, input)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
        tracing::info!(owner_id = id, "Owner replaced");
        Ok(())
    }

    /// Owners that still own cars are kept; the caller must reassign or delete
    /// the cars first.
    pub async fn delete(store: &dyn Store, id: DbId) -> AppResult<()> {
        if !store.owner_exists(id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }
        let car_count = store.count_cars_by_owner(id).await?;
        if car_count > 0 {
            return Err(still_owns_cars(id, car_count));
        }

        let deleted = store.delete_owner(id).await.map_err(|e| match e {
            StoreError::ForeignKeyViolation(_) => still_owns_cars(id, 1),
            other => AppError::Store(other),
        })?;
        if !deleted {
            return Err(CoreError::NotFound { entity: ENTITY, id }.into());
        }
        tracing::info!(owner_id = id, "Owner deleted");
        Ok(())
    }
}

fn still_owns_cars(id: DbId, count: i64) -> AppError {
    CoreError::Conflict(format!(
        "Owner {id} still owns {count} car(s); reassign or delete them first"
    ))
    .into()
}
