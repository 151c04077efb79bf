//! In-process [`Store`] for tests that run without a database.
//!
//! Mirrors the constraints the Postgres schema enforces: unique usernames,
//! `cars.owner_id` must resolve, and owners with cars cannot be deleted.
//! Each call takes the table lock once, so a single write is atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use cardb_core::car::CarFields;
use cardb_core::types::DbId;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::account::{Account, AccountSummary, CreateAccount};
use crate::models::car::{Car, CarWithOwner};
use crate::models::owner::{Owner, OwnerInput};
use crate::models::stats::BrandCount;
use crate::store::{AccountStore, CarStore, OwnerStore, Store};
use crate::{StoreError, StoreResult};

const UQ_ACCOUNTS_USERNAME: &str = "uq_accounts_username";
const FK_CARS_OWNER_ID: &str = "fk_cars_owner_id";

#[derive(Default)]
struct Tables {
    accounts: BTreeMap<DbId, Account>,
    owners: BTreeMap<DbId, Owner>,
    cars: BTreeMap<DbId, Car>,
    account_seq: DbId,
    owner_seq: DbId,
    car_seq: DbId,
}

impl Tables {
    fn car_with_owner(&self, car: &Car) -> Option<CarWithOwner> {
        self.owners
            .get(&car.owner_id)
            .map(|owner| CarWithOwner::new(car, owner))
    }
}

fn next(seq: &mut DbId) -> DbId {
    *seq += 1;
    *seq
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(&self, input: &CreateAccount) -> StoreResult<Account> {
        let mut tables = self.tables.write().await;
        if tables
            .accounts
            .values()
            .any(|a| a.username == input.username)
        {
            return Err(StoreError::UniqueViolation(UQ_ACCOUNTS_USERNAME.into()));
        }
        let account = Account {
            id: next(&mut tables.account_seq),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            created_at: Utc::now(),
        };
        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.values().any(|a| a.username == username))
    }

    async fn list_accounts(&self) -> StoreResult<Vec<AccountSummary>> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.values().map(AccountSummary::from).collect())
    }

    async fn count_accounts(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.accounts.len() as i64)
    }

    async fn delete_account(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.accounts.remove(&id).is_some())
    }
}

#[async_trait]
impl OwnerStore for MemoryStore {
    async fn create_owner(&self, input: &OwnerInput) -> StoreResult<Owner> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let owner = Owner {
            id: next(&mut tables.owner_seq),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.owners.insert(owner.id, owner.clone());
        Ok(owner)
    }

    async fn find_owner(&self, id: DbId) -> StoreResult<Option<Owner>> {
        Ok(self.tables.read().await.owners.get(&id).cloned())
    }

    async fn owner_exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.read().await.owners.contains_key(&id))
    }

    async fn list_owners(&self) -> StoreResult<Vec<Owner>> {
        Ok(self.tables.read().await.owners.values().cloned().collect())
    }

    async fn update_owner(&self, id: DbId, input: &OwnerInput) -> StoreResult<Option<Owner>> {
        let mut tables = self.tables.write().await;
        Ok(tables.owners.get_mut(&id).map(|owner| {
            owner.first_name = input.first_name.clone();
            owner.last_name = input.last_name.clone();
            owner.updated_at = Utc::now();
            owner.clone()
        }))
    }

    async fn delete_owner(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.cars.values().any(|c| c.owner_id == id) {
            return Err(StoreError::ForeignKeyViolation(FK_CARS_OWNER_ID.into()));
        }
        Ok(tables.owners.remove(&id).is_some())
    }

    async fn count_owners(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.owners.len() as i64)
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn create_car(&self, fields: &CarFields, owner_id: DbId) -> StoreResult<Car> {
        let mut tables = self.tables.write().await;
        if !tables.owners.contains_key(&owner_id) {
            return Err(StoreError::ForeignKeyViolation(FK_CARS_OWNER_ID.into()));
        }
        let now = Utc::now();
        let car = Car {
            id: next(&mut tables.car_seq),
            brand: fields.brand.clone(),
            model: fields.model.clone(),
            color: fields.color.clone(),
            year: fields.year,
            price: fields.price,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.cars.insert(car.id, car.clone());
        Ok(car)
    }

    async fn find_car(&self, id: DbId) -> StoreResult<Option<Car>> {
        Ok(self.tables.read().await.cars.get(&id).cloned())
    }

    async fn find_car_with_owner(&self, id: DbId) -> StoreResult<Option<CarWithOwner>> {
        let tables = self.tables.read().await;
        Ok(tables
            .cars
            .get(&id)
            .and_then(|car| tables.car_with_owner(car)))
    }

    async fn list_cars_with_owner(&self) -> StoreResult<Vec<CarWithOwner>> {
        let tables = self.tables.read().await;
        Ok(tables
            .cars
            .values()
            .filter_map(|car| tables.car_with_owner(car))
            .collect())
    }

    async fn list_cars_by_brand(&self, brand: &str) -> StoreResult<Vec<CarWithOwner>> {
        let tables = self.tables.read().await;
        Ok(tables
            .cars
            .values()
            .filter(|car| car.brand == brand)
            .filter_map(|car| tables.car_with_owner(car))
            .collect())
    }

    async fn list_cars_by_owner(&self, owner_id: DbId) -> StoreResult<Vec<Car>> {
        let tables = self.tables.read().await;
        Ok(tables
            .cars
            .values()
            .filter(|car| car.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_car(
        &self,
        id: DbId,
        fields: &CarFields,
        owner_id: DbId,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.cars.contains_key(&id) {
            return Ok(false);
        }
        if !tables.owners.contains_key(&owner_id) {
            return Err(StoreError::ForeignKeyViolation(FK_CARS_OWNER_ID.into()));
        }
        if let Some(car) = tables.cars.get_mut(&id) {
            car.brand = fields.brand.clone();
            car.model = fields.model.clone();
            car.color = fields.color.clone();
            car.year = fields.year;
            car.price = fields.price;
            car.owner_id = owner_id;
            car.updated_at = Utc::now();
        }
        Ok(true)
    }

    async fn delete_car(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.cars.remove(&id).is_some())
    }

    async fn count_cars(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.cars.len() as i64)
    }

    async fn count_cars_by_owner(&self, owner_id: DbId) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .cars
            .values()
            .filter(|car| car.owner_id == owner_id)
            .count() as i64)
    }

    async fn count_cars_by_brand(&self) -> StoreResult<Vec<BrandCount>> {
        let tables = self.tables.read().await;
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for car in tables.cars.values() {
            *counts.entry(car.brand.as_str()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(brand, count)| BrandCount {
                brand: brand.to_string(),
                count,
            })
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
