//! Storage seam between the services and the database.
//!
//! The services only need CRUD on accounts, owners and cars plus existence
//! and counting queries. [`PgStore`] answers them through the repositories;
//! [`crate::memory::MemoryStore`] answers them from in-process tables.

use async_trait::async_trait;
use cardb_core::car::CarFields;
use cardb_core::types::DbId;

use crate::models::account::{Account, AccountSummary, CreateAccount};
use crate::models::car::{Car, CarWithOwner};
use crate::models::owner::{Owner, OwnerInput};
use crate::models::stats::BrandCount;
use crate::repositories::{AccountRepo, CarRepo, OwnerRepo};
use crate::{DbPool, StoreResult};

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fails with `UniqueViolation` when the username is taken.
    async fn create_account(&self, input: &CreateAccount) -> StoreResult<Account>;
    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>>;
    async fn username_exists(&self, username: &str) -> StoreResult<bool>;
    async fn list_accounts(&self) -> StoreResult<Vec<AccountSummary>>;
    async fn count_accounts(&self) -> StoreResult<i64>;
    async fn delete_account(&self, id: DbId) -> StoreResult<bool>;
}

#[async_trait]
pub trait OwnerStore: Send + Sync {
    async fn create_owner(&self, input: &OwnerInput) -> StoreResult<Owner>;
    async fn find_owner(&self, id: DbId) -> StoreResult<Option<Owner>>;
    async fn owner_exists(&self, id: DbId) -> StoreResult<bool>;
    async fn list_owners(&self) -> StoreResult<Vec<Owner>>;
    async fn update_owner(&self, id: DbId, input: &OwnerInput) -> StoreResult<Option<Owner>>;
    /// Fails with `ForeignKeyViolation` while cars still reference the owner.
    async fn delete_owner(&self, id: DbId) -> StoreResult<bool>;
    async fn count_owners(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait CarStore: Send + Sync {
    /// Fails with `ForeignKeyViolation` when `owner_id` does not resolve.
    async fn create_car(&self, fields: &CarFields, owner_id: DbId) -> StoreResult<Car>;
    async fn find_car(&self, id: DbId) -> StoreResult<Option<Car>>;
    async fn find_car_with_owner(&self, id: DbId) -> StoreResult<Option<CarWithOwner>>;
    async fn list_cars_with_owner(&self) -> StoreResult<Vec<CarWithOwner>>;
    async fn list_cars_by_brand(&self, brand: &str) -> StoreResult<Vec<CarWithOwner>>;
    async fn list_cars_by_owner(&self, owner_id: DbId) -> StoreResult<Vec<Car>>;
    /// Overwrite every mutable column of one car in a single write.
    async fn update_car(&self, id: DbId, fields: &CarFields, owner_id: DbId)
        -> StoreResult<bool>;
    async fn delete_car(&self, id: DbId) -> StoreResult<bool>;
    async fn count_cars(&self) -> StoreResult<i64>;
    async fn count_cars_by_owner(&self, owner_id: DbId) -> StoreResult<i64>;
    async fn count_cars_by_brand(&self) -> StoreResult<Vec<BrandCount>>;
}

/// Everything the HTTP layer needs from persistence.
#[async_trait]
pub trait Store: AccountStore + OwnerStore + CarStore {
    /// Verify the backing store is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}

/// [`Store`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn create_account(&self, input: &CreateAccount) -> StoreResult<Account> {
        Ok(AccountRepo::create(&self.pool, input).await?)
    }

    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        Ok(AccountRepo::find_by_username(&self.pool, username).await?)
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        Ok(AccountRepo::username_exists(&self.pool, username).await?)
    }

    async fn list_accounts(&self) -> StoreResult<Vec<AccountSummary>> {
        Ok(AccountRepo::list(&self.pool).await?)
    }

    async fn count_accounts(&self) -> StoreResult<i64> {
        Ok(AccountRepo::count(&self.pool).await?)
    }

    async fn delete_account(&self, id: DbId) -> StoreResult<bool> {
        Ok(AccountRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl OwnerStore for PgStore {
    async fn create_owner(&self, input: &OwnerInput) -> StoreResult<Owner> {
        Ok(OwnerRepo::create(&self.pool, input).await?)
    }

    async fn find_owner(&self, id: DbId) -> StoreResult<Option<Owner>> {
        Ok(OwnerRepo::find_by_id(&self.pool, id).await?)
    }

    async fn owner_exists(&self, id: DbId) -> StoreResult<bool> {
        Ok(OwnerRepo::exists(&self.pool, id).await?)
    }

    async fn list_owners(&self) -> StoreResult<Vec<Owner>> {
        Ok(OwnerRepo::list(&self.pool).await?)
    }

    async fn update_owner(&self, id: DbId, input: &OwnerInput) -> StoreResult<Option<Owner>> {
        Ok(OwnerRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_owner(&self, id: DbId) -> StoreResult<bool> {
        Ok(OwnerRepo::delete(&self.pool, id).await?)
    }

    async fn count_owners(&self) -> StoreResult<i64> {
        Ok(OwnerRepo::count(&self.pool).await?)
    }
}

#[async_trait]
impl CarStore for PgStore {
    async fn create_car(&self, fields: &CarFields, owner_id: DbId) -> StoreResult<Car> {
        Ok(CarRepo::create(&self.pool, fields, owner_id).await?)
    }

    async fn find_car(&self, id: DbId) -> StoreResult<Option<Car>> {
        Ok(CarRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_car_with_owner(&self, id: DbId) -> StoreResult<Option<CarWithOwner>> {
        Ok(CarRepo::find_with_owner(&self.pool, id).await?)
    }

    async fn list_cars_with_owner(&self) -> StoreResult<Vec<CarWithOwner>> {
        Ok(CarRepo::list_with_owner(&self.pool).await?)
    }

    async fn list_cars_by_brand(&self, brand: &str) -> StoreResult<Vec<CarWithOwner>> {
        Ok(CarRepo::list_by_brand_with_owner(&self.pool, brand).await?)
    }

    async fn list_cars_by_owner(&self, owner_id: DbId) -> StoreResult<Vec<Car>> {
        Ok(CarRepo::list_by_owner(&self.pool, owner_id).await?)
    }

    async fn update_car(
        &self,
        id: DbId,
        fields: &CarFields,
        owner_id: DbId,
    ) -> StoreResult<bool> {
        Ok(CarRepo::update(&self.pool, id, fields, owner_id).await?)
    }

    async fn delete_car(&self, id: DbId) -> StoreResult<bool> {
        Ok(CarRepo::delete(&self.pool, id).await?)
    }

    async fn count_cars(&self) -> StoreResult<i64> {
        Ok(CarRepo::count(&self.pool).await?)
    }

    async fn count_cars_by_owner(&self, owner_id: DbId) -> StoreResult<i64> {
        Ok(CarRepo::count_by_owner(&self.pool, owner_id).await?)
    }

    async fn count_cars_by_brand(&self) -> StoreResult<Vec<BrandCount>> {
        Ok(CarRepo::count_by_brand(&self.pool).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
