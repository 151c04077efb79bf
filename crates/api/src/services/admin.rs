//! Account administration and aggregate statistics.

use cardb_core::error::CoreError;
use cardb_core::types::DbId;
use cardb_db::models::account::AccountSummary;
use cardb_db::models::stats::Stats;
use cardb_db::store::Store;

use crate::error::AppResult;

pub struct AdminService;

impl AdminService {
    pub async fn list_accounts(store: &dyn Store) -> AppResult<Vec<AccountSummary>> {
        Ok(store.list_accounts().await?)
    }

    pub async fn stats(store: &dyn Store) -> AppResult<Stats> {
        Ok(Stats {
            total_cars: store.count_cars().await?,
            total_owners: store.count_owners().await?,
            total_users: store.count_accounts().await?,
            cars_by_brand: store.count_cars_by_brand().await?,
        })
    }

    pub async fn delete_account(store: &dyn Store, id: DbId) -> AppResult<()> {
        if !store.delete_account(id).await? {
            return Err(CoreError::NotFound {
                entity: "Account",
                id,
            }
            .into());
        }
        tracing::info!(account_id = id, "Account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cardb_core::car::CarFields;
    use cardb_core::roles::Role;
    use cardb_db::memory::MemoryStore;
    use cardb_db::models::account::CreateAccount;
    use cardb_db::models::owner::OwnerInput;
    use cardb_db::models::stats::BrandCount;
    use cardb_db::store::{AccountStore, CarStore, OwnerStore};
    use rust_decimal::Decimal;

    use super::*;

    fn car(brand: &str) -> CarFields {
        CarFields {
            brand: brand.into(),
            model: "Any".into(),
            color: "Grey".into(),
            year: 2021,
            price: Decimal::from(1000),
        }
    }

    #[tokio::test]
    async fn stats_counts_and_groups_by_brand() {
        let store = MemoryStore::new();
        store
            .create_account(&CreateAccount {
                username: "alice".into(),
                password_hash: "x".into(),
                role: Role::User,
            })
            .await
            .unwrap();
        let owner = store
            .create_owner(&OwnerInput {
                first_name: "John".into(),
                last_name: "Doe".into(),
            })
            .await
            .unwrap();
        for brand in ["Toyota", "Honda", "Toyota"] {
            store.create_car(&car(brand), owner.id).await.unwrap();
        }

        let stats = AdminService::stats(&store).await.unwrap();
        assert_eq!(stats.total_cars, 3);
        assert_eq!(stats.total_owners, 1);
        assert_eq!(stats.total_users, 1);
        assert_eq!(
            stats.cars_by_brand,
            vec![
                BrandCount {
                    brand: "Honda".into(),
                    count: 1
                },
                BrandCount {
                    brand: "Toyota".into(),
                    count: 2
                },
            ]
        );
    }

    #[tokio::test]
    async fn delete_unknown_account_is_not_found() {
        let store = MemoryStore::new();
        assert!(AdminService::delete_account(&store, 1).await.is_err());
    }
}
