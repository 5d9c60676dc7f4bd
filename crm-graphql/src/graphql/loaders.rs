use async_graphql::dataloader::{DataLoader, Loader};
use async_trait::async_trait;
use crm_core::domain::{Customer, Product};
use crm_core::storage::Storage;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// DataLoader for batching customer lookups
pub struct CustomerLoader {
    storage: Arc<dyn Storage>,
}

impl CustomerLoader {
    pub fn new(storage: Arc<dyn Storage>) -> DataLoader<Self> {
        DataLoader::new(Self { storage }, tokio::spawn)
    }
}

#[async_trait]
impl Loader<Uuid> for CustomerLoader {
    type Value = Customer;
    type Error = String;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let customers = self
            .storage
            .get_customers_by_ids(keys.to_vec())
            .await
            .map_err(|e| e.to_string())?;

        let mut map = HashMap::new();
        for customer in customers {
            if let Some(id) = customer.id {
                map.insert(id, customer);
            }
        }

        Ok(map)
    }
}

/// DataLoader for batching product lookups
pub struct ProductLoader {
    storage: Arc<dyn Storage>,
}

impl ProductLoader {
    pub fn new(storage: Arc<dyn Storage>) -> DataLoader<Self> {
        DataLoader::new(Self { storage }, tokio::spawn)
    }
}

#[async_trait]
impl Loader<Uuid> for ProductLoader {
    type Value = Product;
    type Error = String;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let products = self
            .storage
            .get_products_by_ids(keys.to_vec())
            .await
            .map_err(|e| e.to_string())?;

        let mut map = HashMap::new();
        for product in products {
            if let Some(id) = product.id {
                map.insert(id, product);
            }
        }

        Ok(map)
    }
}
