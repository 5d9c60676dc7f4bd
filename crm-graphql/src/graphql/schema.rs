use crate::graphql::loaders::{CustomerLoader, ProductLoader};
use crate::graphql::resolvers::{Mutation, Query};
use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, Schema};
use crm_core::ops::LowStockPolicy;
use crm_core::storage::Storage;
use std::sync::Arc;

/// GraphQL context containing shared application state
pub struct GraphQLContext {
    pub storage: Arc<dyn Storage>,
    pub customer_loader: DataLoader<CustomerLoader>,
    pub product_loader: DataLoader<ProductLoader>,
    pub low_stock_policy: LowStockPolicy,
}

/// The complete GraphQL schema
pub type CrmSchema = Schema<Query, Mutation, EmptySubscription>;

/// Create a new GraphQL schema with the given storage and restock policy
pub fn create_schema(storage: Arc<dyn Storage>, low_stock_policy: LowStockPolicy) -> CrmSchema {
    let customer_loader = CustomerLoader::new(storage.clone());
    let product_loader = ProductLoader::new(storage.clone());

    Schema::build(Query, Mutation, EmptySubscription)
        .data(GraphQLContext {
            storage,
            customer_loader,
            product_loader,
            low_stock_policy,
        })
        .finish()
}
