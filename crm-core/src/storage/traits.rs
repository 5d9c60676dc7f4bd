use crate::common::error::Result;
use crate::domain::*;
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Storage trait for persisting CRM data (customers, products, orders).
///
/// Implementations own the uniqueness and referential checks that must be
/// atomic with the write: `insert_customer` is the authority on email
/// uniqueness and `insert_order` re-verifies its customer and product
/// references, so no partial order can commit under concurrent writers.
#[async_trait]
pub trait Storage: Send + Sync {
    // Customer operations
    async fn insert_customer(&self, customer: &mut Customer) -> Result<()>;
    async fn get_customer_by_id(&self, customer_id: Uuid) -> Result<Option<Customer>>;
    async fn customer_email_exists(&self, email: &str) -> Result<bool>;
    async fn filter_customers(&self, filter: &CustomerFilter) -> Result<Vec<Customer>>;
    async fn count_customers(&self) -> Result<u64>;

    // Product operations
    async fn insert_product(&self, product: &mut Product) -> Result<()>;
    async fn get_product_by_id(&self, product_id: Uuid) -> Result<Option<Product>>;
    async fn filter_products(&self, filter: &ProductFilter) -> Result<Vec<Product>>;
    async fn products_below_stock(&self, threshold: i32) -> Result<Vec<Product>>;
    async fn set_product_stock(&self, product_id: Uuid, stock: i32) -> Result<()>;

    // Order operations
    async fn insert_order(&self, order: &mut Order) -> Result<()>;
    async fn get_order_by_id(&self, order_id: Uuid) -> Result<Option<Order>>;
    async fn filter_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>>;
    async fn count_orders(&self) -> Result<u64>;
    async fn sum_order_totals(&self) -> Result<Decimal>;

    // Batch loading methods for GraphQL DataLoader optimization
    async fn get_customers_by_ids(&self, customer_ids: Vec<Uuid>) -> Result<Vec<Customer>>;
    async fn get_products_by_ids(&self, product_ids: Vec<Uuid>) -> Result<Vec<Product>>;
}
