use super::traits::Storage;
use crate::common::error::{CrmError, Result};
use crate::domain::*;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    customers: HashMap<Uuid, Customer>,
    products: HashMap<Uuid, Product>,
    orders: HashMap<Uuid, Order>,
}

/// In-memory storage implementation for development/testing.
///
/// All three tables sit behind a single mutex: an order insert observes its
/// customer and product references and commits the row in one critical
/// section, which is the transaction boundary the order path requires.
pub struct InMemoryStorage {
    tables: Mutex<Tables>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| CrmError::Storage {
            message: "storage mutex poisoned".to_string(),
        })
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn insert_customer(&self, customer: &mut Customer) -> Result<()> {
        let mut tables = self.lock()?;

        // Uniqueness is decided here, under the lock, not by any earlier
        // existence check the caller may have run.
        if tables
            .customers
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(&customer.email))
        {
            return Err(CrmError::Conflict("Email already exists".to_string()));
        }

        let id = Uuid::new_v4();
        customer.id = Some(id);
        tables.customers.insert(id, customer.clone());

        debug!("Created customer: {} with id {}", customer.email, id);
        Ok(())
    }

    async fn get_customer_by_id(&self, customer_id: Uuid) -> Result<Option<Customer>> {
        let tables = self.lock()?;
        Ok(tables.customers.get(&customer_id).cloned())
    }

    async fn customer_email_exists(&self, email: &str) -> Result<bool> {
        let tables = self.lock()?;
        Ok(tables
            .customers
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(email)))
    }

    async fn filter_customers(&self, filter: &CustomerFilter) -> Result<Vec<Customer>> {
        let tables = self.lock()?;
        let mut customers: Vec<Customer> = tables
            .customers
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        customers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(customers)
    }

    async fn count_customers(&self) -> Result<u64> {
        let tables = self.lock()?;
        Ok(tables.customers.len() as u64)
    }

    async fn insert_product(&self, product: &mut Product) -> Result<()> {
        let mut tables = self.lock()?;

        let id = Uuid::new_v4();
        product.id = Some(id);
        tables.products.insert(id, product.clone());

        debug!("Created product: {} with id {}", product.name, id);
        Ok(())
    }

    async fn get_product_by_id(&self, product_id: Uuid) -> Result<Option<Product>> {
        let tables = self.lock()?;
        Ok(tables.products.get(&product_id).cloned())
    }

    async fn filter_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let tables = self.lock()?;
        let mut products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(products)
    }

    async fn products_below_stock(&self, threshold: i32) -> Result<Vec<Product>> {
        let tables = self.lock()?;
        let mut products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| p.stock < threshold)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(products)
    }

    async fn set_product_stock(&self, product_id: Uuid, stock: i32) -> Result<()> {
        let mut tables = self.lock()?;
        let product = tables
            .products
            .get_mut(&product_id)
            .ok_or_else(|| CrmError::NotFound("One or more invalid product IDs".to_string()))?;
        product.stock = stock;
        debug!("Updated stock for product {}: {}", product_id, stock);
        Ok(())
    }

    async fn insert_order(&self, order: &mut Order) -> Result<()> {
        let mut tables = self.lock()?;

        // All-or-nothing: the reference checks and the insert happen in one
        // critical section, so a concurrently deleted or never-existing
        // reference cannot leave a partial order behind.
        if !tables.customers.contains_key(&order.customer_id) {
            return Err(CrmError::NotFound("Invalid customer ID".to_string()));
        }
        if order.product_ids.is_empty() {
            return Err(CrmError::InvalidInput("No products selected".to_string()));
        }
        if order
            .product_ids
            .iter()
            .any(|pid| !tables.products.contains_key(pid))
        {
            return Err(CrmError::NotFound(
                "One or more invalid product IDs".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        order.id = Some(id);
        tables.orders.insert(id, order.clone());

        debug!(
            "Created order {} for customer {} ({} products)",
            id,
            order.customer_id,
            order.product_ids.len()
        );
        Ok(())
    }

    async fn get_order_by_id(&self, order_id: Uuid) -> Result<Option<Order>> {
        let tables = self.lock()?;
        Ok(tables.orders.get(&order_id).cloned())
    }

    async fn filter_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let tables = self.lock()?;
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.order_date.cmp(&b.order_date));
        Ok(orders)
    }

    async fn count_orders(&self) -> Result<u64> {
        let tables = self.lock()?;
        Ok(tables.orders.len() as u64)
    }

    async fn sum_order_totals(&self) -> Result<Decimal> {
        let tables = self.lock()?;
        Ok(tables.orders.values().map(|o| o.total_amount).sum())
    }

    async fn get_customers_by_ids(&self, customer_ids: Vec<Uuid>) -> Result<Vec<Customer>> {
        let tables = self.lock()?;
        Ok(customer_ids
            .iter()
            .filter_map(|id| tables.customers.get(id).cloned())
            .collect())
    }

    async fn get_products_by_ids(&self, product_ids: Vec<Uuid>) -> Result<Vec<Product>> {
        let tables = self.lock()?;
        Ok(product_ids
            .iter()
            .filter_map(|id| tables.products.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn duplicate_email_insert_is_a_conflict() {
        let storage = InMemoryStorage::new();
        let mut first = Customer::new("A".to_string(), "a@x.com".to_string(), None);
        storage.insert_customer(&mut first).await.unwrap();
        assert!(first.id.is_some());

        let mut second = Customer::new("B".to_string(), "A@X.COM".to_string(), None);
        let err = storage.insert_customer(&mut second).await.unwrap_err();
        assert!(matches!(err, CrmError::Conflict(_)));
        assert_eq!(storage.count_customers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn order_insert_rejects_bad_references_without_committing() {
        let storage = InMemoryStorage::new();
        let mut customer = Customer::new("A".to_string(), "a@x.com".to_string(), None);
        storage.insert_customer(&mut customer).await.unwrap();

        let mut order = Order {
            id: None,
            customer_id: customer.id.unwrap(),
            product_ids: vec![Uuid::new_v4()],
            order_date: Utc::now(),
            total_amount: dec!(10),
        };
        let err = storage.insert_order(&mut order).await.unwrap_err();
        assert!(matches!(err, CrmError::NotFound(_)));
        assert_eq!(storage.count_orders().await.unwrap(), 0);
        assert!(order.id.is_none());
    }

    #[tokio::test]
    async fn below_stock_threshold_is_exclusive() {
        let storage = InMemoryStorage::new();
        let mut low = Product::new("Low".to_string(), dec!(1), 3);
        let mut at = Product::new("At".to_string(), dec!(1), 10);
        storage.insert_product(&mut low).await.unwrap();
        storage.insert_product(&mut at).await.unwrap();

        let below = storage.products_below_stock(10).await.unwrap();
        assert_eq!(below.len(), 1);
        assert_eq!(below[0].name, "Low");
    }
}
