//! Mutation layer: validates input and performs create operations against
//! the store. Expected validation failures (bad input, duplicate email,
//! missing reference) are returned as `{success: false}` payloads; only
//! store-level faults propagate as errors.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::common::error::{CrmError, Result};
use crate::domain::validation::{is_valid_email, is_valid_phone};
use crate::domain::{Customer, Order, Product};
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CustomerPayload {
    pub success: bool,
    pub message: String,
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone)]
pub struct BulkCustomersPayload {
    pub success: bool,
    pub created: Vec<Customer>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProductPayload {
    pub success: bool,
    pub message: String,
    pub product: Option<Product>,
}

#[derive(Debug, Clone)]
pub struct OrderPayload {
    pub success: bool,
    pub message: String,
    pub order: Option<Order>,
}

/// Restock policy for the periodic low-stock job. The threshold is
/// exclusive: a product is restocked when `stock < threshold`.
#[derive(Debug, Clone, Copy)]
pub struct LowStockPolicy {
    pub threshold: i32,
    pub restock_amount: i32,
}

impl Default for LowStockPolicy {
    fn default() -> Self {
        Self {
            threshold: 10,
            restock_amount: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LowStockPayload {
    pub success: bool,
    pub message: String,
    pub updated: Vec<Product>,
}

pub async fn create_customer(storage: &dyn Storage, input: NewCustomer) -> Result<CustomerPayload> {
    match try_create_customer(storage, input).await {
        Ok(customer) => Ok(CustomerPayload {
            success: true,
            message: "Customer created".to_string(),
            customer: Some(customer),
        }),
        Err(e) if e.is_client_error() => Ok(CustomerPayload {
            success: false,
            message: e.to_string(),
            customer: None,
        }),
        Err(e) => Err(e),
    }
}

async fn try_create_customer(storage: &dyn Storage, input: NewCustomer) -> Result<Customer> {
    if !is_valid_email(&input.email) {
        return Err(CrmError::InvalidInput("Invalid email format".to_string()));
    }
    if let Some(phone) = &input.phone {
        if !is_valid_phone(phone) {
            return Err(CrmError::InvalidInput("Invalid phone format".to_string()));
        }
    }
    if storage.customer_email_exists(&input.email).await? {
        return Err(CrmError::Conflict("Email already exists".to_string()));
    }

    // The insert is still the authority on uniqueness; a race between the
    // check above and the insert surfaces as a Conflict here.
    let mut customer = Customer::new(input.name, input.email, input.phone);
    storage.insert_customer(&mut customer).await?;

    info!("Created customer {}", customer.email);
    Ok(customer)
}

/// Creates each customer independently: one bad item does not abort the
/// batch, and already-persisted items stay persisted.
pub async fn bulk_create_customers(
    storage: &dyn Storage,
    inputs: Vec<NewCustomer>,
) -> Result<BulkCustomersPayload> {
    let mut created = Vec::new();
    let mut errors = Vec::new();

    for input in inputs {
        if input.name.trim().is_empty() || input.email.trim().is_empty() {
            let label = if input.name.trim().is_empty() {
                "[Unnamed]"
            } else {
                input.name.as_str()
            };
            errors.push(format!("Missing required fields for: {}", label));
            continue;
        }
        if storage.customer_email_exists(&input.email).await? {
            errors.push(format!("Email already exists: {}", input.email));
            continue;
        }
        if let Some(phone) = &input.phone {
            if !is_valid_phone(phone) {
                errors.push(format!("Invalid phone: {}", phone));
                continue;
            }
        }

        let mut customer = Customer::new(input.name, input.email, input.phone);
        match storage.insert_customer(&mut customer).await {
            Ok(()) => created.push(customer),
            // Lost a duplicate-email race against a concurrent writer;
            // record it against this item rather than aborting the batch.
            Err(CrmError::Conflict(_)) => {
                errors.push(format!("Email already exists: {}", customer.email));
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Bulk customer creation: {} created, {} skipped",
        created.len(),
        errors.len()
    );
    Ok(BulkCustomersPayload {
        success: !created.is_empty(),
        created,
        errors,
    })
}

pub async fn create_product(
    storage: &dyn Storage,
    name: String,
    price: Decimal,
    stock: i32,
) -> Result<ProductPayload> {
    match try_create_product(storage, name, price, stock).await {
        Ok(product) => Ok(ProductPayload {
            success: true,
            message: "Product created".to_string(),
            product: Some(product),
        }),
        Err(e) if e.is_client_error() => Ok(ProductPayload {
            success: false,
            message: e.to_string(),
            product: None,
        }),
        Err(e) => Err(e),
    }
}

async fn try_create_product(
    storage: &dyn Storage,
    name: String,
    price: Decimal,
    stock: i32,
) -> Result<Product> {
    if price <= Decimal::ZERO {
        return Err(CrmError::InvalidInput("Price must be positive".to_string()));
    }
    // Zero stock is a legal state; only negative stock is rejected.
    if stock < 0 {
        return Err(CrmError::InvalidInput(
            "Stock must be non-negative".to_string(),
        ));
    }

    let mut product = Product::new(name, price, stock);
    storage.insert_product(&mut product).await?;

    info!("Created product {}", product.name);
    Ok(product)
}

pub async fn create_order(
    storage: &dyn Storage,
    customer_id: Uuid,
    product_ids: Vec<Uuid>,
    order_date: Option<DateTime<Utc>>,
) -> Result<OrderPayload> {
    match try_create_order(storage, customer_id, product_ids, order_date).await {
        Ok(order) => Ok(OrderPayload {
            success: true,
            message: "Order created".to_string(),
            order: Some(order),
        }),
        Err(e) if e.is_client_error() => Ok(OrderPayload {
            success: false,
            message: e.to_string(),
            order: None,
        }),
        Err(e) => Err(e),
    }
}

async fn try_create_order(
    storage: &dyn Storage,
    customer_id: Uuid,
    product_ids: Vec<Uuid>,
    order_date: Option<DateTime<Utc>>,
) -> Result<Order> {
    if storage.get_customer_by_id(customer_id).await?.is_none() {
        return Err(CrmError::NotFound("Invalid customer ID".to_string()));
    }
    if product_ids.is_empty() {
        return Err(CrmError::InvalidInput("No products selected".to_string()));
    }

    // Resolve distinct ids: a shortfall means duplicates or missing ids.
    let mut unique_ids = product_ids.clone();
    unique_ids.sort();
    unique_ids.dedup();
    let products = storage.get_products_by_ids(unique_ids).await?;
    if products.len() < product_ids.len() {
        return Err(CrmError::NotFound(
            "One or more invalid product IDs".to_string(),
        ));
    }

    let total_amount: Decimal = products.iter().map(|p| p.price).sum();

    let mut order = Order {
        id: None,
        customer_id,
        product_ids: products.iter().filter_map(|p| p.id).collect(),
        order_date: order_date.unwrap_or_else(Utc::now),
        total_amount,
    };
    // The insert re-verifies both references under the store's lock, so the
    // order and its associations commit atomically or not at all.
    storage.insert_order(&mut order).await?;

    info!(
        "Created order for customer {} with total {}",
        customer_id, total_amount
    );
    Ok(order)
}

/// Restocks every product currently below the policy threshold and returns
/// the updated products with a one-line summary.
pub async fn update_low_stock(
    storage: &dyn Storage,
    policy: LowStockPolicy,
) -> Result<LowStockPayload> {
    let low = storage.products_below_stock(policy.threshold).await?;

    let mut updated = Vec::new();
    for product in low {
        let Some(id) = product.id else { continue };
        let stock = product.stock + policy.restock_amount;
        storage.set_product_stock(id, stock).await?;
        updated.push(Product { stock, ..product });
    }

    info!("Low-stock update restocked {} products", updated.len());
    Ok(LowStockPayload {
        success: true,
        message: format!("Updated {} low-stock products", updated.len()),
        updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use rust_decimal_macros::dec;

    fn input(name: &str, email: &str, phone: Option<&str>) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_customer_succeeds_once_then_conflicts() {
        let storage = InMemoryStorage::new();

        let first = create_customer(&storage, input("Alice", "alice@x.com", None))
            .await
            .unwrap();
        assert!(first.success);
        assert_eq!(first.message, "Customer created");
        assert!(first.customer.is_some());

        let second = create_customer(&storage, input("Alice Again", "alice@x.com", None))
            .await
            .unwrap();
        assert!(!second.success);
        assert_eq!(second.message, "Email already exists");
        assert!(second.customer.is_none());
        assert_eq!(storage.count_customers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_customer_rejects_malformed_email_without_persisting() {
        let storage = InMemoryStorage::new();

        for email in ["alice", "alice@nodot", "@x.com"] {
            let result = create_customer(&storage, input("Alice", email, None))
                .await
                .unwrap();
            assert!(!result.success);
            assert_eq!(result.message, "Invalid email format");
        }
        assert_eq!(storage.count_customers().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_customer_rejects_phone_matching_neither_format() {
        let storage = InMemoryStorage::new();

        let bad = create_customer(&storage, input("Alice", "alice@x.com", Some("12345")))
            .await
            .unwrap();
        assert!(!bad.success);
        assert_eq!(bad.message, "Invalid phone format");

        let intl = create_customer(&storage, input("Alice", "alice@x.com", Some("+15551234567")))
            .await
            .unwrap();
        assert!(intl.success);

        let dashed = create_customer(&storage, input("Bob", "bob@x.com", Some("555-123-4567")))
            .await
            .unwrap();
        assert!(dashed.success);
    }

    #[tokio::test]
    async fn bulk_create_skips_bad_items_and_keeps_good_ones() {
        let storage = InMemoryStorage::new();

        let result = bulk_create_customers(
            &storage,
            vec![
                input("A", "a@x.com", None),
                input("", "b@x.com", None),
                input("C", "a@x.com", None),
                input("D", "d@x.com", Some("not-a-phone")),
            ],
        )
        .await
        .unwrap();

        assert!(result.success);
        assert_eq!(result.created.len(), 1);
        assert_eq!(result.created[0].name, "A");
        assert_eq!(
            result.errors,
            vec![
                "Missing required fields for: [Unnamed]",
                "Email already exists: a@x.com",
                "Invalid phone: not-a-phone",
            ]
        );
    }

    #[tokio::test]
    async fn bulk_create_with_no_valid_items_is_not_a_success() {
        let storage = InMemoryStorage::new();

        let result = bulk_create_customers(&storage, vec![input("", "", None)])
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.created.is_empty());
        assert_eq!(result.errors.len(), 1);
    }

    #[tokio::test]
    async fn create_product_price_must_be_positive_but_zero_stock_is_fine() {
        let storage = InMemoryStorage::new();

        let free = create_product(&storage, "Widget".to_string(), dec!(0), 5)
            .await
            .unwrap();
        assert!(!free.success);
        assert_eq!(free.message, "Price must be positive");

        let negative = create_product(&storage, "Widget".to_string(), dec!(10), -1)
            .await
            .unwrap();
        assert!(!negative.success);
        assert_eq!(negative.message, "Stock must be non-negative");

        let empty_shelf = create_product(&storage, "Widget".to_string(), dec!(10), 0)
            .await
            .unwrap();
        assert!(empty_shelf.success);
        assert_eq!(empty_shelf.product.unwrap().stock, 0);
    }

    #[tokio::test]
    async fn create_order_totals_product_prices_and_defaults_date() {
        let storage = InMemoryStorage::new();
        let customer = create_customer(&storage, input("A", "a@x.com", None))
            .await
            .unwrap()
            .customer
            .unwrap();
        let p1 = create_product(&storage, "P1".to_string(), dec!(100.00), 5)
            .await
            .unwrap()
            .product
            .unwrap();
        let p2 = create_product(&storage, "P2".to_string(), dec!(25.50), 5)
            .await
            .unwrap()
            .product
            .unwrap();

        let before = Utc::now();
        let result = create_order(
            &storage,
            customer.id.unwrap(),
            vec![p1.id.unwrap(), p2.id.unwrap()],
            None,
        )
        .await
        .unwrap();
        assert!(result.success);
        assert_eq!(result.message, "Order created");

        let order = result.order.unwrap();
        assert_eq!(order.total_amount, dec!(125.50));
        assert_eq!(order.product_ids.len(), 2);
        assert!(order.order_date >= before && order.order_date <= Utc::now());
    }

    #[tokio::test]
    async fn create_order_respects_supplied_date() {
        let storage = InMemoryStorage::new();
        let customer = create_customer(&storage, input("A", "a@x.com", None))
            .await
            .unwrap()
            .customer
            .unwrap();
        let product = create_product(&storage, "P".to_string(), dec!(1), 1)
            .await
            .unwrap()
            .product
            .unwrap();

        let date = Utc::now() - chrono::Duration::days(3);
        let result = create_order(
            &storage,
            customer.id.unwrap(),
            vec![product.id.unwrap()],
            Some(date),
        )
        .await
        .unwrap();
        assert_eq!(result.order.unwrap().order_date, date);
    }

    #[tokio::test]
    async fn create_order_validation_failures_persist_nothing() {
        let storage = InMemoryStorage::new();
        let customer = create_customer(&storage, input("A", "a@x.com", None))
            .await
            .unwrap()
            .customer
            .unwrap();
        let product = create_product(&storage, "P".to_string(), dec!(1), 1)
            .await
            .unwrap()
            .product
            .unwrap();

        let bad_customer = create_order(&storage, Uuid::new_v4(), vec![product.id.unwrap()], None)
            .await
            .unwrap();
        assert!(!bad_customer.success);
        assert_eq!(bad_customer.message, "Invalid customer ID");

        let no_products = create_order(&storage, customer.id.unwrap(), vec![], None)
            .await
            .unwrap();
        assert!(!no_products.success);
        assert_eq!(no_products.message, "No products selected");

        let missing = create_order(
            &storage,
            customer.id.unwrap(),
            vec![product.id.unwrap(), Uuid::new_v4()],
            None,
        )
        .await
        .unwrap();
        assert!(!missing.success);
        assert_eq!(missing.message, "One or more invalid product IDs");

        // Duplicated ids resolve to fewer products than requested.
        let duplicated = create_order(
            &storage,
            customer.id.unwrap(),
            vec![product.id.unwrap(), product.id.unwrap()],
            None,
        )
        .await
        .unwrap();
        assert!(!duplicated.success);
        assert_eq!(duplicated.message, "One or more invalid product IDs");

        assert_eq!(storage.count_orders().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn low_stock_update_restocks_only_below_threshold() {
        let storage = InMemoryStorage::new();
        let low = create_product(&storage, "Low".to_string(), dec!(1), 2)
            .await
            .unwrap()
            .product
            .unwrap();
        create_product(&storage, "Full".to_string(), dec!(1), 50)
            .await
            .unwrap();

        let result = update_low_stock(&storage, LowStockPolicy::default())
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.message, "Updated 1 low-stock products");
        assert_eq!(result.updated.len(), 1);
        assert_eq!(result.updated[0].name, "Low");
        assert_eq!(result.updated[0].stock, 12);

        let stored = storage.get_product_by_id(low.id.unwrap()).await.unwrap();
        assert_eq!(stored.unwrap().stock, 12);
    }
}
