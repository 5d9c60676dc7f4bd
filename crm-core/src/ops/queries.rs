//! Read-only resolvers: filtered, paginated listings plus the aggregates the
//! weekly report consumes. Filtering is a pass-through predicate match on
//! the store; pagination happens here.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::common::error::Result;
use crate::domain::{Customer, CustomerFilter, Order, OrderFilter, Product, ProductFilter};
use crate::storage::Storage;

/// One page of a filtered listing. `total_count` counts the whole filtered
/// set, not the page slice.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

fn paginate<T>(mut items: Vec<T>, limit: Option<usize>, offset: Option<usize>) -> Page<T> {
    let total_count = items.len() as u64;
    let offset = offset.unwrap_or(0).min(items.len());
    items.drain(..offset);
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    Page { items, total_count }
}

pub async fn all_customers(
    storage: &dyn Storage,
    filter: &CustomerFilter,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Page<Customer>> {
    let customers = storage.filter_customers(filter).await?;
    Ok(paginate(customers, limit, offset))
}

pub async fn all_products(
    storage: &dyn Storage,
    filter: &ProductFilter,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Page<Product>> {
    let products = storage.filter_products(filter).await?;
    Ok(paginate(products, limit, offset))
}

pub async fn all_orders(
    storage: &dyn Storage,
    filter: &OrderFilter,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Page<Order>> {
    let orders = storage.filter_orders(filter).await?;
    Ok(paginate(orders, limit, offset))
}

#[derive(Debug, Clone)]
pub struct CrmReport {
    pub total_customers: u64,
    pub total_orders: u64,
    pub total_revenue: Decimal,
}

/// Aggregates for the weekly report. Zero orders means zero revenue, not an
/// error.
pub async fn generate_report(storage: &dyn Storage) -> Result<CrmReport> {
    Ok(CrmReport {
        total_customers: storage.count_customers().await?,
        total_orders: storage.count_orders().await?,
        total_revenue: storage.sum_order_totals().await?,
    })
}

/// Orders placed within the last `days` days, oldest first. Used by the
/// order-reminders job.
pub async fn recent_orders(storage: &dyn Storage, days: i64) -> Result<Vec<Order>> {
    let filter = OrderFilter {
        order_date_gte: Some(Utc::now() - Duration::days(days)),
        ..Default::default()
    };
    storage.filter_orders(&filter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::mutations::{create_customer, create_order, create_product, NewCustomer};
    use crate::storage::InMemoryStorage;
    use rust_decimal_macros::dec;

    async fn seed_customer(storage: &InMemoryStorage, name: &str, email: &str) -> Customer {
        create_customer(
            storage,
            NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
                phone: None,
            },
        )
        .await
        .unwrap()
        .customer
        .unwrap()
    }

    #[tokio::test]
    async fn report_over_empty_store_is_all_zeroes() {
        let storage = InMemoryStorage::new();
        let report = generate_report(&storage).await.unwrap();
        assert_eq!(report.total_customers, 0);
        assert_eq!(report.total_orders, 0);
        assert_eq!(report.total_revenue, Decimal::ZERO);
    }

    #[tokio::test]
    async fn report_sums_order_totals() {
        let storage = InMemoryStorage::new();
        let customer = seed_customer(&storage, "A", "a@x.com").await;
        let product = create_product(&storage, "P".to_string(), dec!(10.50), 5)
            .await
            .unwrap()
            .product
            .unwrap();
        for _ in 0..3 {
            create_order(
                &storage,
                customer.id.unwrap(),
                vec![product.id.unwrap()],
                None,
            )
            .await
            .unwrap();
        }

        let report = generate_report(&storage).await.unwrap();
        assert_eq!(report.total_customers, 1);
        assert_eq!(report.total_orders, 3);
        assert_eq!(report.total_revenue, dec!(31.50));
    }

    #[tokio::test]
    async fn pagination_slices_but_total_count_covers_filtered_set() {
        let storage = InMemoryStorage::new();
        for i in 0..5 {
            seed_customer(&storage, &format!("Customer {}", i), &format!("c{}@x.com", i)).await;
        }

        let page = all_customers(&storage, &CustomerFilter::default(), Some(2), Some(1))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.items[0].name, "Customer 1");

        let filtered = all_customers(
            &storage,
            &CustomerFilter {
                email_contains: Some("c3@".to_string()),
                ..Default::default()
            },
            None,
            None,
        )
        .await
        .unwrap();
        assert_eq!(filtered.total_count, 1);
        assert_eq!(filtered.items[0].name, "Customer 3");
    }

    #[tokio::test]
    async fn offset_past_the_end_yields_an_empty_page() {
        let storage = InMemoryStorage::new();
        seed_customer(&storage, "A", "a@x.com").await;

        let page = all_customers(&storage, &CustomerFilter::default(), None, Some(10))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 1);
    }

    #[tokio::test]
    async fn recent_orders_excludes_old_ones() {
        let storage = InMemoryStorage::new();
        let customer = seed_customer(&storage, "A", "a@x.com").await;
        let product = create_product(&storage, "P".to_string(), dec!(1), 1)
            .await
            .unwrap()
            .product
            .unwrap();

        create_order(
            &storage,
            customer.id.unwrap(),
            vec![product.id.unwrap()],
            Some(Utc::now() - Duration::days(30)),
        )
        .await
        .unwrap();
        create_order(
            &storage,
            customer.id.unwrap(),
            vec![product.id.unwrap()],
            None,
        )
        .await
        .unwrap();

        let recent = recent_orders(&storage, 7).await.unwrap();
        assert_eq!(recent.len(), 1);
    }
}
