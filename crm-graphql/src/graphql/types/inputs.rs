use async_graphql::InputObject;
use chrono::{DateTime, Utc};
use crm_core::domain::{CustomerFilter, OrderFilter, ProductFilter};
use crm_core::ops::NewCustomer;
use rust_decimal::Decimal;

/// Input for creating a customer, standalone or within a bulk batch
#[derive(InputObject, Clone)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<CustomerInput> for NewCustomer {
    fn from(input: CustomerInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
        }
    }
}

#[derive(InputObject, Default)]
pub struct CustomerFilterInput {
    pub name_contains: Option<String>,
    pub email_contains: Option<String>,
    pub phone_starts_with: Option<String>,
    pub created_at_gte: Option<DateTime<Utc>>,
    pub created_at_lte: Option<DateTime<Utc>>,
}

impl From<CustomerFilterInput> for CustomerFilter {
    fn from(input: CustomerFilterInput) -> Self {
        Self {
            name_contains: input.name_contains,
            email_contains: input.email_contains,
            phone_starts_with: input.phone_starts_with,
            created_at_gte: input.created_at_gte,
            created_at_lte: input.created_at_lte,
        }
    }
}

#[derive(InputObject, Default)]
pub struct ProductFilterInput {
    pub name_contains: Option<String>,
    pub price_gte: Option<Decimal>,
    pub price_lte: Option<Decimal>,
    pub stock_gte: Option<i32>,
    pub stock_lte: Option<i32>,
}

impl From<ProductFilterInput> for ProductFilter {
    fn from(input: ProductFilterInput) -> Self {
        Self {
            name_contains: input.name_contains,
            price_gte: input.price_gte,
            price_lte: input.price_lte,
            stock_gte: input.stock_gte,
            stock_lte: input.stock_lte,
        }
    }
}

#[derive(InputObject, Default)]
pub struct OrderFilterInput {
    pub total_amount_gte: Option<Decimal>,
    pub total_amount_lte: Option<Decimal>,
    pub order_date_gte: Option<DateTime<Utc>>,
    pub order_date_lte: Option<DateTime<Utc>>,
}

impl From<OrderFilterInput> for OrderFilter {
    fn from(input: OrderFilterInput) -> Self {
        Self {
            total_amount_gte: input.total_amount_gte,
            total_amount_lte: input.total_amount_lte,
            order_date_gte: input.order_date_gte,
            order_date_lte: input.order_date_lte,
        }
    }
}
