pub mod filters;
pub mod validation;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use filters::{CustomerFilter, OrderFilter, ProductFilter};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<Uuid>,
    pub name: String,
    /// Unique across the store; uniqueness is enforced at insert time.
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: String, email: String, phone: Option<String>) -> Self {
        Self {
            id: None,
            name,
            email,
            phone,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<Uuid>,
    pub name: String,
    /// Strictly positive.
    pub price: Decimal,
    /// Never negative; zero is a legal stock level.
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: String, price: Decimal, stock: i32) -> Self {
        Self {
            id: None,
            name,
            price,
            stock,
            created_at: Utc::now(),
        }
    }
}

/// An order is immutable once created: total_amount is derived from the
/// referenced products' prices at creation time, never client-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<Uuid>,
    pub customer_id: Uuid,
    pub product_ids: Vec<Uuid>,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
}
