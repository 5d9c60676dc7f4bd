//! Enumerated filter specs, one per entity. Each filter is an explicit set
//! of optional predicates over a fixed field list; the store applies them as
//! a pass-through match with no ranking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Customer, Order, Product};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub name_contains: Option<String>,
    pub email_contains: Option<String>,
    pub phone_starts_with: Option<String>,
    pub created_at_gte: Option<DateTime<Utc>>,
    pub created_at_lte: Option<DateTime<Utc>>,
}

impl CustomerFilter {
    pub fn matches(&self, customer: &Customer) -> bool {
        if let Some(name) = &self.name_contains {
            if !contains_ci(&customer.name, name) {
                return false;
            }
        }
        if let Some(email) = &self.email_contains {
            if !contains_ci(&customer.email, email) {
                return false;
            }
        }
        if let Some(prefix) = &self.phone_starts_with {
            match &customer.phone {
                Some(phone) if phone.starts_with(prefix.as_str()) => {}
                _ => return false,
            }
        }
        if let Some(gte) = self.created_at_gte {
            if customer.created_at < gte {
                return false;
            }
        }
        if let Some(lte) = self.created_at_lte {
            if customer.created_at > lte {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub name_contains: Option<String>,
    pub price_gte: Option<Decimal>,
    pub price_lte: Option<Decimal>,
    pub stock_gte: Option<i32>,
    pub stock_lte: Option<i32>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = &self.name_contains {
            if !contains_ci(&product.name, name) {
                return false;
            }
        }
        if let Some(gte) = self.price_gte {
            if product.price < gte {
                return false;
            }
        }
        if let Some(lte) = self.price_lte {
            if product.price > lte {
                return false;
            }
        }
        if let Some(gte) = self.stock_gte {
            if product.stock < gte {
                return false;
            }
        }
        if let Some(lte) = self.stock_lte {
            if product.stock > lte {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub total_amount_gte: Option<Decimal>,
    pub total_amount_lte: Option<Decimal>,
    pub order_date_gte: Option<DateTime<Utc>>,
    pub order_date_lte: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(gte) = self.total_amount_gte {
            if order.total_amount < gte {
                return false;
            }
        }
        if let Some(lte) = self.total_amount_lte {
            if order.total_amount > lte {
                return false;
            }
        }
        if let Some(gte) = self.order_date_gte {
            if order.order_date < gte {
                return false;
            }
        }
        if let Some(lte) = self.order_date_lte {
            if order.order_date > lte {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn customer_filter_matches_on_all_fields() {
        let customer = Customer::new(
            "Alice Johnson".to_string(),
            "alice@example.com".to_string(),
            Some("+15551234567".to_string()),
        );

        assert!(CustomerFilter::default().matches(&customer));
        assert!(CustomerFilter {
            name_contains: Some("johnson".to_string()),
            ..Default::default()
        }
        .matches(&customer));
        assert!(!CustomerFilter {
            email_contains: Some("bob".to_string()),
            ..Default::default()
        }
        .matches(&customer));
        assert!(CustomerFilter {
            phone_starts_with: Some("+1".to_string()),
            ..Default::default()
        }
        .matches(&customer));
    }

    #[test]
    fn phone_prefix_does_not_match_missing_phone() {
        let customer = Customer::new("Bob".to_string(), "bob@example.com".to_string(), None);
        let filter = CustomerFilter {
            phone_starts_with: Some("+1".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&customer));
    }

    #[test]
    fn product_filter_price_and_stock_bounds() {
        let product = Product::new("Widget".to_string(), dec!(19.99), 5);

        assert!(ProductFilter {
            price_gte: Some(dec!(10)),
            price_lte: Some(dec!(20)),
            ..Default::default()
        }
        .matches(&product));
        assert!(!ProductFilter {
            stock_gte: Some(6),
            ..Default::default()
        }
        .matches(&product));
    }

    #[test]
    fn order_filter_date_range() {
        let order = Order {
            id: None,
            customer_id: uuid::Uuid::new_v4(),
            product_ids: vec![uuid::Uuid::new_v4()],
            order_date: Utc::now(),
            total_amount: dec!(42),
        };

        let filter = OrderFilter {
            order_date_gte: Some(Utc::now() - chrono::Duration::days(1)),
            order_date_lte: Some(Utc::now() + chrono::Duration::days(1)),
            ..Default::default()
        };
        assert!(filter.matches(&order));

        let past = OrderFilter {
            order_date_lte: Some(Utc::now() - chrono::Duration::days(1)),
            ..Default::default()
        };
        assert!(!past.matches(&order));
    }
}
