//! Mutation result types. Validation failures surface here as
//! `success: false` with a message, never as GraphQL field errors.

use async_graphql::Object;
use crm_core::ops::{
    BulkCustomersPayload, CustomerPayload, LowStockPayload, OrderPayload, ProductPayload,
};

pub struct CreateCustomerPayload {
    pub inner: CustomerPayload,
}

#[Object]
impl CreateCustomerPayload {
    async fn customer(&self) -> Option<super::customer::Customer> {
        self.inner.customer.clone().map(Into::into)
    }

    async fn success(&self) -> bool {
        self.inner.success
    }

    async fn message(&self) -> &str {
        &self.inner.message
    }
}

pub struct BulkCreateCustomersPayload {
    pub inner: BulkCustomersPayload,
}

#[Object]
impl BulkCreateCustomersPayload {
    /// Customers actually persisted, in input order
    async fn created_customers(&self) -> Vec<super::customer::Customer> {
        self.inner.created.iter().cloned().map(Into::into).collect()
    }

    /// True when at least one item was created
    async fn success(&self) -> bool {
        self.inner.success
    }

    /// One entry per skipped item, in input order
    async fn errors(&self) -> Vec<String> {
        self.inner.errors.clone()
    }
}

pub struct CreateProductPayload {
    pub inner: ProductPayload,
}

#[Object]
impl CreateProductPayload {
    async fn product(&self) -> Option<super::product::Product> {
        self.inner.product.clone().map(Into::into)
    }

    async fn success(&self) -> bool {
        self.inner.success
    }

    async fn message(&self) -> &str {
        &self.inner.message
    }
}

pub struct CreateOrderPayload {
    pub inner: OrderPayload,
}

#[Object]
impl CreateOrderPayload {
    async fn order(&self) -> Option<super::order::Order> {
        self.inner.order.clone().map(Into::into)
    }

    async fn success(&self) -> bool {
        self.inner.success
    }

    async fn message(&self) -> &str {
        &self.inner.message
    }
}

/// Name and post-restock stock level of one updated product
pub struct ProductStock {
    pub name: String,
    pub stock: i32,
}

#[Object]
impl ProductStock {
    async fn name(&self) -> &str {
        &self.name
    }

    async fn stock(&self) -> i32 {
        self.stock
    }
}

pub struct UpdateLowStockPayload {
    pub inner: LowStockPayload,
}

#[Object]
impl UpdateLowStockPayload {
    async fn output(&self) -> Vec<ProductStock> {
        self.inner
            .updated
            .iter()
            .map(|p| ProductStock {
                name: p.name.clone(),
                stock: p.stock,
            })
            .collect()
    }

    async fn success(&self) -> bool {
        self.inner.success
    }

    async fn message(&self) -> &str {
        &self.inner.message
    }
}
