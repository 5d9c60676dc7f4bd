use async_graphql::{Object, ID};
use crm_core::domain::Product as DomainProduct;
use crm_core::ops::Page;
use rust_decimal::Decimal;

/// GraphQL representation of a Product
#[derive(Clone)]
pub struct Product {
    pub inner: DomainProduct,
}

impl From<DomainProduct> for Product {
    fn from(product: DomainProduct) -> Self {
        Self { inner: product }
    }
}

#[Object]
impl Product {
    /// The unique identifier for the product
    async fn id(&self) -> ID {
        ID(self.inner.id.unwrap_or_default().to_string())
    }

    /// The product name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Unit price, strictly positive
    async fn price(&self) -> Decimal {
        self.inner.price
    }

    /// Units in stock; zero is a legal level
    async fn stock(&self) -> i32 {
        self.inner.stock
    }

    /// When the product was created
    async fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.inner.created_at
    }
}

/// One page of a filtered product listing
pub struct ProductPage {
    pub page: Page<DomainProduct>,
}

#[Object]
impl ProductPage {
    async fn items(&self) -> Vec<Product> {
        self.page.items.iter().cloned().map(Into::into).collect()
    }

    /// Size of the whole filtered set, not the page slice
    async fn total_count(&self) -> i64 {
        self.page.total_count as i64
    }
}
