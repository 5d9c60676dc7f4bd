use crate::graphql::schema::GraphQLContext;
use async_graphql::{Context, FieldResult, Object, ID};
use crm_core::domain::Order as DomainOrder;
use crm_core::ops::Page;
use rust_decimal::Decimal;

/// GraphQL representation of an Order
#[derive(Clone)]
pub struct Order {
    pub inner: DomainOrder,
}

impl From<DomainOrder> for Order {
    fn from(order: DomainOrder) -> Self {
        Self { inner: order }
    }
}

#[Object]
impl Order {
    /// The unique identifier for the order
    async fn id(&self) -> ID {
        ID(self.inner.id.unwrap_or_default().to_string())
    }

    /// When the order was placed
    async fn order_date(&self) -> chrono::DateTime<chrono::Utc> {
        self.inner.order_date
    }

    /// Sum of the referenced products' prices at creation time
    async fn total_amount(&self) -> Decimal {
        self.inner.total_amount
    }

    /// The customer who placed this order
    async fn customer(&self, ctx: &Context<'_>) -> FieldResult<Option<super::customer::Customer>> {
        let context = ctx.data::<GraphQLContext>()?;

        // Use DataLoader to batch customer lookups
        match context.customer_loader.load_one(self.inner.customer_id).await {
            Ok(Some(customer)) => Ok(Some(customer.into())),
            Ok(None) => Ok(None),
            Err(e) => Err(async_graphql::Error::new(e)),
        }
    }

    /// Products included in this order
    async fn products(&self, ctx: &Context<'_>) -> FieldResult<Vec<super::product::Product>> {
        let context = ctx.data::<GraphQLContext>()?;

        // Use DataLoader to batch product lookups
        let products = context
            .product_loader
            .load_many(self.inner.product_ids.clone())
            .await
            .map_err(async_graphql::Error::new)?;

        // Convert to GraphQL types, preserving order and skipping missing products
        let mut result = Vec::new();
        for product_id in &self.inner.product_ids {
            if let Some(product) = products.get(product_id) {
                result.push(product.clone().into());
            }
        }

        Ok(result)
    }
}

/// One page of a filtered order listing
pub struct OrderPage {
    pub page: Page<DomainOrder>,
}

#[Object]
impl OrderPage {
    async fn items(&self) -> Vec<Order> {
        self.page.items.iter().cloned().map(Into::into).collect()
    }

    /// Size of the whole filtered set, not the page slice
    async fn total_count(&self) -> i64 {
        self.page.total_count as i64
    }
}
