use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::{
    Customer, CustomerFilterInput, CustomerPage, Order, OrderFilterInput, OrderPage, Product,
    ProductFilterInput, ProductPage,
};
use async_graphql::{Context, FieldResult, Object, ID};
use crm_core::ops::queries;
use uuid::Uuid;

/// Root query object for GraphQL
pub struct Query;

#[Object]
impl Query {
    /// Liveness probe used by the heartbeat job
    async fn hello(&self) -> &str {
        "Hello, GraphQL!"
    }

    /// Get a customer by ID
    async fn customer(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<Customer>> {
        let context = ctx.data::<GraphQLContext>()?;
        let customer_id = Uuid::parse_str(&id)?;

        match context.storage.get_customer_by_id(customer_id).await {
            Ok(customer) => Ok(customer.map(Into::into)),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all customers with optional filtering and pagination
    async fn all_customers(
        &self,
        ctx: &Context<'_>,
        filter: Option<CustomerFilterInput>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<CustomerPage> {
        let context = ctx.data::<GraphQLContext>()?;
        let filter = filter.unwrap_or_default().into();

        let page = queries::all_customers(
            context.storage.as_ref(),
            &filter,
            limit.map(|l| l.max(0) as usize),
            offset.map(|o| o.max(0) as usize),
        )
        .await?;
        Ok(CustomerPage { page })
    }

    /// Get a product by ID
    async fn product(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<Product>> {
        let context = ctx.data::<GraphQLContext>()?;
        let product_id = Uuid::parse_str(&id)?;

        match context.storage.get_product_by_id(product_id).await {
            Ok(product) => Ok(product.map(Into::into)),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all products with optional filtering and pagination
    async fn all_products(
        &self,
        ctx: &Context<'_>,
        filter: Option<ProductFilterInput>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<ProductPage> {
        let context = ctx.data::<GraphQLContext>()?;
        let filter = filter.unwrap_or_default().into();

        let page = queries::all_products(
            context.storage.as_ref(),
            &filter,
            limit.map(|l| l.max(0) as usize),
            offset.map(|o| o.max(0) as usize),
        )
        .await?;
        Ok(ProductPage { page })
    }

    /// Get an order by ID
    async fn order(&self, ctx: &Context<'_>, id: ID) -> FieldResult<Option<Order>> {
        let context = ctx.data::<GraphQLContext>()?;
        let order_id = Uuid::parse_str(&id)?;

        match context.storage.get_order_by_id(order_id).await {
            Ok(order) => Ok(order.map(Into::into)),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all orders with optional filtering and pagination
    async fn all_orders(
        &self,
        ctx: &Context<'_>,
        filter: Option<OrderFilterInput>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<OrderPage> {
        let context = ctx.data::<GraphQLContext>()?;
        let filter = filter.unwrap_or_default().into();

        let page = queries::all_orders(
            context.storage.as_ref(),
            &filter,
            limit.map(|l| l.max(0) as usize),
            offset.map(|o| o.max(0) as usize),
        )
        .await?;
        Ok(OrderPage { page })
    }
}
