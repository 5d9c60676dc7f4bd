use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
    CustomerInput, UpdateLowStockPayload,
};
use async_graphql::{Context, FieldResult, Object, ID};
use chrono::{DateTime, Utc};
use crm_core::ops::{mutations, NewCustomer};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Root mutation object for GraphQL
pub struct Mutation;

#[Object]
impl Mutation {
    /// Create a single customer after validating email, phone and uniqueness
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> FieldResult<CreateCustomerPayload> {
        let context = ctx.data::<GraphQLContext>()?;

        let inner = mutations::create_customer(
            context.storage.as_ref(),
            NewCustomer { name, email, phone },
        )
        .await?;
        Ok(CreateCustomerPayload { inner })
    }

    /// Create a batch of customers; bad items are skipped, not fatal
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        customers: Vec<CustomerInput>,
    ) -> FieldResult<BulkCreateCustomersPayload> {
        let context = ctx.data::<GraphQLContext>()?;

        let inputs = customers.into_iter().map(Into::into).collect();
        let inner =
            mutations::bulk_create_customers(context.storage.as_ref(), inputs).await?;
        Ok(BulkCreateCustomersPayload { inner })
    }

    /// Create a product; price must be positive, stock defaults to zero
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: Decimal,
        stock: Option<i32>,
    ) -> FieldResult<CreateProductPayload> {
        let context = ctx.data::<GraphQLContext>()?;

        let inner =
            mutations::create_product(context.storage.as_ref(), name, price, stock.unwrap_or(0))
                .await?;
        Ok(CreateProductPayload { inner })
    }

    /// Create an order atomically from an existing customer and products
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_id: ID,
        product_ids: Vec<ID>,
        order_date: Option<DateTime<Utc>>,
    ) -> FieldResult<CreateOrderPayload> {
        let context = ctx.data::<GraphQLContext>()?;

        let customer_id = Uuid::parse_str(&customer_id)?;
        let product_ids = product_ids
            .iter()
            .map(|id| Uuid::parse_str(id))
            .collect::<Result<Vec<_>, _>>()?;

        let inner = mutations::create_order(
            context.storage.as_ref(),
            customer_id,
            product_ids,
            order_date,
        )
        .await?;
        Ok(CreateOrderPayload { inner })
    }

    /// Restock every product below the configured threshold
    async fn update_low_stock_products(
        &self,
        ctx: &Context<'_>,
    ) -> FieldResult<UpdateLowStockPayload> {
        let context = ctx.data::<GraphQLContext>()?;

        let inner =
            mutations::update_low_stock(context.storage.as_ref(), context.low_stock_policy)
                .await?;
        Ok(UpdateLowStockPayload { inner })
    }
}
