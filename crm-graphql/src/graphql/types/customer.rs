use async_graphql::{Object, ID};
use crm_core::domain::Customer as DomainCustomer;
use crm_core::ops::Page;

/// GraphQL representation of a Customer
#[derive(Clone)]
pub struct Customer {
    pub inner: DomainCustomer,
}

impl From<DomainCustomer> for Customer {
    fn from(customer: DomainCustomer) -> Self {
        Self { inner: customer }
    }
}

#[Object]
impl Customer {
    /// The unique identifier for the customer
    async fn id(&self) -> ID {
        ID(self.inner.id.unwrap_or_default().to_string())
    }

    /// The customer's display name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// The customer's email address, unique across the store
    async fn email(&self) -> &str {
        &self.inner.email
    }

    /// The customer's phone number, if one was provided
    async fn phone(&self) -> Option<&str> {
        self.inner.phone.as_deref()
    }

    /// When the customer was created
    async fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.inner.created_at
    }
}

/// One page of a filtered customer listing
pub struct CustomerPage {
    pub page: Page<DomainCustomer>,
}

#[Object]
impl CustomerPage {
    async fn items(&self) -> Vec<Customer> {
        self.page.items.iter().cloned().map(Into::into).collect()
    }

    /// Size of the whole filtered set, not the page slice
    async fn total_count(&self) -> i64 {
        self.page.total_count as i64
    }
}
