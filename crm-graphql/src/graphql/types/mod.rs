pub mod customer;
pub mod inputs;
pub mod order;
pub mod payloads;
pub mod product;

pub use customer::{Customer, CustomerPage};
pub use inputs::{CustomerFilterInput, CustomerInput, OrderFilterInput, ProductFilterInput};
pub use order::{Order, OrderPage};
pub use payloads::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
    ProductStock, UpdateLowStockPayload,
};
pub use product::{Product, ProductPage};
