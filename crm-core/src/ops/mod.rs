pub mod mutations;
pub mod queries;

pub use mutations::{
    BulkCustomersPayload, CustomerPayload, LowStockPayload, LowStockPolicy, NewCustomer,
    OrderPayload, ProductPayload,
};
pub use queries::{CrmReport, Page};
