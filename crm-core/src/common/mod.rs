pub mod error;

pub use error::{CrmError, Result};
