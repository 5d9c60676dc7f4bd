pub mod common;
pub mod domain;
pub mod ops;
pub mod storage;

pub use domain::*;
