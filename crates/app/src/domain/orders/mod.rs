//! Orders

pub mod errors;
pub mod records;
pub mod service;

pub use errors::OrdersServiceError;
pub use records::{NewOrder, Order, OrderItem, OrderLine, OrderRecord};
pub use service::*;
