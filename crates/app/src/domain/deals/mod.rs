//! Deals

pub mod errors;
mod fixture;
pub mod records;
pub mod service;

pub use errors::DealsServiceError;
pub use fixture::FixtureDealsService;
pub use records::{DealFilter, DealRecord, DealUpdate};
pub use service::*;
