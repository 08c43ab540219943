//! Products

pub mod errors;
mod fixture;
pub mod records;
pub mod service;

pub use errors::ProductsServiceError;
pub use fixture::FixtureProductsService;
pub use records::ProductRecord;
pub use service::*;
