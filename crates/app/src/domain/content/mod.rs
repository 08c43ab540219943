//! Content

pub mod errors;
pub mod records;
pub mod service;

pub use errors::ContentServiceError;
pub use records::{ContentBlock, ContentRecord, lookup};
pub use service::*;
