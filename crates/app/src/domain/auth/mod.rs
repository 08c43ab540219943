//! Auth

pub mod errors;
pub mod records;
pub mod service;

pub use errors::AuthServiceError;
pub use records::{ApplicationReceipt, Credentials, Registration};
pub use service::*;
