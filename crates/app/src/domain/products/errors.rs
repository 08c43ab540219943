//! Products service errors.

use thiserror::Error;

use crate::api::ApiError;

/// Products service errors.
#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// No product with that id.
    #[error("product not found")]
    NotFound,

    /// Transport or decoding failure, with nothing cached to fall back to.
    #[error("products request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for ProductsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
