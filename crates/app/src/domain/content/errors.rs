//! Content service errors.

use thiserror::Error;

use crate::api::ApiError;

/// Content service errors.
#[derive(Debug, Error)]
pub enum ContentServiceError {
    /// Transport or decoding failure, with nothing cached to fall back to.
    #[error("content request failed")]
    Api(#[from] ApiError),
}
