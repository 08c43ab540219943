//! Deals service errors.

use thiserror::Error;

use crate::api::ApiError;

/// Deals service errors.
#[derive(Debug, Error)]
pub enum DealsServiceError {
    /// No deal with that id.
    #[error("deal not found")]
    NotFound,

    /// The action needs a signed-in user.
    #[error("sign in required")]
    Unauthorized {
        /// Route to the sign-in screen.
        redirect: &'static str,
    },

    /// The backend refused the request, e.g. the deal is already full.
    #[error("deal request rejected: {0}")]
    Rejected(String),

    /// The action needs the backend but the client runs offline.
    #[error("not available offline")]
    Offline,

    /// Transport or decoding failure.
    #[error("deals request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for DealsServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized { redirect } => Self::Unauthorized { redirect },
            error if error.is_not_found() => Self::NotFound,
            ApiError::Status {
                status, message, ..
            } if (400..500).contains(&status) => Self::Rejected(message),
            other => Self::Api(other),
        }
    }
}
