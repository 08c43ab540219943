//! Auth service errors.

use jam3a::validation::ValidationErrors;
use thiserror::Error;

use crate::{api::ApiError, session::SessionError};

/// Auth service errors.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Email and password did not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The action needs a signed-in user.
    #[error("sign in required")]
    Unauthorized {
        /// Route to the sign-in screen.
        redirect: &'static str,
    },

    /// The form failed validation before anything was sent.
    #[error(transparent)]
    Invalid(ValidationErrors),

    /// The backend refused the request, e.g. the email is already registered.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The session could not be stored.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Transport or decoding failure.
    #[error("auth request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for AuthServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized { redirect } => Self::Unauthorized { redirect },
            ApiError::Status {
                status, message, ..
            } if (400..500).contains(&status) => Self::Rejected(message),
            ApiError::Session(error) => Self::Session(error),
            other => Self::Api(other),
        }
    }
}
