//! API errors.

use thiserror::Error;

use crate::session::SessionError;

/// Where the front end sends users whose session was rejected.
pub const LOGIN_PATH: &str = "/login";

/// Normalised failure of a backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, TLS, timeout).
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the session; it has already been purged locally.
    #[error("session expired, sign in again at {redirect}")]
    Unauthorized {
        /// Route to the sign-in screen.
        redirect: &'static str,
    },

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the error envelope or the raw body.
        message: String,
        /// Field-level details, when the backend sent any.
        errors: Option<serde_json::Value>,
    },

    /// The response body was not the expected JSON.
    #[error("invalid response body")]
    Decode(#[from] serde_json::Error),

    /// The response JSON did not have a recognised envelope.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The stored session could not be read.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status, when the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Transport(_) | Self::Decode(_) | Self::UnexpectedShape(_) | Self::Session(_) => {
                None
            }
        }
    }

    /// `true` for a 404 answer.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// `true` when no usable answer came back, so a cached copy may stand in.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Decode(_) | Self::UnexpectedShape(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Unauthorized { .. } | Self::Session(_) => false,
        }
    }
}
