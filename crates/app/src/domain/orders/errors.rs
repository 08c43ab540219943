//! Orders service errors.

use jam3a::cart::CartError;
use thiserror::Error;

use crate::api::ApiError;

/// Orders service errors.
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart could not be totalled.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The action needs a signed-in user.
    #[error("sign in required")]
    Unauthorized {
        /// Route to the sign-in screen.
        redirect: &'static str,
    },

    /// The backend refused the order, e.g. an item sold out.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// Transport or decoding failure.
    #[error("orders request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for OrdersServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized { redirect } => Self::Unauthorized { redirect },
            ApiError::Status {
                status, message, ..
            } if (400..500).contains(&status) => Self::Rejected(message),
            other => Self::Api(other),
        }
    }
}
