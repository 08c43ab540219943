//! Checkout

use jam3a::validation::{PaymentMethod, ValidationErrors, validate_payment};
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{CartStore, CartStoreError},
    domain::orders::{NewOrder, Order, OrdersService, OrdersServiceError},
};

/// Checkout errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No payment method selected.
    #[error(transparent)]
    Invalid(ValidationErrors),

    /// The order could not be placed.
    #[error(transparent)]
    Orders(#[from] OrdersServiceError),

    /// The order was placed but the cart could not be emptied.
    #[error("order placed but the cart could not be cleared")]
    Cart(#[source] CartStoreError),
}

/// Place an order for everything in the cart and empty it.
///
/// The cart is only cleared once the backend has accepted the order; a failed order
/// leaves it untouched.
///
/// # Errors
///
/// - [`CheckoutError::Invalid`]: no payment method.
/// - [`CheckoutError::Orders`]: empty cart, or the backend refused the order.
/// - [`CheckoutError::Cart`]: the cart could not be saved after the order went through.
pub async fn checkout(
    cart: &mut CartStore,
    orders: &dyn OrdersService,
    payment: Option<PaymentMethod>,
) -> Result<Order, CheckoutError> {
    let Some(payment) = payment else {
        let mut errors = ValidationErrors::new();
        errors.check(validate_payment(None));

        return Err(CheckoutError::Invalid(errors));
    };

    let order = NewOrder::from_cart(cart.cart(), payment)?;
    let placed = orders.place_order(order).await?;

    cart.clear().map_err(CheckoutError::Cart)?;

    info!(order = %placed.id, "checkout complete");

    Ok(placed)
}
