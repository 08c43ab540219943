//! Cart
//!
//! The cart is a client-side list of product lines. It is persisted as JSON, so prices are
//! stored as minor units plus an ISO code rather than as [`Amount`] values.

use rusty_money::{Money, MoneyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    deals::DealId,
    locale::Localized,
    money::{Amount, currency_from_code, default_currency},
};

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// No line for the product.
    #[error("product {0} is not in the cart")]
    NotInCart(String),

    /// A stored line carries an unsupported currency code.
    #[error("unknown currency code in cart: {0}")]
    UnknownCurrency(String),

    /// Lines with different currencies cannot be summed.
    #[error("cart mixes currencies: {expected} and {found}")]
    MixedCurrency {
        /// Currency of the first line.
        expected: String,
        /// Conflicting currency.
        found: String,
    },

    /// Summing overflowed or otherwise failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier.
    pub product_id: String,

    /// Product name.
    #[serde(default)]
    pub name: Localized,

    /// Unit price in minor units.
    pub unit_price_minor: i64,

    /// ISO currency code of the unit price.
    pub currency: String,

    /// Units of the product.
    pub quantity: u32,

    /// Deal the line was added from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<DealId>,

    /// Product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartLine {
    /// Build a line from a unit price.
    #[must_use]
    pub fn new(product_id: impl Into<String>, name: Localized, unit_price: &Amount) -> Self {
        Self {
            product_id: product_id.into(),
            name,
            unit_price_minor: unit_price.to_minor_units(),
            currency: unit_price.currency().iso_alpha_code.to_string(),
            quantity: 1,
            deal_id: None,
            image: None,
        }
    }

    /// Set the quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Record the deal the line came from.
    #[must_use]
    pub fn with_deal(mut self, deal_id: DealId) -> Self {
        self.deal_id = Some(deal_id);
        self
    }

    /// Line total (unit price times quantity).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownCurrency`] for an unsupported stored code.
    pub fn total(&self) -> Result<Amount, CartError> {
        let currency = currency_from_code(&self.currency)
            .ok_or_else(|| CartError::UnknownCurrency(self.currency.clone()))?;

        let minor = self
            .unit_price_minor
            .saturating_mul(i64::from(self.quantity));

        Ok(Money::from_minor(minor, currency))
    }

    fn same_item(&self, other: &Self) -> bool {
        self.product_id == other.product_id && self.deal_id == other.deal_id
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    lines: Vec<CartLine>,
}

impl Cart {
    /// Empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// `true` when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across every line; this is the cart badge count.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Add a line, merging quantities with an existing line for the same product and deal.
    ///
    /// Zero-quantity lines are ignored.
    pub fn add(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }

        match self.lines.iter_mut().find(|existing| existing.same_item(&line)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => self.lines.push(line),
        }
    }

    /// Set a product's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] when no line has `product_id`.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(product_id).map(|_| ());
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        line.quantity = quantity;

        Ok(())
    }

    /// Remove every line for `product_id`, returning the first removed line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] when no line has `product_id`.
    pub fn remove(&mut self, product_id: &str) -> Result<CartLine, CartError> {
        let position = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.to_string()))?;

        let removed = self.lines.remove(position);
        self.lines.retain(|line| line.product_id != product_id);

        Ok(removed)
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of every line total. An empty cart totals zero in the default currency.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnknownCurrency`]: a line carries an unsupported code.
    /// - [`CartError::MixedCurrency`]: lines use different currencies.
    pub fn subtotal(&self) -> Result<Amount, CartError> {
        let mut lines = self.lines.iter();

        let Some(first) = lines.next() else {
            return Ok(Money::from_minor(0, default_currency()));
        };

        lines.try_fold(first.total()?, |subtotal, line| {
            let total = line.total()?;

            if total.currency().iso_alpha_code != subtotal.currency().iso_alpha_code {
                return Err(CartError::MixedCurrency {
                    expected: subtotal.currency().iso_alpha_code.to_string(),
                    found: total.currency().iso_alpha_code.to_string(),
                });
            }

            Ok(subtotal.add(total)?)
        })
    }
}
