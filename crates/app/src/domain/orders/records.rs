//! Order records.

use jam3a::{
    cart::Cart,
    deals::DealId,
    locale::Localized,
    money::{Amount, amount_from_major, currency_from_code, default_currency, major_units},
    validation::PaymentMethod,
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{orders::errors::OrdersServiceError, wire};

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Ordered items.
    pub items: Vec<OrderItem>,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Cart subtotal in major units.
    pub total: f64,

    /// ISO currency code of the total.
    pub currency: String,
}

/// One ordered item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product identifier.
    pub product_id: String,

    /// Deal the item was bought through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<DealId>,

    /// Units.
    pub quantity: u32,

    /// Unit price in major units.
    pub unit_price: f64,
}

impl NewOrder {
    /// Order for everything in `cart`.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::EmptyCart`]: nothing to order.
    /// - [`OrdersServiceError::Cart`]: a line has an unknown currency or currencies are mixed.
    pub fn from_cart(
        cart: &Cart,
        payment_method: PaymentMethod,
    ) -> Result<Self, OrdersServiceError> {
        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let subtotal = cart.subtotal()?;

        let items = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id.clone(),
                deal_id: line.deal_id.clone(),
                quantity: line.quantity,
                unit_price: major_units(&Amount::from_minor(
                    line.unit_price_minor,
                    subtotal.currency(),
                )),
            })
            .collect();

        Ok(Self {
            items,
            payment_method,
            total: major_units(&subtotal),
            currency: subtotal.currency().iso_alpha_code.to_string(),
        })
    }
}

/// Order as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Identifier, string or number.
    #[serde(default, alias = "_id")]
    pub id: Option<Value>,

    /// Ordered lines.
    #[serde(default, alias = "lines")]
    pub items: Vec<OrderLineRecord>,

    /// Order total in major units.
    #[serde(default)]
    pub total: Option<Value>,

    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,

    /// Fulfilment status.
    #[serde(default)]
    pub status: Option<String>,

    /// RFC 3339 creation time.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Order line as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRecord {
    /// Product identifier.
    #[serde(default)]
    pub product_id: Option<Value>,

    /// Product name.
    #[serde(default)]
    pub name: Option<String>,

    /// Arabic product name.
    #[serde(default)]
    pub name_ar: Option<String>,

    /// Units.
    #[serde(default)]
    pub quantity: Option<Value>,

    /// Unit price in major units.
    #[serde(default, alias = "price")]
    pub unit_price: Option<Value>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Backend identifier.
    pub id: String,

    /// Ordered lines.
    pub lines: Vec<OrderLine>,

    /// Amount charged.
    pub total: Amount,

    /// Fulfilment status.
    pub status: String,

    /// When the order was placed.
    pub created_at: Option<Timestamp>,
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Product identifier.
    pub product_id: String,

    /// Product name.
    pub name: Localized,

    /// Units.
    pub quantity: u32,

    /// Unit price.
    pub unit_price: Amount,
}

impl OrderRecord {
    /// Adapt to the domain order.
    #[must_use]
    pub fn into_order(self) -> Order {
        let currency = self
            .currency
            .as_deref()
            .and_then(currency_from_code)
            .unwrap_or_else(default_currency);

        Order {
            id: wire::id(self.id.as_ref()),
            lines: self
                .items
                .into_iter()
                .map(|line| OrderLine {
                    product_id: wire::id(line.product_id.as_ref()),
                    name: Localized {
                        en: wire::text(line.name).unwrap_or_default(),
                        ar: wire::text(line.name_ar).unwrap_or_default(),
                    },
                    quantity: wire::count(line.quantity.as_ref()).unwrap_or(0),
                    unit_price: amount_from_major(
                        wire::number(line.unit_price.as_ref()).unwrap_or(0.0),
                        currency,
                    ),
                })
                .collect(),
            total: amount_from_major(wire::number(self.total.as_ref()).unwrap_or(0.0), currency),
            status: wire::text(self.status).unwrap_or_else(|| "pending".to_string()),
            created_at: self
                .created_at
                .as_deref()
                .and_then(|at| at.trim().parse().ok()),
        }
    }
}
