//! Products

use crate::{cart::CartLine, locale::Localized, money::Amount};

/// A catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Backend identifier.
    pub id: String,

    /// Display name.
    pub name: Localized,

    /// Longer description, possibly empty.
    pub description: Localized,

    /// Category tag.
    pub category: String,

    /// Unit price.
    pub price: Amount,

    /// Product image URL.
    pub image: Option<String>,

    /// Units in stock, when the backend tracks stock.
    pub stock: Option<u32>,

    /// Seller offering the product.
    pub seller_id: Option<String>,
}

impl Product {
    /// Whether the product can be added to the cart.
    ///
    /// Products without stock tracking are always available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.is_none_or(|stock| stock > 0)
    }

    /// Single-unit cart line for this product.
    #[must_use]
    pub fn to_cart_line(&self) -> CartLine {
        let mut line = CartLine::new(self.id.clone(), self.name.clone(), &self.price);
        line.image.clone_from(&self.image);
        line
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::SAR};

    use super::*;

    fn product(stock: Option<u32>) -> Product {
        Product {
            id: "p-1".to_string(),
            name: Localized::new("Coffee Grinder", "مطحنة قهوة"),
            description: Localized::default(),
            category: "kitchen".to_string(),
            price: Money::from_minor(19_900, SAR),
            image: Some("/img/grinder.png".to_string()),
            stock,
            seller_id: None,
        }
    }

    #[test]
    fn untracked_stock_is_available() {
        assert!(product(None).in_stock());
        assert!(product(Some(3)).in_stock());
        assert!(!product(Some(0)).in_stock());
    }

    #[test]
    fn cart_line_carries_price_and_image() {
        let line = product(None).to_cart_line();

        assert_eq!(line.unit_price_minor, 19_900);
        assert_eq!(line.currency, "SAR");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.image.as_deref(), Some("/img/grinder.png"));
    }
}
