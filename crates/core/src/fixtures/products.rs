//! Product Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{fixtures::FixtureError, locale::Localized, money::parse_price, products::Product};

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// English name
    pub name: String,

    /// Arabic name
    #[serde(default)]
    pub name_ar: String,

    /// Category tag
    #[serde(default)]
    pub category: String,

    /// Product price (e.g., "199.00 SAR")
    pub price: String,

    /// Units in stock
    #[serde(default)]
    pub stock: Option<u32>,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product {
            id: fixture.id,
            name: Localized::new(fixture.name, fixture.name_ar),
            description: Localized::default(),
            category: fixture.category,
            price: Money::from_minor(minor_units, currency),
            image: fixture.image,
            stock: fixture.stock,
            seller_id: None,
        })
    }
}
