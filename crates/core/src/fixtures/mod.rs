//! Fixtures
//!
//! A bundled YAML catalog stands in for the backend in offline mode and in tests.
//! Fixture deals give their window as a relative `expires_in` label, resolved against the
//! load time, so the catalog never goes stale.

use std::{fs, path::Path};

use jiff::Timestamp;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    deals::Deal,
    fixtures::{deals::DealFixture, products::ProductFixture},
    money::PriceError,
    products::Product,
};

pub mod deals;
pub mod products;

const BUNDLED_CATALOG: &str = include_str!("../../fixtures/catalog.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Two entries share an identifier
    #[error("Duplicate fixture id: {0}")]
    DuplicateId(String),
}

/// Catalog file layout.
#[derive(Debug, Default, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    deals: Vec<DealFixture>,

    #[serde(default)]
    products: Vec<ProductFixture>,
}

/// A loaded catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixture {
    deals: Vec<Deal>,
    products: Vec<Product>,
}

impl Fixture {
    /// The catalog compiled into the crate, resolved against `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog is malformed.
    pub fn bundled(reference: Timestamp) -> Result<Self, FixtureError> {
        Self::from_yaml(BUNDLED_CATALOG, reference)
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>, reference: Timestamp) -> Result<Self, FixtureError> {
        let yaml = fs::read_to_string(path)?;

        Self::from_yaml(&yaml, reference)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML, invalid prices or duplicate ids.
    pub fn from_yaml(yaml: &str, reference: Timestamp) -> Result<Self, FixtureError> {
        let catalog: CatalogFixture = serde_norway::from_str(yaml)?;

        let deals = catalog
            .deals
            .into_iter()
            .map(|fixture| fixture.into_deal(reference))
            .collect::<Result<Vec<_>, _>>()?;

        let products = catalog
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        for (index, deal) in deals.iter().enumerate() {
            if deals.iter().skip(index + 1).any(|other| other.id == deal.id) {
                return Err(FixtureError::DuplicateId(deal.id.to_string()));
            }
        }

        for (index, product) in products.iter().enumerate() {
            if products.iter().skip(index + 1).any(|other| other.id == product.id) {
                return Err(FixtureError::DuplicateId(product.id.clone()));
            }
        }

        Ok(Self { deals, products })
    }

    /// Fixture deals, in file order.
    #[must_use]
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    /// Fixture products, in file order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Consume the fixture, returning its deals.
    #[must_use]
    pub fn into_deals(self) -> Vec<Deal> {
        self.deals
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::deals::DealStatus;

    use super::*;

    fn reference() -> Timestamp {
        Timestamp::from_second(1_790_000_000).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn bundled_catalog_loads() -> TestResult {
        let fixture = Fixture::bundled(reference())?;

        assert!(!fixture.deals().is_empty(), "bundled catalog has deals");
        assert!(!fixture.products().is_empty(), "bundled catalog has products");

        Ok(())
    }

    #[test]
    fn bundled_deals_have_arabic_titles() -> TestResult {
        let fixture = Fixture::bundled(reference())?;

        for deal in fixture.deals() {
            assert!(!deal.title.ar.is_empty(), "{} has no Arabic title", deal.id);
        }

        Ok(())
    }

    #[test]
    fn bundled_catalog_covers_open_and_finished_deals() -> TestResult {
        let fixture = Fixture::bundled(reference())?;
        let statuses: Vec<DealStatus> = fixture
            .deals()
            .iter()
            .map(|deal| deal.status(reference()))
            .collect();

        assert!(statuses.contains(&DealStatus::Open), "{statuses:?}");
        assert!(statuses.contains(&DealStatus::Completing), "{statuses:?}");

        Ok(())
    }

    #[test]
    fn rejects_duplicate_ids() {
        let yaml = r"
deals:
  - id: twin
    title: One
    regular_price: 10.00 SAR
    deal_price: 8.00 SAR
    required: 3
  - id: twin
    title: Two
    regular_price: 10.00 SAR
    deal_price: 8.00 SAR
    required: 3
";

        let result = Fixture::from_yaml(yaml, reference());

        assert!(
            matches!(result, Err(FixtureError::DuplicateId(ref id)) if id == "twin"),
            "expected duplicate id error, got {result:?}"
        );
    }

    #[test]
    fn rejects_unknown_currency() {
        let yaml = r"
products:
  - id: odd
    name: Odd
    price: 1.00 XYZ
";

        let result = Fixture::from_yaml(yaml, reference());

        assert!(
            matches!(
                result,
                Err(FixtureError::Price(PriceError::UnknownCurrency(ref code))) if code == "XYZ"
            ),
            "expected unknown currency, got {result:?}"
        );
    }
}
