//! Product records.

use jam3a::{
    locale::Localized,
    money::{amount_from_major, currency_from_code, default_currency},
    products::Product,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::wire;

/// Product as sent by the backend, and as cached under `jam3a_products`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Identifier, string or number.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// English (or only) name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Arabic name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,

    /// English description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Arabic description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,

    /// Category tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Unit price in major units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,

    /// ISO currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Units in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Value>,

    /// Seller identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<Value>,
}

impl ProductRecord {
    /// Category tag, trimmed.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_deref().map_or("", str::trim)
    }

    /// Adapt to the domain product.
    #[must_use]
    pub fn into_product(self) -> Product {
        let currency = self
            .currency
            .as_deref()
            .and_then(currency_from_code)
            .unwrap_or_else(default_currency);

        Product {
            id: wire::id(self.id.as_ref()),
            name: Localized {
                en: wire::text(self.name).unwrap_or_default(),
                ar: wire::text(self.name_ar).unwrap_or_default(),
            },
            description: Localized {
                en: wire::text(self.description).unwrap_or_default(),
                ar: wire::text(self.description_ar).unwrap_or_default(),
            },
            category: wire::text(self.category).unwrap_or_default(),
            price: amount_from_major(wire::number(self.price.as_ref()).unwrap_or(0.0), currency),
            image: wire::text(self.image),
            stock: wire::count(self.stock.as_ref()),
            seller_id: Some(wire::id(self.seller_id.as_ref())).filter(|id| !id.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn adapts_loose_records() -> TestResult {
        let record: ProductRecord = serde_json::from_value(json!({
            "_id": 12,
            "name": "Prayer Mat",
            "nameAr": "سجادة صلاة",
            "price": "79.5",
            "stock": 3,
            "category": " home "
        }))?;

        assert_eq!(record.category(), "home");

        let product = record.into_product();

        assert_eq!(product.id, "12");
        assert_eq!(product.name.get(jam3a::locale::Language::Arabic), "سجادة صلاة");
        assert_eq!(product.price.to_minor_units(), 7_950);
        assert_eq!(product.stock, Some(3));
        assert!(product.in_stock());

        Ok(())
    }

    #[test]
    fn cached_records_round_trip() -> TestResult {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": "p-1",
            "name": "Kettle",
            "price": 99
        }))?;

        let cached = serde_json::to_string(&record)?;
        let restored: ProductRecord = serde_json::from_str(&cached)?;

        assert_eq!(restored, record);

        Ok(())
    }
}
