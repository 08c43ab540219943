//! Deal records
//!
//! One adapter turns every deal shape the backend sends into the canonical [`Deal`]:
//! nested `participants { current, required }` or the flat counters, `expiresAt` or a
//! `timeLeft` label, and a plain or localised title.

use jam3a::{
    deals::{Deal, DealId, Lifecycle, Participation, time_left::resolve_window},
    locale::Localized,
    money::{amount_from_major, currency_from_code, default_currency},
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::wire;

/// Deal as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    /// Identifier, string or number.
    #[serde(default, alias = "_id")]
    pub id: Option<Value>,

    /// English (or only) title.
    #[serde(default)]
    pub title: Option<String>,

    /// Arabic title.
    #[serde(default)]
    pub title_ar: Option<String>,

    /// Both titles.
    #[serde(default)]
    pub title_localized: Option<Localized>,

    /// English description.
    #[serde(default)]
    pub description: Option<String>,

    /// Arabic description.
    #[serde(default)]
    pub description_ar: Option<String>,

    /// Category tag.
    #[serde(default)]
    pub category: Option<String>,

    /// Regular price in major units.
    #[serde(default)]
    pub regular_price: Option<Value>,

    /// Deal price in major units.
    #[serde(default)]
    pub deal_price: Option<Value>,

    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,

    /// Nested participant counters.
    #[serde(default)]
    pub participants: Option<ParticipantsRecord>,

    /// Flat current counter.
    #[serde(default)]
    pub current_participants: Option<Value>,

    /// Flat threshold.
    #[serde(default)]
    pub required_participants: Option<Value>,

    /// Threshold, as sent by group endpoints.
    #[serde(default)]
    pub target_size: Option<Value>,

    /// Threshold, as sent by older endpoints.
    #[serde(default)]
    pub max_participants: Option<Value>,

    /// RFC 3339 expiry.
    #[serde(default)]
    pub expires_at: Option<String>,

    /// Pre-formatted remaining time.
    #[serde(default)]
    pub time_left: Option<String>,

    /// Server lifecycle marker.
    #[serde(default)]
    pub status: Option<String>,

    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Seller identifier.
    #[serde(default)]
    pub seller_id: Option<Value>,
}

/// Nested participant counters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParticipantsRecord {
    /// Participants so far.
    #[serde(default)]
    pub current: Option<Value>,

    /// Threshold.
    #[serde(default)]
    pub required: Option<Value>,
}

impl DealRecord {
    /// Adapt to the canonical deal. `fetched_at` anchors relative `timeLeft` labels.
    #[must_use]
    pub fn into_deal(self, fetched_at: Timestamp) -> Deal {
        let currency = self
            .currency
            .as_deref()
            .and_then(currency_from_code)
            .unwrap_or_else(default_currency);

        let nested = self.participants.unwrap_or_default();

        let current = wire::count(nested.current.as_ref())
            .or_else(|| wire::count(self.current_participants.as_ref()))
            .unwrap_or(0);

        let required = wire::count(nested.required.as_ref())
            .or_else(|| wire::count(self.required_participants.as_ref()))
            .or_else(|| wire::count(self.target_size.as_ref()))
            .or_else(|| wire::count(self.max_participants.as_ref()))
            .unwrap_or(0);

        let localized = self.title_localized.unwrap_or_default();
        let title = Localized {
            en: wire::text(Some(localized.en))
                .or(wire::text(self.title))
                .unwrap_or_default(),
            ar: wire::text(Some(localized.ar))
                .or(wire::text(self.title_ar))
                .unwrap_or_default(),
        };

        let expires_at = self
            .expires_at
            .as_deref()
            .and_then(|at| at.trim().parse::<Timestamp>().ok());

        Deal {
            id: DealId::new(wire::id(self.id.as_ref())),
            title,
            description: Localized {
                en: wire::text(self.description).unwrap_or_default(),
                ar: wire::text(self.description_ar).unwrap_or_default(),
            },
            category: wire::text(self.category).unwrap_or_default(),
            regular_price: amount_from_major(
                wire::number(self.regular_price.as_ref()).unwrap_or(0.0),
                currency,
            ),
            deal_price: amount_from_major(
                wire::number(self.deal_price.as_ref()).unwrap_or(0.0),
                currency,
            ),
            participants: Participation::new(current, required),
            window: resolve_window(expires_at, self.time_left.as_deref(), fetched_at),
            lifecycle: lifecycle(self.status.as_deref()),
            image: wire::text(self.image),
            seller_id: Some(wire::id(self.seller_id.as_ref())).filter(|id| !id.is_empty()),
        }
    }
}

fn lifecycle(status: Option<&str>) -> Lifecycle {
    match status.map(|status| status.trim().to_ascii_lowercase()).as_deref() {
        Some("cancelled" | "canceled") => Lifecycle::Cancelled,
        Some("finalized" | "finalised" | "completed") => Lifecycle::Finalized,
        _ => Lifecycle::Active,
    }
}

/// Query for `GET /deals`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealFilter {
    /// Only deals in this category.
    pub category: Option<String>,

    /// Only deals the signed-in user has joined.
    pub joined: bool,
}

impl DealFilter {
    /// Query string pairs.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(category) = self.category.as_deref().map(str::trim)
            && !category.is_empty()
        {
            query.push(("category", category.to_string()));
        }

        if self.joined {
            query.push(("joined", "true".to_string()));
        }

        query
    }
}

/// Body of `PUT /deals/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealUpdate {
    /// New English title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New Arabic title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_ar: Option<String>,

    /// New deal price in major units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_price: Option<f64>,

    /// New threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_participants: Option<u32>,

    /// New expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
}

impl DealUpdate {
    /// `true` when nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use jam3a::deals::{DealStatus, DealWindow};
    use jiff::SignedDuration;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_second(1_760_000_000).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    fn adapt(value: Value) -> Result<Deal, serde_json::Error> {
        Ok(serde_json::from_value::<DealRecord>(value)?.into_deal(now()))
    }

    #[test]
    fn nested_and_flat_shapes_adapt_identically() -> TestResult {
        let nested = adapt(json!({
            "id": "d-1",
            "title": "Air Fryer",
            "regularPrice": 499,
            "dealPrice": 349,
            "participants": { "current": 4, "required": 5 },
            "expiresAt": "2025-10-10T12:00:00Z"
        }))?;

        let flat = adapt(json!({
            "_id": "d-1",
            "title": "Air Fryer",
            "regularPrice": "499",
            "dealPrice": 349.0,
            "currentParticipants": 4,
            "targetSize": 5,
            "expiresAt": "2025-10-10T12:00:00Z"
        }))?;

        assert_eq!(nested, flat);
        assert_eq!(nested.participants, Participation::new(4, 5));
        assert_eq!(nested.deal_price.to_minor_units(), 34_900);
        assert_eq!(nested.discount_percentage(), 30);

        Ok(())
    }

    #[test]
    fn threshold_aliases_are_tried_in_order() -> TestResult {
        let deal = adapt(json!({ "requiredParticipants": 6, "maxParticipants": 9 }))?;
        let legacy = adapt(json!({ "maxParticipants": 9 }))?;

        assert_eq!(deal.participants.required, 6);
        assert_eq!(legacy.participants.required, 9);

        Ok(())
    }

    #[test]
    fn missing_numbers_default_to_zero() -> TestResult {
        let deal = adapt(json!({ "id": 7, "title": "Mystery" }))?;

        assert_eq!(deal.id.as_str(), "7");
        assert_eq!(deal.participants, Participation::new(0, 0));
        assert_eq!(deal.deal_price.to_minor_units(), 0);
        assert_eq!(deal.discount_percentage(), 0);
        assert_eq!(deal.window, DealWindow::Unknown);

        Ok(())
    }

    #[test]
    fn time_left_labels_resolve_against_fetch_time() -> TestResult {
        let parsed = adapt(json!({ "timeLeft": "2 days" }))?;
        let opaque = adapt(json!({ "timeLeft": "soon" }))?;

        assert_eq!(
            parsed.window.expires_at(),
            Some(now().checked_add(SignedDuration::from_hours(48))?)
        );
        assert_eq!(opaque.window, DealWindow::Label("soon".to_string()));

        Ok(())
    }

    #[test]
    fn localized_titles_win_over_plain_fields() -> TestResult {
        let deal = adapt(json!({
            "title": "Kettle",
            "titleAr": "غلاية قديمة",
            "titleLocalized": { "en": "Electric Kettle", "ar": "غلاية كهربائية" }
        }))?;

        assert_eq!(deal.title, Localized::new("Electric Kettle", "غلاية كهربائية"));

        Ok(())
    }

    #[test]
    fn server_markers_set_the_lifecycle() -> TestResult {
        let cancelled = adapt(json!({
            "status": "Canceled",
            "participants": { "current": 1, "required": 3 }
        }))?;
        let finalized = adapt(json!({
            "status": "finalized",
            "participants": { "current": 3, "required": 3 }
        }))?;

        assert_eq!(cancelled.status(now()), DealStatus::Cancelled);
        assert_eq!(finalized.status(now()), DealStatus::Completed);

        Ok(())
    }

    #[test]
    fn readapting_a_record_is_stable() -> TestResult {
        let record: DealRecord = serde_json::from_value(json!({
            "id": "d-9",
            "title": "Dates Box",
            "regularPrice": 120,
            "dealPrice": 90,
            "participants": { "current": 2, "required": 4 },
            "timeLeft": "5 hours"
        }))?;

        let first = record.clone().into_deal(now());
        let second = record.into_deal(now());

        assert_eq!(first, second);
        assert_eq!(first.status(now()), second.status(now()));
        assert!((first.progress_ratio() - second.progress_ratio()).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn filters_build_query_pairs() {
        let filter = DealFilter {
            category: Some(" kitchen ".to_string()),
            joined: true,
        };

        assert_eq!(
            filter.query(),
            vec![
                ("category", "kitchen".to_string()),
                ("joined", "true".to_string())
            ]
        );
        assert!(DealFilter::default().query().is_empty());
    }

    #[test]
    fn updates_skip_unset_fields() -> TestResult {
        let update = DealUpdate {
            deal_price: Some(299.0),
            ..DealUpdate::default()
        };

        assert_eq!(serde_json::to_value(&update)?, json!({ "dealPrice": 299.0 }));
        assert!(DealUpdate::default().is_empty());

        Ok(())
    }
}
