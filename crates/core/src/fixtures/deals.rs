//! Deal Fixtures

use jiff::Timestamp;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    deals::{
        Deal, DealId, DealWindow, Lifecycle, Participation,
        time_left::{parse_time_left, resolve_window},
    },
    fixtures::FixtureError,
    locale::Localized,
    money::parse_price,
};

/// Deal Fixture
#[derive(Debug, Deserialize)]
pub struct DealFixture {
    /// Deal id
    pub id: String,

    /// English title
    pub title: String,

    /// Arabic title
    #[serde(default)]
    pub title_ar: String,

    /// English description
    #[serde(default)]
    pub description: String,

    /// Arabic description
    #[serde(default)]
    pub description_ar: String,

    /// Category tag
    #[serde(default)]
    pub category: String,

    /// Regular price (e.g., "499.00 SAR")
    pub regular_price: String,

    /// Deal price (e.g., "349.00 SAR")
    pub deal_price: String,

    /// Participants so far
    #[serde(default)]
    pub current: u32,

    /// Group threshold
    pub required: u32,

    /// Window relative to load time (e.g., "2 days", "-3 hours")
    #[serde(default)]
    pub expires_in: Option<String>,

    /// Server lifecycle
    #[serde(default)]
    pub lifecycle: Lifecycle,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
}

impl DealFixture {
    /// Build the deal, resolving the window against `reference`.
    ///
    /// A leading `-` on `expires_in` places the expiry in the past.
    ///
    /// # Errors
    ///
    /// Returns an error if either price is malformed.
    pub fn into_deal(self, reference: Timestamp) -> Result<Deal, FixtureError> {
        let (regular_minor, regular_currency) = parse_price(&self.regular_price)?;
        let (deal_minor, deal_currency) = parse_price(&self.deal_price)?;

        let window = match self.expires_in.as_deref().map(str::trim) {
            Some(label) if label.starts_with('-') => {
                past_window(label.trim_start_matches('-'), reference)
            }
            label => resolve_window(None, label, reference),
        };

        Ok(Deal {
            id: DealId::new(self.id),
            title: Localized::new(self.title, self.title_ar),
            description: Localized::new(self.description, self.description_ar),
            category: self.category,
            regular_price: Money::from_minor(regular_minor, regular_currency),
            deal_price: Money::from_minor(deal_minor, deal_currency),
            participants: Participation::new(self.current, self.required),
            window,
            lifecycle: self.lifecycle,
            image: self.image,
            seller_id: None,
        })
    }
}

fn past_window(label: &str, reference: Timestamp) -> DealWindow {
    parse_time_left(label, reference)
        .and_then(|ahead| reference.checked_sub(reference.duration_until(ahead)).ok())
        .map_or_else(|| DealWindow::Label(label.to_string()), DealWindow::Ends)
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    fn reference() -> Timestamp {
        Timestamp::from_second(1_790_000_000).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    fn fixture(expires_in: Option<&str>) -> DealFixture {
        DealFixture {
            id: "d".to_string(),
            title: "Desk".to_string(),
            title_ar: "مكتب".to_string(),
            description: String::new(),
            description_ar: String::new(),
            category: "office".to_string(),
            regular_price: "1200.00 SAR".to_string(),
            deal_price: "900.00 SAR".to_string(),
            current: 3,
            required: 6,
            expires_in: expires_in.map(str::to_string),
            lifecycle: Lifecycle::Active,
            image: None,
        }
    }

    #[test]
    fn future_windows_resolve_forwards() -> TestResult {
        let deal = fixture(Some("2 days")).into_deal(reference())?;

        assert_eq!(
            deal.window,
            DealWindow::Ends(reference().checked_add(SignedDuration::from_hours(48))?)
        );
        assert_eq!(deal.discount_percentage(), 25);

        Ok(())
    }

    #[test]
    fn negative_windows_resolve_backwards() -> TestResult {
        let deal = fixture(Some("-3 hours")).into_deal(reference())?;

        assert_eq!(
            deal.window,
            DealWindow::Ends(reference().checked_sub(SignedDuration::from_hours(3))?)
        );

        Ok(())
    }

    #[test]
    fn missing_window_is_unknown() -> TestResult {
        let deal = fixture(None).into_deal(reference())?;

        assert_eq!(deal.window, DealWindow::Unknown);

        Ok(())
    }
}
