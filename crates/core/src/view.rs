//! Deal view
//!
//! Every screen that shows a deal renders a [`DealView`], so titles, prices, progress and
//! status read the same in the shop, the join screen and the personal deal list.

use jiff::Timestamp;

use crate::{
    deals::{Deal, DealId, DealStatus, time_left::time_left},
    locale::Language,
    money::format_amount,
};

/// Display projection of a deal at one instant, in one language.
#[derive(Debug, Clone, PartialEq)]
pub struct DealView {
    /// Deal identifier.
    pub id: DealId,

    /// Title in the chosen language.
    pub title: String,

    /// Category tag.
    pub category: String,

    /// Formatted regular price.
    pub regular_price: String,

    /// Formatted deal price.
    pub deal_price: String,

    /// Discount percentage, `0..=100`.
    pub discount: u8,

    /// Progress towards the threshold, `0.0..=1.0`.
    pub progress: f64,

    /// Participants text, e.g. `"4/5 joined"`.
    pub participants: String,

    /// Participants still needed.
    pub remaining: u32,

    /// Derived status.
    pub status: DealStatus,

    /// Status badge text.
    pub status_label: &'static str,

    /// Remaining-time text.
    pub time_left: String,

    /// Whether the join action is enabled.
    pub joinable: bool,
}

impl DealView {
    /// Project `deal` at `now` for `language`.
    #[must_use]
    pub fn new(deal: &Deal, now: Timestamp, language: Language) -> Self {
        let status = deal.status(now);
        let participants = deal.participants;

        let participants_text = match language {
            Language::English => {
                format!("{}/{} joined", participants.current, participants.required)
            }
            Language::Arabic => format!("انضم {}/{}", participants.current, participants.required),
        };

        Self {
            id: deal.id.clone(),
            title: deal.title.get(language).to_string(),
            category: deal.category.clone(),
            regular_price: format_amount(&deal.regular_price, language),
            deal_price: format_amount(&deal.deal_price, language),
            discount: deal.discount_percentage(),
            progress: deal.progress_ratio(),
            participants: participants_text,
            remaining: deal.remaining_participants(),
            status,
            status_label: status.label(language),
            time_left: time_left(deal, now, language),
            joinable: status.is_joinable(),
        }
    }

    /// Whole-percent progress, for progress bars.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "progress is clamped to the unit interval"
    )]
    pub fn progress_percent(&self) -> u8 {
        (self.progress * 100.0).round() as u8
    }
}
