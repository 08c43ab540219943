//! Deals
//!
//! A deal (a "Jam3a") is a group-buying offer: a product sold at a discounted price once
//! enough participants have joined before the deal window closes. [`Deal`] is the one
//! canonical shape used across the catalog, the join flow and the personal deal list,
//! whatever shape the backend happened to send.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{locale::Localized, money::Amount, pricing};

pub mod progress;
pub mod status;
pub mod time_left;

pub use progress::{progress_ratio, remaining_after_join, remaining_participants};
pub use status::{DealStatus, compute_status};

/// Opaque deal identifier assigned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(String);

impl DealId {
    /// Wrap a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DealId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DealId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Participant counts for a deal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    /// Participants that have joined so far.
    pub current: u32,

    /// Participants needed to unlock the deal price (the group threshold).
    pub required: u32,
}

impl Participation {
    /// Build a participation count.
    #[must_use]
    pub const fn new(current: u32, required: u32) -> Self {
        Self { current, required }
    }

    /// `true` once the group threshold has been met.
    #[must_use]
    pub const fn threshold_met(self) -> bool {
        self.current >= self.required
    }
}

/// When a deal stops accepting participants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DealWindow {
    /// Absolute expiry time.
    Ends(Timestamp),

    /// Pre-formatted remaining-time text that could not be resolved to a timestamp.
    Label(String),

    /// No expiry information.
    #[default]
    Unknown,
}

impl DealWindow {
    /// Expiry time, when known.
    #[must_use]
    pub fn expires_at(&self) -> Option<Timestamp> {
        match self {
            Self::Ends(at) => Some(*at),
            Self::Label(_) | Self::Unknown => None,
        }
    }

    /// `true` when the window has a known expiry at or before `now`.
    #[must_use]
    pub fn has_ended(&self, now: Timestamp) -> bool {
        self.expires_at().is_some_and(|at| now >= at)
    }
}

/// Server-side lifecycle marker.
///
/// The backend only reports the facts it owns: whether a deal was cancelled, or finalised
/// after reaching its target. Everything else about status is derived client-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Accepting participants.
    #[default]
    Active,

    /// Target reached and orders placed.
    Finalized,

    /// Withdrawn by the seller or an admin.
    Cancelled,
}

/// A group-buying deal.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    /// Backend identifier.
    pub id: DealId,

    /// Display name.
    pub title: Localized,

    /// Longer description, possibly empty.
    pub description: Localized,

    /// Category tag used for filtering.
    pub category: String,

    /// Price outside the group deal.
    pub regular_price: Amount,

    /// Price once the group threshold is reached.
    pub deal_price: Amount,

    /// Participant counts.
    pub participants: Participation,

    /// Deal window.
    pub window: DealWindow,

    /// Server lifecycle marker.
    pub lifecycle: Lifecycle,

    /// Product image URL.
    pub image: Option<String>,

    /// Seller offering the product.
    pub seller_id: Option<String>,
}

impl Deal {
    /// Discount percentage of the deal price against the regular price.
    #[must_use]
    pub fn discount_percentage(&self) -> u8 {
        pricing::discount_percentage(&self.regular_price, &self.deal_price)
    }

    /// Share of the group threshold reached, in `[0, 1]`.
    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        progress_ratio(self.participants.current, self.participants.required)
    }

    /// Derived status at `now`.
    #[must_use]
    pub fn status(&self, now: Timestamp) -> DealStatus {
        compute_status(self, now)
    }

    /// Participants still needed to reach the threshold.
    #[must_use]
    pub fn remaining_participants(&self) -> u32 {
        remaining_participants(self)
    }

    /// Participants still needed after the current user joins.
    #[must_use]
    pub fn remaining_after_join(&self) -> u32 {
        remaining_after_join(self)
    }

    /// Copy of this deal with the current user optimistically counted as a participant.
    ///
    /// Authoritative counts come from the next fetch; this only bridges the gap.
    #[must_use]
    pub fn with_joined_participant(&self) -> Self {
        let mut joined = self.clone();
        joined.participants.current = joined.participants.current.saturating_add(1);
        joined
    }
}
