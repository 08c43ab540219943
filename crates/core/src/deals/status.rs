//! Deal Status

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    deals::{Deal, Lifecycle},
    locale::Language,
};

/// Derived lifecycle status of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    /// Accepting participants, threshold not yet met.
    Open,

    /// Threshold met, awaiting finalisation.
    Completing,

    /// Threshold met and finalised by the backend.
    Completed,

    /// Window closed before the threshold was met.
    Expired,

    /// Withdrawn.
    Cancelled,
}

impl DealStatus {
    /// Whether a user may still join a deal in this status.
    #[must_use]
    pub const fn is_joinable(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Whether the group threshold has been met.
    #[must_use]
    pub const fn is_successful(self) -> bool {
        matches!(self, Self::Completing | Self::Completed)
    }

    /// Badge text.
    #[must_use]
    pub const fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Open, Language::English) => "Open",
            (Self::Open, Language::Arabic) => "مفتوحة",
            (Self::Completing, Language::English) => "Completing",
            (Self::Completing, Language::Arabic) => "قيد الإكمال",
            (Self::Completed, Language::English) => "Completed",
            (Self::Completed, Language::Arabic) => "مكتملة",
            (Self::Expired, Language::English) => "Expired",
            (Self::Expired, Language::Arabic) => "منتهية",
            (Self::Cancelled, Language::English) => "Cancelled",
            (Self::Cancelled, Language::Arabic) => "ملغاة",
        }
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Language::English))
    }
}

/// Derive the status of `deal` at `now`.
///
/// The threshold check runs before the expiry check: a deal that reached its target is never
/// reported as expired, even once `now` has passed its expiry.
#[must_use]
pub fn compute_status(deal: &Deal, now: Timestamp) -> DealStatus {
    if deal.lifecycle == Lifecycle::Cancelled {
        return DealStatus::Cancelled;
    }

    if deal.participants.threshold_met() {
        return match deal.lifecycle {
            Lifecycle::Finalized => DealStatus::Completed,
            Lifecycle::Active | Lifecycle::Cancelled => DealStatus::Completing,
        };
    }

    if deal.window.has_ended(now) {
        return DealStatus::Expired;
    }

    DealStatus::Open
}

#[cfg(test)]
mod tests {
    use crate::deals::{DealWindow, test_support::*};

    use super::*;

    #[test]
    fn open_below_threshold_before_expiry() {
        assert_eq!(compute_status(&deal(4, 5, ends_in(2)), now()), DealStatus::Open);
    }

    #[test]
    fn completing_at_threshold() {
        assert_eq!(
            compute_status(&deal(5, 5, ends_in(2)), now()),
            DealStatus::Completing
        );
    }

    #[test]
    fn threshold_wins_over_expiry() {
        let status = compute_status(&deal(5, 5, ends_in(-3)), now());

        assert_eq!(status, DealStatus::Completing);
        assert_ne!(status, DealStatus::Expired);
    }

    #[test]
    fn over_target_still_completing() {
        assert_eq!(
            compute_status(&deal(7, 5, ends_in(-1)), now()),
            DealStatus::Completing
        );
    }

    #[test]
    fn expired_below_threshold_after_expiry() {
        assert_eq!(
            compute_status(&deal(2, 5, ends_in(-1)), now()),
            DealStatus::Expired
        );
    }

    #[test]
    fn expires_at_the_exact_instant() {
        assert_eq!(
            compute_status(&deal(2, 5, DealWindow::Ends(now())), now()),
            DealStatus::Expired
        );
    }

    #[test]
    fn finalized_deal_is_completed() {
        let mut deal = deal(5, 5, ends_in(-1));
        deal.lifecycle = Lifecycle::Finalized;

        assert_eq!(compute_status(&deal, now()), DealStatus::Completed);
    }

    #[test]
    fn cancelled_flag_overrides_derivation() {
        let mut deal = deal(5, 5, ends_in(2));
        deal.lifecycle = Lifecycle::Cancelled;

        assert_eq!(compute_status(&deal, now()), DealStatus::Cancelled);
    }

    #[test]
    fn unresolved_label_never_expires() {
        let deal = deal(1, 5, DealWindow::Label("ending soon".to_string()));

        assert_eq!(compute_status(&deal, now()), DealStatus::Open);
    }

    #[test]
    fn only_open_deals_are_joinable() {
        assert!(DealStatus::Open.is_joinable());
        assert!(!DealStatus::Completing.is_joinable());
        assert!(!DealStatus::Expired.is_joinable());
    }
}
