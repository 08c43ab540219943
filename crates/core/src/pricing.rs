//! Pricing

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::MoneyError;

use crate::money::Amount;

/// Discount of `deal` relative to `regular`, as a whole percentage in `0..=100`.
///
/// Computes `round((regular - deal) / regular * 100)` with halves rounded away from zero.
/// A zero or negative regular price yields `0` rather than dividing by zero, and a deal
/// price above the regular price (or below zero) is clamped into range.
#[must_use]
pub fn discount_percentage_minor(regular_minor: i64, deal_minor: i64) -> u8 {
    if regular_minor <= 0 {
        return 0;
    }

    let deal_minor = deal_minor.clamp(0, regular_minor);

    let (Some(regular), Some(deal)) =
        (Decimal::from_i64(regular_minor), Decimal::from_i64(deal_minor))
    else {
        return 0;
    };

    ((regular - deal) * Decimal::ONE_HUNDRED)
        .checked_div(regular)
        .map(|ratio| ratio.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|ratio| ratio.to_u8())
        .map_or(0, |percent| percent.min(100))
}

/// Discount percentage between two amounts.
///
/// Amounts in different currencies cannot be compared and yield `0`.
#[must_use]
pub fn discount_percentage(regular: &Amount, deal: &Amount) -> u8 {
    if regular.currency().iso_alpha_code != deal.currency().iso_alpha_code {
        return 0;
    }

    discount_percentage_minor(regular.to_minor_units(), deal.to_minor_units())
}

/// Amount saved by buying at the deal price.
///
/// # Errors
///
/// Returns a [`MoneyError`] if the amounts are in different currencies.
pub fn savings(regular: &Amount, deal: &Amount) -> Result<Amount, MoneyError> {
    regular.sub(*deal)
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::SAR, iso::USD};

    use super::*;

    #[test]
    fn full_price_has_no_discount() {
        assert_eq!(discount_percentage_minor(100, 100), 0);
    }

    #[test]
    fn half_price_is_fifty_percent() {
        assert_eq!(discount_percentage_minor(100, 50), 50);
    }

    #[test]
    fn free_is_one_hundred_percent() {
        assert_eq!(discount_percentage_minor(100, 0), 100);
    }

    #[test]
    fn rounds_to_nearest_whole_percent() {
        // 1 - 199/299 = 33.44%
        assert_eq!(discount_percentage_minor(29_900, 19_900), 33);
        // 1 - 1/8 = 87.5% rounds up
        assert_eq!(discount_percentage_minor(800, 100), 88);
    }

    #[test]
    fn zero_regular_price_is_guarded() {
        assert_eq!(discount_percentage_minor(0, 0), 0);
        assert_eq!(discount_percentage_minor(0, 50), 0);
    }

    #[test]
    fn deal_above_regular_clamps_to_zero() {
        assert_eq!(discount_percentage_minor(100, 150), 0);
    }

    #[test]
    fn every_valid_pair_stays_in_range() {
        for regular in [1_i64, 7, 99, 100, 1_000, 123_456] {
            for deal in [0, 1, regular / 3, regular / 2, regular - 1, regular] {
                let percent = discount_percentage_minor(regular, deal);

                assert!(percent <= 100, "{regular}/{deal} gave {percent}");
            }
        }
    }

    #[test]
    fn mixed_currencies_have_no_discount() {
        let regular = Money::from_minor(10_000, SAR);
        let deal = Money::from_minor(5_000, USD);

        assert_eq!(discount_percentage(&regular, &deal), 0);
    }

    #[test]
    fn savings_subtracts_deal_from_regular() -> Result<(), MoneyError> {
        let regular = Money::from_minor(29_900, SAR);
        let deal = Money::from_minor(19_900, SAR);

        assert_eq!(savings(&regular, &deal)?, Money::from_minor(10_000, SAR));

        Ok(())
    }
}
