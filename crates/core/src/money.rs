//! Money helpers
//!
//! Prices arrive from the backend as JSON numbers in major units and leave the domain as
//! localised display strings. Everything in between is held as [`Amount`] in minor units.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::locale::Language;

/// A money amount in one of the supported ISO currencies.
pub type Amount = Money<'static, Currency>;

/// Currency used when the backend does not send one.
#[must_use]
pub fn default_currency() -> &'static Currency {
    iso::SAR
}

/// Errors raised while converting prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount could not be represented in minor units.
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),

    /// The currency code is not one the storefront trades in.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by its ISO alpha code.
#[must_use]
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code.trim().to_ascii_uppercase().as_str() {
        "SAR" => Some(iso::SAR),
        "AED" => Some(iso::AED),
        "KWD" => Some(iso::KWD),
        "BHD" => Some(iso::BHD),
        "QAR" => Some(iso::QAR),
        "OMR" => Some(iso::OMR),
        "USD" => Some(iso::USD),
        "EUR" => Some(iso::EUR),
        "GBP" => Some(iso::GBP),
        _ => None,
    }
}

/// Convert a major-unit amount (e.g. `149.5`) into minor units for `currency`.
///
/// Non-finite input and negative amounts are treated as zero, matching how the storefront
/// treats missing numeric fields.
#[must_use]
pub fn minor_from_major(major: f64, currency: &Currency) -> i64 {
    let Some(major) = Decimal::from_f64(major) else {
        return 0;
    };

    if major.is_sign_negative() {
        return 0;
    }

    let scale = Decimal::from(10_u64.pow(currency.exponent));

    major
        .checked_mul(scale)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .unwrap_or(0)
}

/// Build an [`Amount`] from a major-unit amount.
#[must_use]
pub fn amount_from_major(major: f64, currency: &'static Currency) -> Amount {
    Money::from_minor(minor_from_major(major, currency), currency)
}

/// Parse a price string such as `"149.00 SAR"` into minor units and a currency.
///
/// # Errors
///
/// - [`PriceError::InvalidAmount`]: the string is not `AMOUNT CURRENCY` or the amount
///   does not fit in minor units.
/// - [`PriceError::UnknownCurrency`]: the currency code is not supported.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::InvalidAmount(s.to_string()));
    };

    let currency =
        currency_from_code(code).ok_or_else(|| PriceError::UnknownCurrency(code.to_string()))?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidAmount(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(PriceError::InvalidAmount(s.to_string()));
    }

    let minor = amount
        .checked_mul(Decimal::from(10_u64.pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::InvalidAmount(s.to_string()))?;

    Ok((minor, currency))
}

/// Major-unit value of `amount`, as the backend expects prices on the wire.
#[must_use]
pub fn major_units(amount: &Amount) -> f64 {
    Decimal::new(amount.to_minor_units(), amount.currency().exponent)
        .to_f64()
        .unwrap_or(0.0)
}

/// Render an amount for display in the given language.
///
/// Riyal amounts use the local `ر.س` suffix in Arabic; every other currency falls back to its
/// ISO code.
#[must_use]
pub fn format_amount(amount: &Amount, language: Language) -> String {
    let currency = amount.currency();
    let major = Decimal::new(amount.to_minor_units(), currency.exponent);

    match (language, currency.iso_alpha_code) {
        (Language::Arabic, "SAR") => format!("{major} ر.س"),
        _ => format!("{major} {}", currency.iso_alpha_code),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn minor_from_major_rounds_half_away_from_zero() {
        assert_eq!(minor_from_major(10.125, iso::SAR), 1013);
        assert_eq!(minor_from_major(10.0, iso::SAR), 1000);
    }

    #[test]
    fn minor_from_major_treats_garbage_as_zero() {
        assert_eq!(minor_from_major(f64::NAN, iso::SAR), 0);
        assert_eq!(minor_from_major(-4.0, iso::SAR), 0);
    }

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        let (minor, currency) = parse_price("149.50 SAR")?;

        assert_eq!(minor, 14950);
        assert_eq!(currency.iso_alpha_code, "SAR");

        Ok(())
    }

    #[test]
    fn parse_price_rejects_missing_currency() {
        assert!(matches!(
            parse_price("149.50"),
            Err(PriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("1.00 ABC");

        assert!(matches!(result, Err(PriceError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn major_units_reverse_minor_conversion() {
        let amount = Money::from_minor(34_950, iso::SAR);

        assert!((major_units(&amount) - 349.5).abs() < f64::EPSILON, "expected 349.5");
        assert!(
            (major_units(&amount_from_major(12.25, iso::SAR)) - 12.25).abs() < f64::EPSILON,
            "expected 12.25"
        );
    }

    #[test]
    fn format_amount_localises_riyal_suffix() {
        let amount = Money::from_minor(14950, iso::SAR);

        assert_eq!(format_amount(&amount, Language::English), "149.50 SAR");
        assert_eq!(format_amount(&amount, Language::Arabic), "149.50 ر.س");
    }
}
