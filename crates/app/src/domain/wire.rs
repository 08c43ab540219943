//! Loose wire values shared by the record adapters.
//!
//! The backend is inconsistent about types: identifiers arrive as strings or numbers and
//! numeric fields sometimes as strings. Missing or unreadable numbers count as zero.

use serde_json::Value;

/// Identifier as a string, whatever JSON type it arrived as.
pub(crate) fn id(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

/// Number from a JSON number or numeric string.
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };

    number.filter(|number| number.is_finite())
}

/// Non-negative count; absent, negative or unreadable values are zero.
pub(crate) fn count(value: Option<&Value>) -> Option<u32> {
    number(value).map(|number| {
        if number <= 0.0 {
            0
        } else if number >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            truncate(number.round())
        }
    })
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "callers clamp to the u32 range first"
)]
fn truncate(number: f64) -> u32 {
    number as u32
}

/// Optional non-empty string.
pub(crate) fn text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ids_accept_strings_and_numbers() {
        assert_eq!(id(Some(&json!("abc"))), "abc");
        assert_eq!(id(Some(&json!(42))), "42");
        assert_eq!(id(None), "");
    }

    #[test]
    fn counts_clamp_and_round() {
        assert_eq!(count(Some(&json!(4))), Some(4));
        assert_eq!(count(Some(&json!("5"))), Some(5));
        assert_eq!(count(Some(&json!(2.6))), Some(3));
        assert_eq!(count(Some(&json!(-3))), Some(0));
        assert_eq!(count(Some(&json!(true))), None);
        assert_eq!(count(None), None);
    }
}
