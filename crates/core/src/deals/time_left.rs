//! Remaining time
//!
//! Some backend responses carry an absolute `expiresAt`, others a pre-formatted `timeLeft`
//! string such as `"2 days"` or `"3d 4h"`. Labels that can be read are resolved against the
//! fetch time so every deal ends up with the same window representation.

use std::sync::LazyLock;

use jiff::{SignedDuration, Timestamp};
use regex::Regex;

use crate::{
    deals::{Deal, DealWindow},
    locale::Language,
};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

const UNITS: &str = r"days?|d|hours?|hrs?|h|minutes?|mins?|m|أيام|ايام|يوم|ساعات|ساعة|دقائق|دقيقة";

static TIME_LEFT_PART: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)(\d+)\s*({UNITS})")).ok());

/// A label made only of duration parts, optionally separated by spaces or commas.
static TIME_LEFT_LABEL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^\s*(?:\d+\s*(?:{UNITS})[\s,]*)+$")).ok());

/// Resolve a `timeLeft` label to an absolute expiry, relative to `reference`.
///
/// Returns `None` unless the whole label reads as durations, so `"2 months"` or
/// `"1 week 2 days"` stay unparsed. Arabic-Indic digits are accepted.
#[must_use]
pub fn parse_time_left(label: &str, reference: Timestamp) -> Option<Timestamp> {
    let pattern = TIME_LEFT_PART.as_ref()?;
    let normalised = normalise_digits(label);

    if !TIME_LEFT_LABEL.as_ref()?.is_match(&normalised) {
        return None;
    }

    let mut seconds: i64 = 0;

    for captures in pattern.captures_iter(&normalised) {
        let amount: i64 = captures.get(1)?.as_str().parse().ok()?;
        let unit = captures.get(2)?.as_str().to_lowercase();

        let scale = match unit.as_str() {
            "d" | "day" | "days" | "يوم" | "أيام" | "ايام" => SECONDS_PER_DAY,
            "h" | "hr" | "hrs" | "hour" | "hours" | "ساعة" | "ساعات" => SECONDS_PER_HOUR,
            _ => SECONDS_PER_MINUTE,
        };

        seconds = seconds.checked_add(amount.checked_mul(scale)?)?;
    }

    reference
        .checked_add(SignedDuration::from_secs(seconds))
        .ok()
}

/// Build a window from whichever expiry representation the backend sent.
#[must_use]
pub fn resolve_window(
    expires_at: Option<Timestamp>,
    time_left: Option<&str>,
    fetched_at: Timestamp,
) -> DealWindow {
    if let Some(at) = expires_at {
        return DealWindow::Ends(at);
    }

    match time_left.map(str::trim).filter(|label| !label.is_empty()) {
        Some(label) => parse_time_left(label, fetched_at)
            .map_or_else(|| DealWindow::Label(label.to_string()), DealWindow::Ends),
        None => DealWindow::Unknown,
    }
}

/// Localised remaining-time text for a deal.
#[must_use]
pub fn time_left(deal: &Deal, now: Timestamp, language: Language) -> String {
    match &deal.window {
        DealWindow::Ends(at) => format_remaining(now.duration_until(*at), language),
        DealWindow::Label(label) => label.clone(),
        DealWindow::Unknown => String::new(),
    }
}

/// Format a remaining duration as days, hours and minutes.
///
/// Durations at or below zero read as "Ended".
#[must_use]
pub fn format_remaining(remaining: SignedDuration, language: Language) -> String {
    let total = remaining.as_secs();

    if total <= 0 {
        return match language {
            Language::English => "Ended".to_string(),
            Language::Arabic => "انتهت".to_string(),
        };
    }

    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    let (day_unit, hour_unit, minute_unit) = match language {
        Language::English => ("d", "h", "m"),
        Language::Arabic => (" يوم", " ساعة", " دقيقة"),
    };

    let parts: Vec<String> = if days > 0 {
        vec![format!("{days}{day_unit}"), format!("{hours}{hour_unit}")]
    } else if hours > 0 {
        vec![format!("{hours}{hour_unit}"), format!("{minutes}{minute_unit}")]
    } else {
        vec![format!("{}{minute_unit}", minutes.max(1))]
    };

    parts.join(" ")
}

fn normalise_digits(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from_digit(u32::from(c) - 0x0660, 10).unwrap_or(c),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::deals::test_support::*;

    use super::*;

    fn hours_after(reference: Timestamp, hours: i64) -> Option<Timestamp> {
        reference.checked_add(SignedDuration::from_hours(hours)).ok()
    }

    #[test]
    fn parses_single_unit_labels() {
        assert_eq!(parse_time_left("2 days", now()), hours_after(now(), 48));
        assert_eq!(parse_time_left("5 hours", now()), hours_after(now(), 5));
    }

    #[test]
    fn parses_compound_labels() {
        assert_eq!(parse_time_left("3d 4h", now()), hours_after(now(), 76));
    }

    #[test]
    fn parses_arabic_labels() {
        assert_eq!(parse_time_left("٢ يوم", now()), hours_after(now(), 48));
        assert_eq!(parse_time_left("3 ساعات", now()), hours_after(now(), 3));
    }

    #[test]
    fn rejects_labels_without_durations() {
        assert_eq!(parse_time_left("ending soon", now()), None);
    }

    #[test]
    fn unknown_units_are_not_read_as_minutes() {
        assert_eq!(parse_time_left("2 months", now()), None);
        assert_eq!(parse_time_left("3 mo", now()), None);
        assert_eq!(parse_time_left("1 week 2 days", now()), None);
        assert_eq!(
            resolve_window(None, Some("2 months"), now()),
            DealWindow::Label("2 months".to_string())
        );
    }

    #[test]
    fn separators_between_parts_are_allowed() {
        assert_eq!(parse_time_left("1 day, 2 hours", now()), hours_after(now(), 26));
        assert_eq!(parse_time_left("3d4h", now()), hours_after(now(), 76));
    }

    #[test]
    fn expires_at_takes_precedence_over_label() {
        let at = now();

        assert_eq!(
            resolve_window(Some(at), Some("2 days"), now()),
            DealWindow::Ends(at)
        );
    }

    #[test]
    fn unreadable_label_is_kept_verbatim() {
        assert_eq!(
            resolve_window(None, Some("  last chance "), now()),
            DealWindow::Label("last chance".to_string())
        );
        assert_eq!(resolve_window(None, Some(" "), now()), DealWindow::Unknown);
    }

    #[test]
    fn formats_days_and_hours() {
        let remaining = SignedDuration::from_hours(52);

        assert_eq!(format_remaining(remaining, Language::English), "2d 4h");
        assert_eq!(format_remaining(remaining, Language::Arabic), "2 يوم 4 ساعة");
    }

    #[test]
    fn formats_hours_and_minutes() {
        let remaining = SignedDuration::from_mins(125);

        assert_eq!(format_remaining(remaining, Language::English), "2h 5m");
    }

    #[test]
    fn past_windows_read_as_ended() {
        assert_eq!(
            format_remaining(SignedDuration::from_secs(-5), Language::English),
            "Ended"
        );
    }

    #[test]
    fn time_left_follows_window() {
        let deal = deal(1, 5, ends_in(3));

        assert_eq!(time_left(&deal, now(), Language::English), "3h 0m");
    }
}
