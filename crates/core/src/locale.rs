//! Locale
//!
//! The storefront speaks English and Arabic. Every user-facing string in the domain is
//! either a [`Localized`] value from the backend or a catalogue entry resolved per
//! [`Language`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English, left-to-right.
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,

    /// Arabic, right-to-left.
    #[serde(rename = "ar", alias = "arabic")]
    Arabic,
}

/// Text direction for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right.
    Ltr,

    /// Right to left.
    Rtl,
}

impl Language {
    /// Two-letter language code, as stored under `jam3a_language`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
        }
    }

    /// Writing direction.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::English => Direction::Ltr,
            Self::Arabic => Direction::Rtl,
        }
    }

    /// The other language, for the header toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::English => Self::Arabic,
            Self::Arabic => Self::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a language code is not `en` or `ar`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "ar" | "arabic" => Ok(Self::Arabic),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

/// A string carried in both languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    /// English text.
    #[serde(default)]
    pub en: String,

    /// Arabic text. May be empty when the backend has no translation.
    #[serde(default)]
    pub ar: String,
}

impl Localized {
    /// Build a value from both translations.
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Build a value that only has English text.
    pub fn english(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: String::new(),
        }
    }

    /// Resolve the text for `language`, falling back to whichever translation exists.
    #[must_use]
    pub fn get(&self, language: Language) -> &str {
        let (preferred, fallback) = match language {
            Language::English => (&self.en, &self.ar),
            Language::Arabic => (&self.ar, &self.en),
        };

        if preferred.trim().is_empty() {
            fallback
        } else {
            preferred
        }
    }

    /// `true` when the needle occurs in either translation, ignoring case.
    #[must_use]
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();

        self.en.to_lowercase().contains(&needle) || self.ar.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn arabic_falls_back_to_english_when_missing() {
        let title = Localized::english("Coffee machine");

        assert_eq!(title.get(Language::Arabic), "Coffee machine");
    }

    #[test]
    fn english_falls_back_to_arabic_when_missing() {
        let title = Localized::new("", "آلة قهوة");

        assert_eq!(title.get(Language::English), "آلة قهوة");
    }

    #[test]
    fn parses_codes_and_names() -> TestResult {
        assert_eq!("ar".parse::<Language>()?, Language::Arabic);
        assert_eq!("English".parse::<Language>()?, Language::English);
        assert!("fr".parse::<Language>().is_err());

        Ok(())
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(Language::Arabic.direction(), Direction::Rtl);
        assert_eq!(Language::English.toggled(), Language::Arabic);
    }

    #[test]
    fn search_matches_either_translation() {
        let title = Localized::new("Smart Watch", "ساعة ذكية");

        assert!(title.contains_ignore_case("watch"));
        assert!(title.contains_ignore_case("ذكية"));
        assert!(!title.contains_ignore_case("phone"));
    }
}
