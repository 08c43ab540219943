//! Content blocks
//!
//! Editable storefront copy (banners, taglines, notices) keyed by a dotted name.

use jam3a::locale::{Language, Localized};
use serde::{Deserialize, Serialize};

/// Content block as sent by the backend, and as cached under `jam3a_content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Block key, e.g. `home.banner`.
    #[serde(default, alias = "slug")]
    pub key: String,

    /// English text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Arabic text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_ar: Option<String>,

    /// Both texts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Localized>,
}

/// A piece of storefront copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Block key.
    pub key: String,

    /// Text in both languages.
    pub text: Localized,
}

impl From<ContentRecord> for ContentBlock {
    fn from(record: ContentRecord) -> Self {
        let localized = record.text.unwrap_or_default();

        let en = Some(localized.en)
            .filter(|text| !text.trim().is_empty())
            .or(record.value)
            .unwrap_or_default();
        let ar = Some(localized.ar)
            .filter(|text| !text.trim().is_empty())
            .or(record.value_ar)
            .unwrap_or_default();

        Self {
            key: record.key.trim().to_string(),
            text: Localized { en, ar },
        }
    }
}

/// Text of the block named `key`, in `language`.
#[must_use]
pub fn lookup<'a>(blocks: &'a [ContentBlock], key: &str, language: Language) -> Option<&'a str> {
    blocks
        .iter()
        .find(|block| block.key == key)
        .map(|block| block.text.get(language))
        .filter(|text| !text.is_empty())
}
