//! Response envelopes
//!
//! The backend wraps single entities as `{ data }` and lists either as `{ data: [...] }` or
//! as `{ <entities>, total, pages }`, sometimes nested inside `data`. Both are unwrapped
//! here so services only ever see the records.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::api::ApiError;

/// Fields a paged list may arrive under.
pub const LIST_FIELDS: [&str; 6] = ["deals", "products", "orders", "groups", "items", "data"];

/// One page of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page.
    pub items: Vec<T>,

    /// Total records across all pages, when reported.
    pub total: Option<u64>,

    /// Number of pages, when reported.
    pub pages: Option<u64>,
}

/// Error body `{ message, errors?, status? }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,

    /// Field-level details.
    #[serde(default)]
    pub errors: Option<Value>,

    /// Status echoed in the body.
    #[serde(default)]
    pub status: Option<u16>,
}

impl ErrorEnvelope {
    /// Parse an error body, falling back to the raw text as the message.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        serde_json::from_str::<Self>(body).unwrap_or_else(|_| Self {
            message: Some(body.trim().to_string()).filter(|text| !text.is_empty()),
            ..Self::default()
        })
    }
}

/// Decode a single entity from `{ data }` or a bare body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload is not a `T`.
pub fn single<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let payload = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            _ => Value::Object(map),
        },
        other => other,
    };

    Ok(serde_json::from_value(payload)?)
}

/// Decode a list from a bare array or any of the list envelopes.
///
/// # Errors
///
/// - [`ApiError::UnexpectedShape`]: no list field was found.
/// - [`ApiError::Decode`]: a record is not a `T`.
pub fn list<T: DeserializeOwned>(body: Value) -> Result<Page<T>, ApiError> {
    match body {
        Value::Array(_) => Ok(Page {
            items: serde_json::from_value(body)?,
            total: None,
            pages: None,
        }),
        Value::Object(map) => list_from_object(map),
        other => Err(ApiError::UnexpectedShape(format!(
            "expected a list, found {}",
            kind(&other)
        ))),
    }
}

fn list_from_object<T: DeserializeOwned>(mut map: Map<String, Value>) -> Result<Page<T>, ApiError> {
    let total = map.get("total").and_then(Value::as_u64);
    let pages = map.get("pages").and_then(Value::as_u64);

    let Some(field) = LIST_FIELDS.into_iter().find(|field| map.contains_key(*field)) else {
        return Err(ApiError::UnexpectedShape(
            "object has none of the list fields".to_string(),
        ));
    };

    let inner = map.remove(field).unwrap_or(Value::Null);

    let mut page = match inner {
        Value::Array(_) => Page {
            items: serde_json::from_value(inner)?,
            total: None,
            pages: None,
        },
        Value::Object(nested) => list_from_object(nested)?,
        other => {
            return Err(ApiError::UnexpectedShape(format!(
                "`{field}` is {}, not a list",
                kind(&other)
            )));
        }
    };

    page.total = page.total.or(total);
    page.pages = page.pages.or(pages);

    Ok(page)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
