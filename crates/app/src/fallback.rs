//! Cached fallbacks
//!
//! Products and content are cached after every successful fetch. When the backend is
//! unreachable the cached copy is served instead and flagged as [`Origin::Cached`], which
//! the front end renders as a fallback banner.

use jam3a::locale::Language;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    api::ApiError,
    storage::{Storage, StorageExt, StorageKey},
};

/// Where a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fresh from the backend.
    Network,

    /// Served from the local cache.
    Cached,
}

/// A value and its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// The value.
    pub value: T,

    /// Where it came from.
    pub origin: Origin,
}

impl<T> Fetched<T> {
    /// Fresh value.
    pub const fn network(value: T) -> Self {
        Self {
            value,
            origin: Origin::Network,
        }
    }

    /// Cached value.
    pub const fn cached(value: T) -> Self {
        Self {
            value,
            origin: Origin::Cached,
        }
    }

    /// `true` when served from the cache.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.origin == Origin::Cached
    }

    /// Transform the value, keeping the origin.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            value: f(self.value),
            origin: self.origin,
        }
    }
}

/// Banner text shown above cached data.
#[must_use]
pub const fn fallback_banner(language: Language) -> &'static str {
    match language {
        Language::English => "You're offline. Showing the last saved copy.",
        Language::Arabic => "أنت غير متصل. نعرض آخر نسخة محفوظة.",
    }
}

/// Cache a successful fetch under `key`, or fall back to the cached copy when the backend
/// was unavailable.
///
/// Cache write failures are logged and do not fail the fetch.
///
/// # Errors
///
/// Returns the original error when the backend answered with an error, or when nothing
/// usable is cached.
pub fn cache_or_fallback<T>(
    storage: &dyn Storage,
    key: StorageKey,
    result: Result<T, ApiError>,
) -> Result<Fetched<T>, ApiError>
where
    T: Serialize + DeserializeOwned,
{
    match result {
        Ok(value) => {
            if let Err(error) = storage.save(key, &value) {
                warn!(%key, %error, "failed to refresh cache");
            } else {
                debug!(%key, "cache refreshed");
            }

            Ok(Fetched::network(value))
        }
        Err(error) if error.is_unavailable() => match storage.load::<T>(key) {
            Ok(Some(cached)) => {
                warn!(%key, %error, "backend unavailable, serving cached copy");
                Ok(Fetched::cached(cached))
            }
            Ok(None) => Err(error),
            Err(cache_error) => {
                warn!(%key, error = %cache_error, "cached copy unreadable");
                Err(error)
            }
        },
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    fn unavailable() -> ApiError {
        ApiError::UnexpectedShape("connection reset".to_string())
    }

    #[test]
    fn success_refreshes_the_cache() -> TestResult {
        let storage = MemoryStorage::new();

        let fetched = cache_or_fallback(&storage, StorageKey::Products, Ok(vec![1, 2, 3]))?;

        assert_eq!(fetched, Fetched::network(vec![1, 2, 3]));
        assert_eq!(storage.load::<Vec<i32>>(StorageKey::Products)?, Some(vec![1, 2, 3]));

        Ok(())
    }

    #[test]
    fn network_failure_serves_the_cached_copy() -> TestResult {
        let storage = MemoryStorage::new();
        storage.save(StorageKey::Products, &vec![7])?;

        let fetched = cache_or_fallback::<Vec<i32>>(&storage, StorageKey::Products, Err(unavailable()))?;

        assert!(fetched.is_cached(), "expected the cached copy");
        assert_eq!(fetched.value, vec![7]);

        Ok(())
    }

    #[test]
    fn failure_without_cache_is_an_error() {
        let storage = MemoryStorage::new();

        let result = cache_or_fallback::<Vec<i32>>(&storage, StorageKey::Content, Err(unavailable()));

        assert!(result.is_err(), "nothing cached to fall back to");
    }

    #[test]
    fn client_errors_do_not_fall_back() -> TestResult {
        let storage = MemoryStorage::new();
        storage.save(StorageKey::Products, &vec![7])?;

        let result = cache_or_fallback::<Vec<i32>>(
            &storage,
            StorageKey::Products,
            Err(ApiError::Status {
                status: 400,
                message: "bad category".to_string(),
                errors: None,
            }),
        );

        assert!(
            matches!(result, Err(ApiError::Status { status: 400, .. })),
            "a 400 is an answer, not an outage"
        );

        Ok(())
    }
}
