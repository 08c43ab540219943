//! File-backed storage: one JSON file per key.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{Storage, StorageError, StorageKey};

/// Stores each key as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Store under `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|source| StorageError::Io { key, source })?;
        fs::write(self.path(key), value).map_err(|source| StorageError::Io { key, source })?;

        debug!(%key, bytes = value.len(), "stored value");

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::StorageExt;

    use super::*;

    #[test]
    fn writes_one_file_per_key() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("state"));

        storage.save(StorageKey::Token, "abc")?;

        let raw = fs::read_to_string(dir.path().join("state").join("jam3a_token.json"))?;

        assert_eq!(raw, "\"abc\"");
        assert_eq!(storage.load::<String>(StorageKey::Token)?.as_deref(), Some("abc"));

        Ok(())
    }

    #[test]
    fn missing_keys_read_as_none_and_remove_cleanly() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.read(StorageKey::Cart)?, None);

        storage.remove(StorageKey::Cart)?;
        storage.write(StorageKey::Cart, "[]")?;
        storage.remove(StorageKey::Cart)?;

        assert_eq!(storage.read(StorageKey::Cart)?, None);

        Ok(())
    }

    #[test]
    fn last_writer_wins() -> TestResult {
        let dir = tempfile::tempdir()?;
        let first = FileStorage::new(dir.path());
        let second = FileStorage::new(dir.path());

        first.write(StorageKey::Language, "\"en\"")?;
        second.write(StorageKey::Language, "\"ar\"")?;

        assert_eq!(first.read(StorageKey::Language)?.as_deref(), Some("\"ar\""));

        Ok(())
    }
}
