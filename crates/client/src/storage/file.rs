//! Directory-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. Every write lands in its own
//! uniquely named temporary sibling, created owner-only, and is renamed over
//! the target, so a reader never sees half a record and concurrent writers
//! never share a temporary file.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use tempfile::Builder;

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] persisting each key as a file in one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store records under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut tmp = Builder::new()
            .prefix(&format!(".{key}."))
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;

        // Last rename wins
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert!(store.get("directus_auth").unwrap().is_none());

        store.set("directus_auth", r#"{"a":1}"#).unwrap();
        store.set("directus_auth", r#"{"a":2}"#).unwrap();
        assert_eq!(
            store.get("directus_auth").unwrap().as_deref(),
            Some(r#"{"a":2}"#)
        );
        assert!(dir.path().join("nested/directus_auth.json").exists());
        assert_eq!(fs::read_dir(dir.path().join("nested")).unwrap().count(), 1);
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.remove("directus_auth").unwrap();
        store.set("directus_auth", "x").unwrap();
        store.remove("directus_auth").unwrap();
        assert!(store.get("directus_auth").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        for key in ["", "../escape", "a/b", "dot.key"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_concurrent_writers_all_succeed() {
        const THREADS: usize = 8;
        const WRITES: usize = 100;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        std::thread::scope(|scope| {
            for t in 0..THREADS {
                let store = &store;
                scope.spawn(move || {
                    for n in 0..WRITES {
                        store
                            .set("directus_auth", &format!(r#"{{"writer":{t},"n":{n}}}"#))
                            .unwrap();
                    }
                });
            }
        });

        // One intact record from some writer, no temporary files left behind
        let stored = store.get("directus_auth").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert!(value["writer"].as_u64().unwrap() < THREADS as u64);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_records_are_owner_only() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("directus_auth", "x").unwrap();

        let mode = fs::metadata(dir.path().join("directus_auth.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
