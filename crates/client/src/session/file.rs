//! Session store persisted as a JSON object on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use super::{SessionError, SessionStore};

type Entries = BTreeMap<String, String>;

/// Session store backed by a single JSON file.
///
/// The file holds a flat `{ "key": "value" }` object. A missing file is an
/// empty store; parent directories are created on first write. Writes go
/// to a sibling temp file that is then renamed over the original.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store backed by `path`. Nothing is touched until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Entries::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &Entries) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Load, apply `change`, and save while holding the write lock.
    ///
    /// An unreadable file is replaced rather than blocking logout.
    fn update(&self, change: impl FnOnce(&mut Entries)) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
            Entries::new()
        });
        change(&mut entries);
        self.save(&entries)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn set_many(&self, new_entries: Vec<(&str, String)>) -> Result<(), SessionError> {
        self.update(|entries| {
            for (key, value) in new_entries {
                entries.insert(key.to_owned(), value);
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), SessionError> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        assert!(store.get("auth_token").is_none());
    }

    #[test]
    fn test_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::new(&path);
        store
            .set_many(vec![
                ("auth_token", "jwt".to_string()),
                ("user", "{}".to_string()),
            ])
            .unwrap();
        assert!(path.exists());

        // A second store on the same path sees the same data.
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("auth_token").as_deref(), Some("jwt"));
        assert_eq!(reopened.get("user").as_deref(), Some("{}"));
    }

    #[test]
    fn test_remove_many_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        store.set("auth_token", "jwt".to_string()).unwrap();
        store.set("user", "{}".to_string()).unwrap();
        store.set("theme", "dark".to_string()).unwrap();

        store.remove_many(&["auth_token", "user"]).unwrap();

        assert!(store.get("auth_token").is_none());
        assert!(store.get("user").is_none());
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("auth_token").is_none());

        store.set("auth_token", "fresh".to_string()).unwrap();
        assert_eq!(store.get("auth_token").as_deref(), Some("fresh"));
    }
}
