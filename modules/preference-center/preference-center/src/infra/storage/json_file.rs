use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::RwLock;
use preference_center_sdk::UserPreference;
use thiserror::Error;

use crate::domain::repo::PreferenceRepository;

/// Errors raised by the file-backed repository.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The preference document could not be read or written.
    #[error("preference store i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The preference document is not valid JSON.
    #[error("preference store document malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// File-backed preference repository holding all records in one JSON
/// document, keyed by storage key.
///
/// The desktop/dev counterpart of the browser-storage helper the shell uses
/// in the field. The document stays resident; every write rewrites the file.
pub struct JsonFilePreferenceRepository {
    path: PathBuf,
    entries: RwLock<HashMap<String, UserPreference>>,
}

impl JsonFilePreferenceRepository {
    /// Open the document at `path`, starting empty when the file does not
    /// exist yet.
    ///
    /// # Errors
    /// Returns [`StorageError`] when the document exists but cannot be read
    /// or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Io(e)),
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, UserPreference>) -> Result<(), StorageError> {
        let doc = serde_json::to_vec_pretty(entries)?;
        std::fs::write(&self.path, doc)?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for JsonFilePreferenceRepository {
    async fn get(&self, key: &str) -> anyhow::Result<Option<UserPreference>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, record: &UserPreference) -> anyhow::Result<()> {
        let mut entries = self.entries.write();
        entries.insert(key.to_owned(), record.clone());
        self.flush(&entries)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}
