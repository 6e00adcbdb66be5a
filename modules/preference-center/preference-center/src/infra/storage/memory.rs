use async_trait::async_trait;
use dashmap::DashMap;
use preference_center_sdk::UserPreference;

use crate::domain::repo::PreferenceRepository;

/// In-memory preference repository.
///
/// Used by tests and by ephemeral shells that do not persist preferences
/// across restarts. Infallible.
#[derive(Default)]
pub struct MemoryPreferenceRepository {
    entries: DashMap<String, UserPreference>,
}

impl MemoryPreferenceRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceRepository for MemoryPreferenceRepository {
    async fn get(&self, key: &str) -> anyhow::Result<Option<UserPreference>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, record: &UserPreference) -> anyhow::Result<()> {
        self.entries.insert(key.to_owned(), record.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
