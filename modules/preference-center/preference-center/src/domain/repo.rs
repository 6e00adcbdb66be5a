use async_trait::async_trait;
use preference_center_sdk::UserPreference;

/// Key-value persistence port for stored user preference records.
///
/// Keys are opaque to implementations; the service derives them from the
/// active (tenant, user) pair and guarantees uniqueness per pair. Repository
/// errors never reach consumers of the module; the service logs and swallows
/// them.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Read the record stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error when the underlying store cannot be read.
    async fn get(&self, key: &str) -> anyhow::Result<Option<UserPreference>>;

    /// Store `record` under `key`, replacing any previous record.
    ///
    /// # Errors
    /// Returns an error when the underlying store cannot be written.
    async fn set(&self, key: &str, record: &UserPreference) -> anyhow::Result<()>;

    /// Remove the record stored under `key`. Removing a missing key is not
    /// an error.
    ///
    /// # Errors
    /// Returns an error when the underlying store cannot be written.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
