use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::Utc;
use preference_center_sdk::{
    Branding, EffectivePreference, NotificationOverrides, NotificationSettings, SystemDefaults,
    UserPreference,
};
use shell_identity::IdentityContext;
use tokio::sync::watch;
use uuid::Uuid;

use super::repo::PreferenceRepository;
use super::resolver;
use super::tenant_store::TenantPreferenceStore;
use crate::config::PreferenceCenterConfig;

/// The preference resolution engine.
///
/// Merges system defaults, the loaded tenant record, and the stored user
/// record into one effective view, and owns all writes to the user tier.
/// Reads are synchronous over resident state; mutations touch storage and are
/// therefore async.
///
/// Nothing here fails: a missing identity degrades every mutation to a no-op,
/// a rejected language is signalled by `false`, and storage failures are
/// logged and swallowed while the in-memory view stays consistent.
pub struct Service {
    repo: Arc<dyn PreferenceRepository>,
    identity: Arc<IdentityContext>,
    tenants: Arc<TenantPreferenceStore>,
    defaults: SystemDefaults,
    storage_key_prefix: String,
    /// Cache of the record stored for the active (user, tenant) pair.
    /// Kept current by [`Service::reload`] and every mutation.
    stored: ArcSwapOption<UserPreference>,
    effective_tx: watch::Sender<EffectivePreference>,
}

impl Service {
    #[must_use]
    pub fn new(
        repo: Arc<dyn PreferenceRepository>,
        identity: Arc<IdentityContext>,
        tenants: Arc<TenantPreferenceStore>,
        config: PreferenceCenterConfig,
    ) -> Self {
        let initial = resolver::resolve(
            &identity.current(),
            &config.defaults,
            tenants.current().as_deref(),
            None,
        );
        let (effective_tx, _) = watch::channel(initial);
        Self {
            repo,
            identity,
            tenants,
            defaults: config.defaults,
            storage_key_prefix: config.storage_key_prefix,
            stored: ArcSwapOption::from(None),
            effective_tx,
        }
    }

    /// The merged preference view. Always succeeds; with no tenant and no
    /// user record it equals the system defaults.
    #[must_use]
    pub fn effective_preferences(&self) -> EffectivePreference {
        self.resolve_current()
    }

    /// The raw stored user-tier record.
    ///
    /// `None` when the identity is incomplete, when nothing has been stored
    /// yet, or when the cached record belongs to a different (user, tenant)
    /// pair. A stale cache between a tenant switch and the coordinator's
    /// [`Service::reload`] must not leak the previous tenant's record.
    #[must_use]
    pub fn user_preference(&self) -> Option<UserPreference> {
        let scope = self.identity.current().scope()?;
        let record = self.stored.load_full()?;
        (scope == (record.user_id, record.tenant_id)).then(|| (*record).clone())
    }

    /// Resolved theme.
    #[must_use]
    pub fn theme(&self) -> String {
        self.resolve_current().theme
    }

    /// Resolved language code.
    #[must_use]
    pub fn language(&self) -> String {
        self.resolve_current().language
    }

    /// Resolved date format.
    #[must_use]
    pub fn date_format(&self) -> String {
        self.resolve_current().date_format
    }

    /// Resolved time format.
    #[must_use]
    pub fn time_format(&self) -> String {
        self.resolve_current().time_format
    }

    /// Resolved timezone.
    #[must_use]
    pub fn timezone(&self) -> String {
        self.resolve_current().timezone
    }

    /// Resolved notification settings.
    #[must_use]
    pub fn notifications(&self) -> NotificationSettings {
        self.resolve_current().notifications
    }

    /// Resolved branding.
    #[must_use]
    pub fn branding(&self) -> Branding {
        self.resolve_current().branding
    }

    /// Tenant-scoped feature flags; empty when no tenant is loaded.
    #[must_use]
    pub fn features(&self) -> HashMap<String, bool> {
        self.resolve_current().features
    }

    /// Whether the resolved theme is `"dark"`.
    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.theme() == "dark"
    }

    /// Whether the resolved theme is `"light"`.
    #[must_use]
    pub fn is_light_mode(&self) -> bool {
        self.theme() == "light"
    }

    /// Whether the named feature flag is enabled. Missing flags are `false`.
    #[must_use]
    pub fn is_feature_enabled(&self, key: &str) -> bool {
        self.resolve_current().features.get(key).copied().unwrap_or(false)
    }

    /// Subscribe to effective preference updates. Republished after every
    /// mutation and every [`Service::reload`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<EffectivePreference> {
        self.effective_tx.subscribe()
    }

    /// Re-read the stored record for the active identity and republish.
    ///
    /// The session coordinator calls this after sign-in, sign-out, and tenant
    /// switches; the engine itself has no tenant-switch operation and simply
    /// resolves against whatever the identity context and tenant store hold.
    pub async fn reload(&self) {
        let loaded = match self.storage_key() {
            Some(key) => self.read_record(&key).await,
            None => None,
        };
        self.stored.store(loaded.map(Arc::new));
        self.publish();
    }

    /// Overwrite the user-tier theme.
    pub async fn set_theme(&self, theme: &str) {
        self.write_through("set_theme", |record| record.theme = Some(theme.to_owned()))
            .await;
    }

    /// Set the user-tier language.
    ///
    /// Returns `false` and writes nothing when the language is not in the
    /// active tenant's allow-list, or when no identity is active.
    pub async fn set_language(&self, language: &str) -> bool {
        let Some((user_id, tenant_id)) = self.identity.current().scope() else {
            tracing::debug!(operation = "set_language", "no active user/tenant, write ignored");
            return false;
        };
        if !self.tenants.is_language_allowed(language) {
            tracing::debug!(language = %language, "language not in tenant allow-list, write rejected");
            return false;
        }

        let key = self.key_for(tenant_id, user_id);
        let mut record = self
            .read_record(&key)
            .await
            .unwrap_or_else(|| UserPreference::new(user_id, tenant_id));
        record.language = Some(language.to_owned());
        record.updated_at = Some(Utc::now());
        self.persist(&key, record).await;
        true
    }

    /// Overwrite the user-tier timezone.
    pub async fn set_timezone(&self, timezone: &str) {
        self.write_through("set_timezone", |record| {
            record.timezone = Some(timezone.to_owned());
        })
        .await;
    }

    /// Overwrite the user-tier date format.
    pub async fn set_date_format(&self, format: &str) {
        self.write_through("set_date_format", |record| {
            record.date_format = Some(format.to_owned());
        })
        .await;
    }

    /// Overwrite the user-tier time format.
    pub async fn set_time_format(&self, format: &str) {
        self.write_through("set_time_format", |record| {
            record.time_format = Some(format.to_owned());
        })
        .await;
    }

    /// Shallow-merge `patch` into the stored notification overrides,
    /// preserving unspecified subfields.
    pub async fn update_notifications(&self, patch: NotificationOverrides) {
        self.write_through("update_notifications", |record| {
            let current = record.notifications.take().unwrap_or_default();
            record.notifications = Some(current.merged(&patch));
        })
        .await;
    }

    /// Remove the stored user record entirely; subsequent reads fall through
    /// to the tenant and system tiers. Idempotent, also when nothing is
    /// stored.
    pub async fn reset_to_tenant_defaults(&self) {
        let Some(key) = self.storage_key() else {
            tracing::debug!(operation = "reset_to_tenant_defaults", "no active user/tenant, reset ignored");
            return;
        };
        if let Err(e) = self.repo.remove(&key).await {
            tracing::warn!(key = %key, error = ?e, "failed to remove stored user preference");
        }
        self.stored.store(None);
        self.publish();
    }

    /// Overwrite the stored user record verbatim with a hydrated copy, e.g.
    /// when preferences arrive from a remote source. No merge with the
    /// existing record takes place.
    pub async fn load_user_preference(&self, record: UserPreference) {
        let Some(key) = self.storage_key() else {
            tracing::debug!(operation = "load_user_preference", "no active user/tenant, hydration ignored");
            return;
        };
        self.persist(&key, record).await;
    }

    fn resolve_current(&self) -> EffectivePreference {
        resolver::resolve(
            &self.identity.current(),
            &self.defaults,
            self.tenants.current().as_deref(),
            self.stored.load().as_deref(),
        )
    }

    fn publish(&self) {
        self.effective_tx.send_replace(self.resolve_current());
    }

    fn key_for(&self, tenant_id: Uuid, user_id: Uuid) -> String {
        let prefix = &self.storage_key_prefix;
        format!("{prefix}_{tenant_id}_{user_id}")
    }

    /// Storage key for the active (tenant, user) pair; `None` when either id
    /// is unavailable.
    fn storage_key(&self) -> Option<String> {
        let (user_id, tenant_id) = self.identity.current().scope()?;
        Some(self.key_for(tenant_id, user_id))
    }

    async fn read_record(&self, key: &str) -> Option<UserPreference> {
        match self.repo.get(key).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(key = %key, error = ?e, "failed to read stored user preference");
                None
            }
        }
    }

    /// Read-modify-write of the stored record for the active identity.
    /// No-op when the identity is incomplete.
    async fn write_through<F>(&self, operation: &'static str, mutate: F)
    where
        F: FnOnce(&mut UserPreference),
    {
        let Some((user_id, tenant_id)) = self.identity.current().scope() else {
            tracing::debug!(operation, "no active user/tenant, write ignored");
            return;
        };
        let key = self.key_for(tenant_id, user_id);
        let mut record = self
            .read_record(&key)
            .await
            .unwrap_or_else(|| UserPreference::new(user_id, tenant_id));
        mutate(&mut record);
        record.updated_at = Some(Utc::now());
        self.persist(&key, record).await;
    }

    async fn persist(&self, key: &str, record: UserPreference) {
        if let Err(e) = self.repo.set(key, &record).await {
            tracing::warn!(key = %key, error = ?e, "failed to persist user preference");
        }
        self.stored.store(Some(Arc::new(record)));
        self.publish();
    }
}
