//! Public API trait for the preference center.
//!
//! This trait defines the interface UI components and other shell services
//! use to read and mutate preferences. Consumers never talk to preference
//! storage directly; the engine owns the user tier and derives everything
//! else.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::{
    Branding, EffectivePreference, NotificationOverrides, NotificationSettings, UserPreference,
};

/// Public API trait for the preference center.
///
/// ```ignore
/// let prefs = shell.get::<dyn PreferenceCenterClient>()?;
///
/// // One-shot reads are synchronous over resident state
/// let effective = prefs.effective_preferences();
/// if prefs.is_feature_enabled("beta-dashboard") { /* ... */ }
///
/// // Mutations persist to the user tier only
/// prefs.set_theme("dark").await;
/// if !prefs.set_language("fr").await { /* not allowed by tenant */ }
///
/// // Reactive consumers subscribe instead of polling
/// let mut rx = prefs.subscribe();
/// while rx.changed().await.is_ok() { apply(&rx.borrow()); }
/// ```
///
/// # Failure semantics
///
/// No operation on this trait fails. With no signed-in user or no active
/// tenant, mutations are silent no-ops and [`user_preference`] is `None`; a
/// language outside the tenant's allow-list is signalled by `false`; storage
/// failures are swallowed below this surface.
///
/// # Tenant switching
///
/// The engine has no tenant-switch operation. The session coordinator clears
/// the tenant preference store, updates the identity context, loads the next
/// tenant's record, and then calls [`reload`] so subscribers observe the new
/// tenant's resolution. One-shot reads always re-resolve against the current
/// stores and are correct even before [`reload`] lands.
///
/// [`user_preference`]: PreferenceCenterClient::user_preference
/// [`reload`]: PreferenceCenterClient::reload
#[async_trait]
pub trait PreferenceCenterClient: Send + Sync {
    /// The merged preference view. Always succeeds; with no tenant and no
    /// user record it equals the system defaults.
    fn effective_preferences(&self) -> EffectivePreference;

    /// The raw stored user-tier record.
    ///
    /// `None` when the identity is incomplete or nothing has been stored for
    /// the active (user, tenant) pair.
    fn user_preference(&self) -> Option<UserPreference>;

    /// Resolved theme.
    fn theme(&self) -> String;

    /// Resolved language code.
    fn language(&self) -> String;

    /// Resolved date format.
    fn date_format(&self) -> String;

    /// Resolved time format.
    fn time_format(&self) -> String;

    /// Resolved timezone.
    fn timezone(&self) -> String;

    /// Resolved notification settings.
    fn notifications(&self) -> NotificationSettings;

    /// Resolved branding.
    fn branding(&self) -> Branding;

    /// Tenant-scoped feature flags; empty when no tenant is loaded.
    fn features(&self) -> HashMap<String, bool>;

    /// Whether the resolved theme is `"dark"`.
    fn is_dark_mode(&self) -> bool;

    /// Whether the resolved theme is `"light"`.
    fn is_light_mode(&self) -> bool;

    /// Whether the named feature flag is enabled. Missing flags are `false`.
    fn is_feature_enabled(&self, key: &str) -> bool;

    /// Subscribe to effective preference updates. The channel is republished
    /// after every mutation and every [`reload`](PreferenceCenterClient::reload).
    fn subscribe(&self) -> watch::Receiver<EffectivePreference>;

    /// Re-read the stored user record for the active identity and republish.
    async fn reload(&self);

    /// Overwrite the user-tier theme.
    async fn set_theme(&self, theme: &str);

    /// Set the user-tier language.
    ///
    /// Returns `false` and writes nothing when the language is not in the
    /// active tenant's allow-list (or no identity is active).
    async fn set_language(&self, language: &str) -> bool;

    /// Overwrite the user-tier timezone.
    async fn set_timezone(&self, timezone: &str);

    /// Overwrite the user-tier date format.
    async fn set_date_format(&self, format: &str);

    /// Overwrite the user-tier time format.
    async fn set_time_format(&self, format: &str);

    /// Shallow-merge `patch` into the stored notification overrides,
    /// preserving unspecified subfields.
    async fn update_notifications(&self, patch: NotificationOverrides);

    /// Remove the stored user record entirely; subsequent reads fall through
    /// to the tenant and system tiers. Idempotent.
    async fn reset_to_tenant_defaults(&self);

    /// Overwrite the stored user record verbatim with a hydrated copy, e.g.
    /// when preferences arrive from a remote source. No merge takes place.
    async fn load_user_preference(&self, record: UserPreference);
}
