//! Local (in-process) client for the preference center module.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use preference_center_sdk::{
    Branding, EffectivePreference, NotificationOverrides, NotificationSettings,
    PreferenceCenterClient, UserPreference,
};
use tokio::sync::watch;

use super::service::Service;

/// Local client wrapping the preference service.
///
/// Registered in the shell's service wiring during bootstrap; consumers see
/// only the [`PreferenceCenterClient`] trait.
pub struct PreferenceCenterLocalClient {
    svc: Arc<Service>,
}

impl PreferenceCenterLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

#[async_trait]
impl PreferenceCenterClient for PreferenceCenterLocalClient {
    fn effective_preferences(&self) -> EffectivePreference {
        self.svc.effective_preferences()
    }

    fn user_preference(&self) -> Option<UserPreference> {
        self.svc.user_preference()
    }

    fn theme(&self) -> String {
        self.svc.theme()
    }

    fn language(&self) -> String {
        self.svc.language()
    }

    fn date_format(&self) -> String {
        self.svc.date_format()
    }

    fn time_format(&self) -> String {
        self.svc.time_format()
    }

    fn timezone(&self) -> String {
        self.svc.timezone()
    }

    fn notifications(&self) -> NotificationSettings {
        self.svc.notifications()
    }

    fn branding(&self) -> Branding {
        self.svc.branding()
    }

    fn features(&self) -> HashMap<String, bool> {
        self.svc.features()
    }

    fn is_dark_mode(&self) -> bool {
        self.svc.is_dark_mode()
    }

    fn is_light_mode(&self) -> bool {
        self.svc.is_light_mode()
    }

    fn is_feature_enabled(&self, key: &str) -> bool {
        self.svc.is_feature_enabled(key)
    }

    fn subscribe(&self) -> watch::Receiver<EffectivePreference> {
        self.svc.subscribe()
    }

    async fn reload(&self) {
        self.svc.reload().await;
    }

    async fn set_theme(&self, theme: &str) {
        self.svc.set_theme(theme).await;
    }

    async fn set_language(&self, language: &str) -> bool {
        self.svc.set_language(language).await
    }

    async fn set_timezone(&self, timezone: &str) {
        self.svc.set_timezone(timezone).await;
    }

    async fn set_date_format(&self, format: &str) {
        self.svc.set_date_format(format).await;
    }

    async fn set_time_format(&self, format: &str) {
        self.svc.set_time_format(format).await;
    }

    async fn update_notifications(&self, patch: NotificationOverrides) {
        self.svc.update_notifications(patch).await;
    }

    async fn reset_to_tenant_defaults(&self) {
        self.svc.reset_to_tenant_defaults().await;
    }

    async fn load_user_preference(&self, record: UserPreference) {
        self.svc.load_user_preference(record).await;
    }
}
