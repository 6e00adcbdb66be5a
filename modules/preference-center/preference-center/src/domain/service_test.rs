#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use preference_center_sdk::{NotificationOverrides, TenantPreference, UserPreference};
    use shell_identity::{IdentityContext, SessionIdentity};
    use uuid::Uuid;

    use super::super::repo::PreferenceRepository;
    use super::super::service::Service;
    use super::super::tenant_store::TenantPreferenceStore;
    use crate::config::PreferenceCenterConfig;

    /// In-memory repository that counts write calls and can be switched to
    /// fail them.
    #[derive(Default)]
    struct RecordingRepository {
        entries: Mutex<HashMap<String, UserPreference>>,
        set_calls: AtomicUsize,
        remove_calls: AtomicUsize,
        fail_writes: bool,
    }

    impl RecordingRepository {
        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl PreferenceRepository for RecordingRepository {
        async fn get(&self, key: &str) -> anyhow::Result<Option<UserPreference>> {
            Ok(self.entries.lock().get(key).cloned())
        }

        async fn set(&self, key: &str, record: &UserPreference) -> anyhow::Result<()> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                anyhow::bail!("storage offline");
            }
            self.entries.lock().insert(key.to_owned(), record.clone());
            Ok(())
        }

        async fn remove(&self, key: &str) -> anyhow::Result<()> {
            self.remove_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                anyhow::bail!("storage offline");
            }
            self.entries.lock().remove(key);
            Ok(())
        }
    }

    fn user_id() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap()
    }

    fn tenant_a() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-4466554400aa").unwrap()
    }

    fn tenant_b() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-4466554400bb").unwrap()
    }

    fn tenant_record(tenant_id: Uuid) -> TenantPreference {
        let mut record = TenantPreference::new(tenant_id);
        record.default_language = Some("es".to_owned());
        record.default_theme = Some("dark".to_owned());
        record.allowed_languages = vec!["en".to_owned(), "es".to_owned(), "fr".to_owned()];
        record.features = Some(HashMap::from([("beta-dashboard".to_owned(), true)]));
        record
    }

    fn identity_for(tenant_id: Uuid) -> SessionIdentity {
        SessionIdentity::builder()
            .user_id(user_id())
            .tenant_id(tenant_id)
            .build()
    }

    fn key_for(tenant_id: Uuid) -> String {
        format!("user_prefs_{}_{}", tenant_id, user_id())
    }

    /// Service signed in to tenant A with that tenant's record loaded.
    fn signed_in_service(
        repo: Arc<RecordingRepository>,
    ) -> (Service, Arc<IdentityContext>, Arc<TenantPreferenceStore>) {
        let identity = Arc::new(IdentityContext::new());
        identity.replace(identity_for(tenant_a()));
        let tenants = Arc::new(TenantPreferenceStore::new());
        tenants.load(tenant_record(tenant_a()));
        let svc = Service::new(
            repo,
            Arc::clone(&identity),
            Arc::clone(&tenants),
            PreferenceCenterConfig::default(),
        );
        (svc, identity, tenants)
    }

    #[tokio::test]
    async fn test_effective_falls_through_tiers() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));

        assert_eq!(svc.language(), "es");
        assert!(svc.is_dark_mode());
        assert!(svc.is_feature_enabled("beta-dashboard"));
        assert!(!svc.is_feature_enabled("missing-flag"));

        svc.set_theme("light").await;

        assert!(svc.is_light_mode());
        assert_eq!(svc.language(), "es");
    }

    #[tokio::test]
    async fn test_set_language_enforces_tenant_allow_list() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));

        assert!(!svc.set_language("de").await);
        assert_eq!(svc.user_preference(), None);
        assert_eq!(repo.set_calls.load(Ordering::SeqCst), 0);

        assert!(svc.set_language("fr").await);
        let stored = svc.user_preference().unwrap();
        assert_eq!(stored.language.as_deref(), Some("fr"));
        assert_eq!(repo.set_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_set_language_rejected_without_tenant_loaded() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, _identity, tenants) = signed_in_service(Arc::clone(&repo));
        tenants.clear();

        assert!(!svc.set_language("es").await);
        assert_eq!(repo.set_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_notifications_merges_partially() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));

        svc.update_notifications(NotificationOverrides {
            email: Some(false),
            push: Some(true),
            ..NotificationOverrides::default()
        })
        .await;
        svc.update_notifications(NotificationOverrides {
            email: Some(true),
            ..NotificationOverrides::default()
        })
        .await;

        let stored = svc.user_preference().unwrap().notifications.unwrap();
        assert_eq!(stored.email, Some(true));
        assert_eq!(stored.push, Some(true)); // untouched by the second patch
        assert_eq!(stored.in_app, None);
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));

        svc.set_theme("light").await;
        assert!(svc.is_light_mode());

        svc.reset_to_tenant_defaults().await;
        assert_eq!(svc.user_preference(), None);
        assert!(svc.is_dark_mode()); // tenant tier shows through again

        svc.reset_to_tenant_defaults().await;
        assert_eq!(svc.user_preference(), None);
        assert_eq!(repo.remove_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_mutations_are_noops_without_identity() {
        let repo = Arc::new(RecordingRepository::default());
        let identity = Arc::new(IdentityContext::new());
        let tenants = Arc::new(TenantPreferenceStore::new());
        tenants.load(tenant_record(tenant_a()));
        let svc = Service::new(
            Arc::clone(&repo) as Arc<dyn PreferenceRepository>,
            identity,
            tenants,
            PreferenceCenterConfig::default(),
        );

        svc.set_theme("dark").await;
        assert!(!svc.set_language("es").await);
        svc.set_timezone("Europe/Madrid").await;
        svc.set_date_format("dd.MM.yyyy").await;
        svc.set_time_format("HH:mm").await;
        svc.update_notifications(NotificationOverrides::default())
            .await;
        svc.reset_to_tenant_defaults().await;
        svc.load_user_preference(UserPreference::new(user_id(), tenant_a()))
            .await;
        svc.reload().await;

        assert_eq!(repo.set_calls.load(Ordering::SeqCst), 0);
        assert_eq!(repo.remove_calls.load(Ordering::SeqCst), 0);
        assert_eq!(svc.user_preference(), None);
    }

    #[tokio::test]
    async fn test_tenant_switch_isolates_stored_records() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, identity, tenants) = signed_in_service(Arc::clone(&repo));

        svc.set_theme("solarized").await;
        assert_eq!(svc.theme(), "solarized");

        // Tenant switch: the coordinator clears the store, swaps the
        // identity, and reloads before the next tenant's record arrives.
        tenants.clear();
        identity.replace(identity_for(tenant_b()));
        svc.reload().await;

        assert_eq!(svc.user_preference(), None);
        assert_eq!(svc.theme(), "light"); // system default, not tenant A's record

        tenants.load(tenant_record(tenant_b()));
        svc.set_theme("midnight").await;

        // Both tenants keep their own record for the same user.
        let entries = repo.entries.lock().clone();
        assert_eq!(
            entries.get(&key_for(tenant_a())).unwrap().theme.as_deref(),
            Some("solarized")
        );
        assert_eq!(
            entries.get(&key_for(tenant_b())).unwrap().theme.as_deref(),
            Some("midnight")
        );

        // Switching back to A resolves A's stored record again.
        tenants.clear();
        identity.replace(identity_for(tenant_a()));
        svc.reload().await;
        tenants.load(tenant_record(tenant_a()));

        assert_eq!(
            svc.user_preference().unwrap().theme.as_deref(),
            Some("solarized")
        );
    }

    #[tokio::test]
    async fn test_hydration_overwrites_verbatim() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));

        svc.set_theme("solarized").await;

        let mut hydrated = UserPreference::new(user_id(), tenant_a());
        hydrated.language = Some("fr".to_owned());
        svc.load_user_preference(hydrated.clone()).await;

        // No merge with the previously stored record.
        assert_eq!(svc.user_preference(), Some(hydrated));
    }

    #[tokio::test]
    async fn test_updated_at_is_stamped() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));

        svc.set_theme("light").await;

        assert!(svc.user_preference().unwrap().updated_at.is_some());
    }

    #[tokio::test]
    async fn test_subscribers_observe_mutations() {
        let repo = Arc::new(RecordingRepository::default());
        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));
        let mut rx = svc.subscribe();

        svc.set_theme("solarized").await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().theme, "solarized");
    }

    #[tokio::test]
    async fn test_storage_failure_is_swallowed() {
        let repo = Arc::new(RecordingRepository::failing());
        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));

        svc.set_theme("solarized").await;

        // The write failed, but the call completed and the resident view is
        // consistent with what the user asked for.
        assert_eq!(svc.theme(), "solarized");
        assert_eq!(
            svc.user_preference().unwrap().theme.as_deref(),
            Some("solarized")
        );
    }

    #[tokio::test]
    async fn test_reload_picks_up_existing_record() {
        let repo = Arc::new(RecordingRepository::default());
        let mut record = UserPreference::new(user_id(), tenant_a());
        record.timezone = Some("Asia/Tokyo".to_owned());
        repo.entries.lock().insert(key_for(tenant_a()), record);

        let (svc, _identity, _tenants) = signed_in_service(Arc::clone(&repo));
        assert_eq!(svc.user_preference(), None); // nothing cached yet

        svc.reload().await;

        assert_eq!(svc.timezone(), "Asia/Tokyo");
        assert_eq!(
            svc.user_preference().unwrap().timezone.as_deref(),
            Some("Asia/Tokyo")
        );
    }
}
