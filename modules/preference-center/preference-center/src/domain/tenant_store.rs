use std::sync::Arc;

use arc_swap::ArcSwapOption;
use preference_center_sdk::TenantPreference;

/// Holder for the currently loaded tenant preference record.
///
/// Loaded by tenant-bootstrap logic outside this module. The tenant-switch
/// flow clears the store before the next tenant's record arrives, so the
/// engine never resolves against the previous tenant's record or allow-list.
pub struct TenantPreferenceStore {
    current: ArcSwapOption<TenantPreference>,
}

impl TenantPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::from(None),
        }
    }

    /// Snapshot of the loaded tenant record, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<TenantPreference>> {
        self.current.load_full()
    }

    /// Replace the loaded tenant record.
    pub fn load(&self, preference: TenantPreference) {
        self.current.store(Some(Arc::new(preference)));
    }

    /// Drop the loaded tenant record. Called on tenant switch and sign-out.
    pub fn clear(&self) {
        self.current.store(None);
    }

    /// Language codes the loaded tenant permits its users to select.
    /// Empty when no tenant is loaded.
    #[must_use]
    pub fn allowed_languages(&self) -> Vec<String> {
        self.current
            .load()
            .as_ref()
            .map_or_else(Vec::new, |t| t.allowed_languages.clone())
    }

    /// Whether the loaded tenant permits `language`. Always `false` when no
    /// tenant is loaded.
    #[must_use]
    pub fn is_language_allowed(&self, language: &str) -> bool {
        self.current
            .load()
            .as_ref()
            .is_some_and(|t| t.allowed_languages.iter().any(|l| l == language))
    }
}

impl Default for TenantPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}
