//! Configuration for the preference center module.

use preference_center_sdk::SystemDefaults;
use serde::Deserialize;

/// Module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreferenceCenterConfig {
    /// Prefix of per-(tenant, user) storage keys.
    ///
    /// The full key is `"<prefix>_<tenant_id>_<user_id>"` and must stay
    /// stable across sessions, otherwise stored preferences are orphaned.
    pub storage_key_prefix: String,

    /// System-tier defaults, the lowest-priority resolution tier.
    pub defaults: SystemDefaults,
}

impl Default for PreferenceCenterConfig {
    fn default() -> Self {
        Self {
            storage_key_prefix: "user_prefs".to_owned(),
            defaults: SystemDefaults::default(),
        }
    }
}
