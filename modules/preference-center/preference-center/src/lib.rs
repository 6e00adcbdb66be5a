//! Preference Center Module Implementation
//!
//! The public API is defined in `preference-center-sdk` and re-exported here.
//!
//! The engine merges three tiers (system defaults, the active tenant's
//! preference record, and the per-(user, tenant) stored user record) into
//! one effective view, and owns all writes to the user tier. Collaborators
//! are constructor-injected: the storage port ([`domain::repo`]), the session
//! identity context (`shell-identity`), and the tenant preference store.

pub use preference_center_sdk::{
    Branding, BrandingOverrides, DigestFrequency, EffectivePreference, NotificationOverrides,
    NotificationSettings, PreferenceCenterClient, SystemDefaults, TenantPreference, UserPreference,
};

pub use config::PreferenceCenterConfig;
pub use domain::local_client::PreferenceCenterLocalClient;
pub use domain::service::Service;
pub use domain::tenant_store::TenantPreferenceStore;

#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
