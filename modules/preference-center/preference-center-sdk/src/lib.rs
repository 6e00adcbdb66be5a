//! Preference Center SDK
//!
//! This crate provides the public API for the `preference-center` module:
//!
//! - [`PreferenceCenterClient`] - API trait for consumers
//! - [`SystemDefaults`], [`TenantPreference`], [`UserPreference`] - the three
//!   preference tiers
//! - [`EffectivePreference`] - the merged, fully resolved view
//!
//! Resolution is field by field: the user tier wins, then the tenant tier,
//! then system defaults. Feature flags are the one exception: they are
//! tenant-scoped and the user tier cannot override them.

pub mod api;
pub mod models;

pub use api::PreferenceCenterClient;
pub use models::{
    Branding, BrandingOverrides, DigestFrequency, EffectivePreference, NotificationOverrides,
    NotificationSettings, SystemDefaults, TenantPreference, UserPreference,
};
