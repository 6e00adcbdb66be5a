//! Public models for the preference center.
//!
//! These are transport-agnostic data structures shared by the preference
//! engine and its consumers. Preferences live in three tiers: system defaults
//! (always fully resolved), the tenant tier, and the user tier (both sparse:
//! an unset field means "defer to the tier below"). [`EffectivePreference`]
//! is the merged view and is never persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often notification digests are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFrequency {
    Immediate,
    #[default]
    Daily,
    Weekly,
    Never,
}

/// Fully resolved notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email: bool,
    pub in_app: bool,
    pub push: bool,
    pub digest_frequency: DigestFrequency,
}

/// Sparse notification settings, as stored in the tenant and user tiers.
///
/// Also the patch shape for partial notification updates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationOverrides {
    pub email: Option<bool>,
    pub in_app: Option<bool>,
    pub push: Option<bool>,
    pub digest_frequency: Option<DigestFrequency>,
}

impl NotificationOverrides {
    /// Shallow-merge `patch` on top of `self`: fields set in the patch win,
    /// everything else is preserved.
    #[must_use]
    pub fn merged(&self, patch: &NotificationOverrides) -> NotificationOverrides {
        NotificationOverrides {
            email: patch.email.or(self.email),
            in_app: patch.in_app.or(self.in_app),
            push: patch.push.or(self.push),
            digest_frequency: patch.digest_frequency.or(self.digest_frequency),
        }
    }
}

/// Fully resolved branding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub logo_url: String,
    pub favicon_url: String,
    pub app_title: String,
}

/// Sparse branding, as set by tenant administration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingOverrides {
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub app_title: Option<String>,
}

/// System-tier defaults, the lowest-priority resolution tier.
///
/// Immutable once the engine is constructed; deployments may override the
/// stock values through module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemDefaults {
    pub language: String,
    pub theme: String,
    pub date_format: String,
    pub time_format: String,
    pub timezone: String,
    pub notifications: NotificationSettings,
    pub branding: Branding,
}

impl Default for SystemDefaults {
    fn default() -> Self {
        Self {
            language: "en".to_owned(),
            theme: "light".to_owned(),
            date_format: "MM/dd/yyyy".to_owned(),
            time_format: "hh:mm a".to_owned(),
            timezone: "UTC".to_owned(),
            notifications: NotificationSettings {
                email: true,
                in_app: true,
                push: false,
                digest_frequency: DigestFrequency::Daily,
            },
            branding: Branding {
                logo_url: "/assets/logo.svg".to_owned(),
                favicon_url: "/assets/favicon.ico".to_owned(),
                app_title: "App Shell".to_owned(),
            },
        }
    }
}

/// Tenant-tier preference record, owned by tenant administration.
///
/// `allowed_languages` constrains which language codes a user of this tenant
/// may select. Read-only to the preference engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantPreference {
    pub tenant_id: Uuid,
    #[serde(default)]
    pub default_language: Option<String>,
    #[serde(default)]
    pub default_theme: Option<String>,
    #[serde(default)]
    pub allowed_languages: Vec<String>,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub time_format: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub branding: Option<BrandingOverrides>,
    #[serde(default)]
    pub features: Option<HashMap<String, bool>>,
    #[serde(default)]
    pub notifications: Option<NotificationOverrides>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<Uuid>,
}

impl TenantPreference {
    /// Empty tenant record: no overrides, no allowed languages.
    #[must_use]
    pub fn new(tenant_id: Uuid) -> Self {
        Self {
            tenant_id,
            default_language: None,
            default_theme: None,
            allowed_languages: Vec::new(),
            date_format: None,
            time_format: None,
            timezone: None,
            branding: None,
            features: None,
            notifications: None,
            updated_at: None,
            updated_by: None,
        }
    }
}

/// User-tier preference record, persisted per (user, tenant) pair.
///
/// Meaningless without both ids: the engine refuses to read or write the
/// record when either is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreference {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub time_format: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub notifications: Option<NotificationOverrides>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserPreference {
    /// Empty user record: everything deferred to the tenant and system tiers.
    #[must_use]
    pub fn new(user_id: Uuid, tenant_id: Uuid) -> Self {
        Self {
            user_id,
            tenant_id,
            language: None,
            theme: None,
            date_format: None,
            time_format: None,
            timezone: None,
            notifications: None,
            updated_at: None,
        }
    }
}

/// The fully resolved preference view applied by the UI.
///
/// Derived on every read from the three tiers; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectivePreference {
    pub user_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    pub language: String,
    pub theme: String,
    pub date_format: String,
    pub time_format: String,
    pub timezone: String,
    pub notifications: NotificationSettings,
    pub features: HashMap<String, bool>,
    pub branding: Branding,
}
