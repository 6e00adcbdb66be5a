//! Pure three-tier preference resolution.
//!
//! [`resolve`] merges the system, tenant, and user tiers field by field. It
//! has no side effects and no knowledge of storage or reactivity, so it can
//! be unit-tested with plain values.

use preference_center_sdk::{
    Branding, BrandingOverrides, EffectivePreference, NotificationOverrides, NotificationSettings,
    SystemDefaults, TenantPreference, UserPreference,
};
use shell_identity::SessionIdentity;

/// Merge the three preference tiers into the effective view.
///
/// Every field falls back independently: the user tier wins, then the tenant
/// tier, then system defaults. Composite fields resolve per subfield, so a
/// user may override `notifications.push` while `notifications.email` still
/// comes from the tenant. Feature flags are the one exception: they are
/// tenant-scoped and the user tier cannot override them.
#[must_use]
pub fn resolve(
    identity: &SessionIdentity,
    defaults: &SystemDefaults,
    tenant: Option<&TenantPreference>,
    user: Option<&UserPreference>,
) -> EffectivePreference {
    // A stored record from another (user, tenant) pair must never influence
    // the effective view, even transiently during a tenant switch.
    let user = user.filter(|u| identity.scope() == Some((u.user_id, u.tenant_id)));

    EffectivePreference {
        user_id: identity.user_id(),
        tenant_id: identity.tenant_id(),
        language: field(
            user.and_then(|u| u.language.as_ref()),
            tenant.and_then(|t| t.default_language.as_ref()),
            &defaults.language,
        ),
        theme: field(
            user.and_then(|u| u.theme.as_ref()),
            tenant.and_then(|t| t.default_theme.as_ref()),
            &defaults.theme,
        ),
        date_format: field(
            user.and_then(|u| u.date_format.as_ref()),
            tenant.and_then(|t| t.date_format.as_ref()),
            &defaults.date_format,
        ),
        time_format: field(
            user.and_then(|u| u.time_format.as_ref()),
            tenant.and_then(|t| t.time_format.as_ref()),
            &defaults.time_format,
        ),
        timezone: field(
            user.and_then(|u| u.timezone.as_ref()),
            tenant.and_then(|t| t.timezone.as_ref()),
            &defaults.timezone,
        ),
        notifications: notifications(
            user.and_then(|u| u.notifications.as_ref()),
            tenant.and_then(|t| t.notifications.as_ref()),
            &defaults.notifications,
        ),
        features: tenant.and_then(|t| t.features.clone()).unwrap_or_default(),
        branding: branding(tenant.and_then(|t| t.branding.as_ref()), &defaults.branding),
    }
}

fn field(user: Option<&String>, tenant: Option<&String>, system: &str) -> String {
    user.or(tenant).map_or_else(|| system.to_owned(), Clone::clone)
}

fn notifications(
    user: Option<&NotificationOverrides>,
    tenant: Option<&NotificationOverrides>,
    system: &NotificationSettings,
) -> NotificationSettings {
    NotificationSettings {
        email: user
            .and_then(|o| o.email)
            .or_else(|| tenant.and_then(|o| o.email))
            .unwrap_or(system.email),
        in_app: user
            .and_then(|o| o.in_app)
            .or_else(|| tenant.and_then(|o| o.in_app))
            .unwrap_or(system.in_app),
        push: user
            .and_then(|o| o.push)
            .or_else(|| tenant.and_then(|o| o.push))
            .unwrap_or(system.push),
        digest_frequency: user
            .and_then(|o| o.digest_frequency)
            .or_else(|| tenant.and_then(|o| o.digest_frequency))
            .unwrap_or(system.digest_frequency),
    }
}

fn branding(tenant: Option<&BrandingOverrides>, system: &Branding) -> Branding {
    Branding {
        logo_url: field(None, tenant.and_then(|b| b.logo_url.as_ref()), &system.logo_url),
        favicon_url: field(
            None,
            tenant.and_then(|b| b.favicon_url.as_ref()),
            &system.favicon_url,
        ),
        app_title: field(
            None,
            tenant.and_then(|b| b.app_title.as_ref()),
            &system.app_title,
        ),
    }
}
