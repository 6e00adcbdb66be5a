use std::sync::Arc;

use arc_swap::ArcSwap;
use uuid::Uuid;

/// Identity of the current shell session.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionIdentity {
    user_id: Option<Uuid>,
    tenant_id: Option<Uuid>,
}

impl SessionIdentity {
    /// Create a new `SessionIdentity` builder.
    #[must_use]
    pub fn builder() -> SessionIdentityBuilder {
        SessionIdentityBuilder::default()
    }

    /// Identity with no user and no tenant.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Get the signed-in user id, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// Get the active tenant id, if any.
    #[must_use]
    pub fn tenant_id(&self) -> Option<Uuid> {
        self.tenant_id
    }

    /// Both ids, present only when the session is fully scoped to a user and
    /// a tenant. Anything keyed per (user, tenant) pair must refuse to read
    /// or write when this is `None`.
    #[must_use]
    pub fn scope(&self) -> Option<(Uuid, Uuid)> {
        match (self.user_id, self.tenant_id) {
            (Some(user_id), Some(tenant_id)) => Some((user_id, tenant_id)),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct SessionIdentityBuilder {
    user_id: Option<Uuid>,
    tenant_id: Option<Uuid>,
}

impl SessionIdentityBuilder {
    #[must_use]
    pub fn user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn tenant_id(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    #[must_use]
    pub fn build(self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.user_id,
            tenant_id: self.tenant_id,
        }
    }
}

/// Reactive cell holding the identity of the current session.
///
/// There is exactly one logical writer, the sign-in / tenant-switch flow.
/// Readers take cheap `Arc` snapshots and never observe a half-updated
/// identity.
pub struct IdentityContext {
    current: ArcSwap<SessionIdentity>,
}

impl IdentityContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(SessionIdentity::anonymous()),
        }
    }

    /// Snapshot of the current identity.
    #[must_use]
    pub fn current(&self) -> Arc<SessionIdentity> {
        self.current.load_full()
    }

    /// Replace the active identity.
    pub fn replace(&self, identity: SessionIdentity) {
        self.current.store(Arc::new(identity));
    }

    /// Drop back to the anonymous identity.
    pub fn clear(&self) {
        self.replace(SessionIdentity::anonymous());
    }
}

impl Default for IdentityContext {
    fn default() -> Self {
        Self::new()
    }
}
