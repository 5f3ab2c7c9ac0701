//! Permission gate and route guard.
//!
//! Every access decision in the console funnels through here. The gate
//! answers "may this principal do X" for buttons and menu entries; the
//! route guard layers the navigation policy on top: where to send
//! someone who is not allowed in.

use crate::permissions::PermissionStore;
use crate::session::SessionStore;
use serde::Serialize;
use shared::capability::Capability;
use shared::principal::Principal;
use shared::role::Role;
use std::sync::Arc;

/// What a console route demands before it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteRequirement {
    /// Only this exact effective role may enter.
    Role(Role),
    /// Any principal holding this capability may enter.
    Capability(Capability),
}

/// Outcome of guarding a route.
///
/// Role and session failures redirect; capability failures render an
/// access-denied view in place, keeping the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    Redirect(String),
    Denied,
}

/// Where the session sits between startup and a settled matrix. The
/// shell shows a loading state for `PendingPermissions` instead of
/// flashing a denial that the first refresh would retract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Unauthenticated,
    PendingPermissions,
    Evaluated,
}

pub struct RouteGuard {
    session: Arc<SessionStore>,
    permissions: Arc<PermissionStore>,
    login_path: String,
}

impl RouteGuard {
    pub fn new(
        session: Arc<SessionStore>,
        permissions: Arc<PermissionStore>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            session,
            permissions,
            login_path: login_path.into(),
        }
    }

    /// Super admins and owners skip the matrix entirely; the check runs
    /// before the capability is even looked at, so it holds for keys
    /// the catalogue has never heard of.
    fn bypasses_matrix(principal: &Principal) -> bool {
        principal.is_super_admin || principal.role == Role::Owner
    }

    /// May this principal use the capability? No principal, no access.
    pub fn can_access_as(&self, principal: Option<&Principal>, capability: Capability) -> bool {
        let Some(principal) = principal else {
            return false;
        };
        if Self::bypasses_matrix(principal) {
            return true;
        }
        self.permissions.has(principal.effective_role(), capability)
    }

    /// String-keyed variant. Unknown keys are denied for everyone the
    /// bypass does not cover.
    pub fn can_access_key_as(&self, principal: Option<&Principal>, key: &str) -> bool {
        let Some(principal) = principal else {
            return false;
        };
        if Self::bypasses_matrix(principal) {
            return true;
        }
        match Capability::parse_key(key) {
            Some(capability) => self.permissions.has(principal.effective_role(), capability),
            None => false,
        }
    }

    /// [`can_access_as`] against the current session.
    ///
    /// [`can_access_as`]: RouteGuard::can_access_as
    pub fn can_access(&self, capability: Capability) -> bool {
        self.can_access_as(self.session.principal().as_ref(), capability)
    }

    pub fn can_access_key(&self, key: &str) -> bool {
        self.can_access_key_as(self.session.principal().as_ref(), key)
    }

    /// Decide a route for an explicit principal.
    pub fn guard_route_as(
        &self,
        principal: Option<&Principal>,
        requirement: RouteRequirement,
    ) -> RouteDecision {
        let Some(principal) = principal else {
            return RouteDecision::Redirect(self.login_path.clone());
        };
        match requirement {
            RouteRequirement::Role(required) => {
                if principal.effective_role() == required {
                    RouteDecision::Allow
                } else {
                    RouteDecision::Redirect(self.login_path.clone())
                }
            }
            RouteRequirement::Capability(capability) => {
                if self.can_access_as(Some(principal), capability) {
                    RouteDecision::Allow
                } else {
                    RouteDecision::Denied
                }
            }
        }
    }

    /// Decide a route for the current session.
    pub fn guard_route(&self, requirement: RouteRequirement) -> RouteDecision {
        self.guard_route_as(self.session.principal().as_ref(), requirement)
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.session.is_authenticated() {
            return SessionPhase::Unauthenticated;
        }
        if !self.permissions.is_settled() {
            return SessionPhase::PendingPermissions;
        }
        SessionPhase::Evaluated
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}
