//! Permission matrix store.
//!
//! Local-first: the compiled defaults answer every check from the
//! first frame, a background refresh folds in what the backend says,
//! and toggles apply locally before the network round trip. A failed
//! toggle reverts exactly the entry it flipped, to the value captured
//! at flip time.

use crate::backend::MatrixBackend;
use crate::notify::Notify;
use crate::refresh::Refresh;
use crate::session::SessionStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared::capability::{catalogue, Capability, CapabilityInfo};
use shared::client::MatrixToggleRequest;
use shared::matrix::PermissionMatrix;
use shared::notification::{NotificationCategory, NotificationPayload};
use shared::role::Role;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct PermissionStore {
    matrix: RwLock<PermissionMatrix>,
    backend: Arc<dyn MatrixBackend>,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notify>,
    /// Set once the first refresh attempt finishes, however it went.
    settled: AtomicBool,
}

impl PermissionStore {
    pub fn new(
        backend: Arc<dyn MatrixBackend>,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notify>,
    ) -> Self {
        Self {
            matrix: RwLock::new(PermissionMatrix::defaults()),
            backend,
            session,
            notifier,
            settled: AtomicBool::new(false),
        }
    }

    /// Pull the backend's matrix and merge it over fresh defaults.
    ///
    /// Failure keeps the current matrix and stays quiet; stale
    /// permissions beat a toast storm on a flaky network. A 401 expires
    /// the session.
    pub async fn refresh(&self) {
        match self.backend.fetch_matrix().await {
            Ok(remote) => {
                *self.matrix.write() = PermissionMatrix::merged_with_remote(&remote);
                tracing::debug!(roles = remote.len(), "permission matrix refreshed");
            }
            Err(error) => {
                tracing::warn!(%error, "permission refresh failed, keeping current matrix");
                if error.is_auth_error() {
                    self.session.expire();
                }
            }
        }
        self.settled.store(true, Ordering::SeqCst);
    }

    /// Flip one entry optimistically, then tell the backend.
    ///
    /// The prior value is captured under the same write lock as the
    /// flip, so a failure reverts what this call changed even if other
    /// toggles landed in between.
    pub async fn toggle(&self, role: Role, capability: Capability) {
        let prior = {
            let mut matrix = self.matrix.write();
            let prior = matrix.get(role, capability);
            matrix.set(role, capability, !prior);
            prior
        };
        let request = MatrixToggleRequest {
            role,
            permission: capability,
            enabled: !prior,
        };
        match self.backend.push_toggle(&request).await {
            Ok(()) => {
                self.notifier.notify(
                    NotificationPayload::success("Permissions", "Permission updated successfully")
                        .with_category(NotificationCategory::Permissions),
                );
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    role = %role,
                    permission = capability.key(),
                    "permission toggle rejected, reverting"
                );
                if error.is_auth_error() {
                    self.session.expire();
                }
                self.matrix.write().set(role, capability, prior);
                self.notifier.notify(
                    NotificationPayload::error(
                        "Permissions",
                        "Failed to update permission. Reverting changes.",
                    )
                    .with_category(NotificationCategory::Permissions),
                );
            }
        }
    }

    /// Matrix-level check. Blanket grants live in the gate, not here.
    pub fn has(&self, role: Role, capability: Capability) -> bool {
        self.matrix.read().get(role, capability)
    }

    /// String-keyed check; unknown keys are denied.
    pub fn has_key(&self, role: Role, key: &str) -> bool {
        match Capability::parse_key(key) {
            Some(capability) => self.has(role, capability),
            None => false,
        }
    }

    /// One role's full row, for the admin grid.
    pub fn role_permissions(&self, role: Role) -> BTreeMap<Capability, bool> {
        self.matrix.read().role_map(role)
    }

    pub fn snapshot(&self) -> PermissionMatrix {
        self.matrix.read().clone()
    }

    /// Put one role back on compiled defaults. Local until the next
    /// refresh confirms or overwrites it.
    pub fn reset_role_to_defaults(&self, role: Role) {
        self.matrix.write().reset_role(role);
        tracing::debug!(role = %role, "role reset to defaults");
    }

    pub fn reset_all(&self) {
        *self.matrix.write() = PermissionMatrix::defaults();
        tracing::debug!("permission matrix reset to defaults");
    }

    /// Grant a role everything except the listed capabilities, which
    /// are forced off.
    pub fn enable_all_for_role(&self, role: Role, exceptions: &[Capability]) {
        self.matrix.write().enable_all_for_role(role, exceptions);
        tracing::debug!(role = %role, exceptions = exceptions.len(), "role granted all capabilities");
    }

    /// False until the first refresh attempt has finished. The guard
    /// uses this to tell "still loading" apart from "denied".
    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::SeqCst)
    }

    /// The full capability catalogue with labels and categories, for
    /// rendering the admin grid.
    pub fn catalogue(&self) -> Vec<CapabilityInfo> {
        catalogue()
    }
}

#[async_trait]
impl Refresh for PermissionStore {
    async fn refresh(&self) {
        PermissionStore::refresh(self).await;
    }
}
