//! Session and identity store.
//!
//! Holds the authenticated principal in memory and mirrors it to
//! durable storage so a restart can pick the session back up. Login is
//! a passthrough: credential checking happens on the backend, this
//! store only records what the backend already accepted.

use crate::backend::AuthBackend;
use crate::storage::{SessionStorage, StorageError, AUTH_TOKEN_KEY, PRINCIPAL_KEY};
use parking_lot::RwLock;
use shared::principal::Principal;
use shared::role::Role;
use std::sync::Arc;
use thiserror::Error;

/// Session error type
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("session blob error: {0}")]
    Blob(#[from] serde_json::Error),
}

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    auth: Arc<dyn AuthBackend>,
    principal: RwLock<Option<Principal>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>, auth: Arc<dyn AuthBackend>) -> Self {
        Self {
            storage,
            auth,
            principal: RwLock::new(None),
        }
    }

    /// Record an already-authenticated principal, durably and in memory.
    pub fn login(&self, principal: Principal) -> Result<Principal, SessionError> {
        let blob = serde_json::to_string(&principal)?;
        self.storage.set(PRINCIPAL_KEY, &blob)?;
        *self.principal.write() = Some(principal.clone());
        tracing::info!(user_id = %principal.id, role = %principal.role, "session established");
        Ok(principal)
    }

    /// Persist the bearer token every subsequent request will carry.
    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        self.storage.set(AUTH_TOKEN_KEY, token)?;
        Ok(())
    }

    /// Current stored token, if any. Read failures count as no token.
    pub fn token(&self) -> Option<String> {
        match self.storage.get(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(%error, "token read failed");
                None
            }
        }
    }

    /// End the session. Local state is gone before the backend hears
    /// about it; the farewell call is fire-and-forget because the user
    /// is leaving whether or not the network cooperates.
    pub fn logout(&self) {
        *self.principal.write() = None;
        if let Err(error) = self.storage.remove(PRINCIPAL_KEY) {
            tracing::warn!(%error, "failed to clear stored principal");
        }
        if let Err(error) = self.storage.remove(AUTH_TOKEN_KEY) {
            tracing::warn!(%error, "failed to clear stored token");
        }
        let auth = self.auth.clone();
        tokio::spawn(async move {
            if let Err(error) = auth.logout().await {
                tracing::warn!(%error, "logout call failed");
            }
        });
        tracing::info!("session cleared");
    }

    /// Restore a session from durable storage, requiring both the token
    /// and the principal blob. A blob that no longer parses resets the
    /// session; a half-valid session must never come back to life.
    pub fn restore_session(&self) -> Result<Option<Principal>, SessionError> {
        let token = self.storage.get(AUTH_TOKEN_KEY)?;
        let blob = self.storage.get(PRINCIPAL_KEY)?;
        let (Some(_token), Some(blob)) = (token, blob) else {
            return Ok(None);
        };
        match serde_json::from_str::<Principal>(&blob) {
            Ok(principal) => {
                *self.principal.write() = Some(principal.clone());
                tracing::info!(user_id = %principal.id, role = %principal.role, "session restored");
                Ok(Some(principal))
            }
            Err(error) => {
                tracing::warn!(%error, "stored principal is corrupt, resetting session");
                self.storage.remove(PRINCIPAL_KEY)?;
                self.storage.remove(AUTH_TOKEN_KEY)?;
                Ok(None)
            }
        }
    }

    /// Drop the rejected token and the in-memory principal after the
    /// backend answered 401. The durable blob may stay; restore refuses
    /// it without a token.
    pub fn expire(&self) {
        *self.principal.write() = None;
        if let Err(error) = self.storage.remove(AUTH_TOKEN_KEY) {
            tracing::warn!(%error, "failed to clear rejected token");
        }
        tracing::warn!("token rejected by backend, session expired");
    }

    /// Switch the stored role locally. No backend call: the role only
    /// changes which matrix row the gate consults.
    pub fn switch_role(&self, role: Role) -> Result<Option<Principal>, SessionError> {
        let updated = {
            let mut guard = self.principal.write();
            let Some(principal) = guard.as_mut() else {
                return Ok(None);
            };
            principal.role = role;
            principal.clone()
        };
        let blob = serde_json::to_string(&updated)?;
        self.storage.set(PRINCIPAL_KEY, &blob)?;
        tracing::debug!(role = %role, "role switched locally");
        Ok(Some(updated))
    }

    pub fn principal(&self) -> Option<Principal> {
        self.principal.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.read().is_some()
    }

    /// Effective role of the current principal, super admin flag
    /// already applied.
    pub fn effective_role(&self) -> Option<Role> {
        self.principal.read().as_ref().map(Principal::effective_role)
    }
}
