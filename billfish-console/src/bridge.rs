//! Console bridge - the one-stop wiring layer.
//!
//! An embedding shell builds one [`ConsoleBridge`] and gets the whole
//! authorization core wired: durable storage, backend client, session,
//! permission and feature stores, and the route guard, all sharing the
//! same state. The stores stay individually reachable for screens that
//! only need one of them.

use crate::backend::{AuthBackend, HttpBackend};
use crate::error::ConsoleResult;
use crate::features::FeatureStore;
use crate::guard::RouteGuard;
use crate::notify::Notify;
use crate::permissions::PermissionStore;
use crate::session::SessionStore;
use crate::storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
use billfish_client::ClientConfig;
use serde::{Deserialize, Serialize};
use shared::client::LoginRequest;
use shared::principal::Principal;
use shared::role::Role;
use std::path::PathBuf;
use std::sync::Arc;

/// Bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Directory for durable session state. `None` keeps the session
    /// in memory only, so it dies with the process.
    pub data_dir: Option<PathBuf>,
    /// Where guards send principals that may not enter.
    pub login_path: String,
}

impl ConsoleConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: 30,
            data_dir: None,
            login_path: "/login".to_string(),
        }
    }
}

pub struct ConsoleBridge {
    session: Arc<SessionStore>,
    permissions: Arc<PermissionStore>,
    features: Arc<FeatureStore>,
    guard: RouteGuard,
    auth: Arc<dyn AuthBackend>,
}

impl ConsoleBridge {
    pub fn new(config: ConsoleConfig, notifier: Arc<dyn Notify>) -> ConsoleResult<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(StorageError::from)?;
                Arc::new(FileStorage::new(dir))
            }
            None => Arc::new(MemoryStorage::new()),
        };
        let client_config =
            ClientConfig::new(config.base_url.clone()).with_timeout(config.timeout);
        let backend = Arc::new(HttpBackend::new(client_config, storage.clone()));
        let session = Arc::new(SessionStore::new(storage.clone(), backend.clone()));
        let permissions = Arc::new(PermissionStore::new(
            backend.clone(),
            session.clone(),
            notifier.clone(),
        ));
        let features = Arc::new(FeatureStore::new(backend.clone(), session.clone(), notifier));
        let guard = RouteGuard::new(session.clone(), permissions.clone(), config.login_path);
        tracing::info!(base_url = %config.base_url, durable = config.data_dir.is_some(), "console bridge ready");
        Ok(Self {
            session,
            permissions,
            features,
            guard,
            auth: backend,
        })
    }

    /// Authenticate against the backend and establish the session.
    ///
    /// The principal is normalized before anything is persisted, so a
    /// user the console cannot represent leaves no half-written state
    /// behind. The first matrix refresh runs before this returns.
    pub async fn sign_in(
        &self,
        phone: &str,
        password: &str,
        role_hint: Option<Role>,
    ) -> ConsoleResult<Principal> {
        let request = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
            role: role_hint,
        };
        let response = self.auth.login(&request).await?;
        let principal = Principal::from_user(response.user)?;
        self.session.set_token(&response.token)?;
        let principal = self.session.login(principal)?;
        self.permissions.refresh().await;
        Ok(principal)
    }

    /// Pick up a durable session from a previous run, refreshing the
    /// matrix if one was found.
    pub async fn restore(&self) -> ConsoleResult<Option<Principal>> {
        let restored = self.session.restore_session()?;
        if restored.is_some() {
            self.permissions.refresh().await;
        }
        Ok(restored)
    }

    pub fn sign_out(&self) {
        self.session.logout();
    }

    pub fn session(&self) -> Arc<SessionStore> {
        self.session.clone()
    }

    pub fn permissions(&self) -> Arc<PermissionStore> {
        self.permissions.clone()
    }

    pub fn features(&self) -> Arc<FeatureStore> {
        self.features.clone()
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }
}
