//! Shared fixtures for the console integration tests.
//!
//! Every backend seam gets an in-memory mock with injectable failures,
//! and `harness()` wires them into a full store stack the way the
//! bridge would.

#![allow(dead_code)]

use async_trait::async_trait;
use billfish_client::{ClientError, ClientResult};
use billfish_console::backend::{AuthBackend, MatrixBackend, SettingsBackend};
use billfish_console::notify::Notify;
use billfish_console::storage::MemoryStorage;
use billfish_console::{FeatureStore, PermissionStore, RouteGuard, SessionStore};
use parking_lot::Mutex;
use shared::client::{
    FeatureSettings, LoginRequest, LoginResponse, MatrixToggleRequest, RoleMatrix, UserInfo,
};
use shared::notification::NotificationPayload;
use shared::principal::Principal;
use shared::role::Role;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Auth backend double. Succeeds unless told otherwise.
#[derive(Default)]
pub struct MockAuth {
    pub fail_login: AtomicBool,
    pub fail_logout: AtomicBool,
    pub logout_calls: AtomicUsize,
}

#[async_trait]
impl AuthBackend for MockAuth {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        if self.fail_login.load(Ordering::SeqCst) {
            return Err(ClientError::Unauthorized);
        }
        Ok(LoginResponse {
            token: "tok-test".to_string(),
            user: UserInfo {
                id: "u-1".to_string(),
                name: "Asha".to_string(),
                role: Some(request.role.unwrap_or(Role::Owner).as_str().to_string()),
                is_super_admin: false,
            },
        })
    }

    async fn logout(&self) -> ClientResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("injected logout failure".to_string()));
        }
        Ok(())
    }
}

/// Matrix backend double with a configurable remote payload.
#[derive(Default)]
pub struct MockMatrix {
    pub remote: Mutex<RoleMatrix>,
    pub fail_fetch: AtomicBool,
    pub fail_toggle: AtomicBool,
    /// When set, every call answers 401.
    pub unauthorized: AtomicBool,
    pub fetches: AtomicUsize,
    pub toggles: Mutex<Vec<MatrixToggleRequest>>,
}

#[async_trait]
impl MatrixBackend for MockMatrix {
    async fn fetch_matrix(&self) -> ClientResult<RoleMatrix> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.unauthorized.load(Ordering::SeqCst) {
            return Err(ClientError::Unauthorized);
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("injected fetch failure".to_string()));
        }
        Ok(self.remote.lock().clone())
    }

    async fn push_toggle(&self, toggle: &MatrixToggleRequest) -> ClientResult<()> {
        if self.unauthorized.load(Ordering::SeqCst) {
            return Err(ClientError::Unauthorized);
        }
        if self.fail_toggle.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("injected toggle failure".to_string()));
        }
        self.toggles.lock().push(toggle.clone());
        Ok(())
    }
}

/// Settings backend double.
#[derive(Default)]
pub struct MockSettings {
    pub remote: Mutex<FeatureSettings>,
    pub fail_fetch: AtomicBool,
    pub fail_save: AtomicBool,
    pub unauthorized: AtomicBool,
    pub saves: Mutex<Vec<FeatureSettings>>,
}

#[async_trait]
impl SettingsBackend for MockSettings {
    async fn fetch_settings(&self) -> ClientResult<FeatureSettings> {
        if self.unauthorized.load(Ordering::SeqCst) {
            return Err(ClientError::Unauthorized);
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("injected fetch failure".to_string()));
        }
        Ok(self.remote.lock().clone())
    }

    async fn save_settings(&self, settings: &FeatureSettings) -> ClientResult<()> {
        if self.unauthorized.load(Ordering::SeqCst) {
            return Err(ClientError::Unauthorized);
        }
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("injected save failure".to_string()));
        }
        self.saves.lock().push(settings.clone());
        Ok(())
    }
}

/// Notifier that keeps everything for assertions.
#[derive(Default)]
pub struct CollectingNotifier {
    pub payloads: Mutex<Vec<NotificationPayload>>,
}

impl CollectingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.payloads.lock().iter().map(|p| p.message.clone()).collect()
    }
}

impl Notify for CollectingNotifier {
    fn notify(&self, payload: NotificationPayload) {
        self.payloads.lock().push(payload);
    }
}

/// The full store stack over in-memory storage and mock backends.
pub struct Harness {
    pub storage: Arc<MemoryStorage>,
    pub auth: Arc<MockAuth>,
    pub matrix: Arc<MockMatrix>,
    pub settings: Arc<MockSettings>,
    pub notifier: Arc<CollectingNotifier>,
    pub session: Arc<SessionStore>,
    pub permissions: Arc<PermissionStore>,
    pub features: Arc<FeatureStore>,
    pub guard: RouteGuard,
}

pub fn harness() -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let auth = Arc::new(MockAuth::default());
    let matrix = Arc::new(MockMatrix::default());
    let settings = Arc::new(MockSettings::default());
    let notifier = Arc::new(CollectingNotifier::default());
    let session = Arc::new(SessionStore::new(storage.clone(), auth.clone()));
    let permissions = Arc::new(PermissionStore::new(
        matrix.clone(),
        session.clone(),
        notifier.clone(),
    ));
    let features = Arc::new(FeatureStore::new(
        settings.clone(),
        session.clone(),
        notifier.clone(),
    ));
    let guard = RouteGuard::new(session.clone(), permissions.clone(), "/login");
    Harness {
        storage,
        auth,
        matrix,
        settings,
        notifier,
        session,
        permissions,
        features,
        guard,
    }
}

pub fn principal(role: Role, is_super_admin: bool) -> Principal {
    Principal {
        id: "u-1".to_string(),
        name: "Asha".to_string(),
        role,
        is_super_admin,
    }
}

/// Build a wire-shaped role matrix from literal entries.
pub fn role_matrix(entries: &[(&str, &[&str])]) -> RoleMatrix {
    entries
        .iter()
        .map(|(role, keys)| {
            (
                (*role).to_string(),
                keys.iter().map(|k| (*k).to_string()).collect(),
            )
        })
        .collect()
}
