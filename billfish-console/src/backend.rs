//! Backend seams for the console stores.
//!
//! Each store talks to its slice of the billing backend through a
//! trait, so tests can inject failures without a server. The production
//! implementation is [`HttpBackend`], which builds a fresh client per
//! call carrying whatever token storage holds at that moment. Reading
//! the token per request, not per session, means a token cleared by one
//! store is immediately gone for all of them.

use crate::storage::{SessionStorage, AUTH_TOKEN_KEY};
use async_trait::async_trait;
use billfish_client::{ClientConfig, ClientResult, HttpClient};
use shared::client::{
    FeatureSettings, LoginRequest, LoginResponse, MatrixToggleRequest, RoleMatrix,
};
use std::sync::Arc;

/// Auth endpoints the session store drives.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;
    async fn logout(&self) -> ClientResult<()>;
}

/// Role-matrix endpoints the permission store drives.
#[async_trait]
pub trait MatrixBackend: Send + Sync {
    async fn fetch_matrix(&self) -> ClientResult<RoleMatrix>;
    async fn push_toggle(&self, toggle: &MatrixToggleRequest) -> ClientResult<()>;
}

/// Feature-settings endpoints the feature store drives.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn fetch_settings(&self) -> ClientResult<FeatureSettings>;
    async fn save_settings(&self, settings: &FeatureSettings) -> ClientResult<()>;
}

/// HTTP implementation of all three backend seams.
pub struct HttpBackend {
    config: ClientConfig,
    storage: Arc<dyn SessionStorage>,
}

impl HttpBackend {
    pub fn new(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> Self {
        Self { config, storage }
    }

    /// Client carrying the current stored token, if any.
    fn client(&self) -> HttpClient {
        let mut config = self.config.clone();
        match self.storage.get(AUTH_TOKEN_KEY) {
            Ok(Some(token)) => config = config.with_token(token),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(%error, "token read failed, sending request unauthenticated");
            }
        }
        config.build_http_client()
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        self.client().login(request).await
    }

    async fn logout(&self) -> ClientResult<()> {
        self.client().logout().await
    }
}

#[async_trait]
impl MatrixBackend for HttpBackend {
    async fn fetch_matrix(&self) -> ClientResult<RoleMatrix> {
        self.client().fetch_role_matrix().await
    }

    async fn push_toggle(&self, toggle: &MatrixToggleRequest) -> ClientResult<()> {
        self.client().push_matrix_toggle(toggle).await
    }
}

#[async_trait]
impl SettingsBackend for HttpBackend {
    async fn fetch_settings(&self) -> ClientResult<FeatureSettings> {
        self.client().fetch_feature_settings().await
    }

    async fn save_settings(&self, settings: &FeatureSettings) -> ClientResult<()> {
        self.client().save_feature_settings(settings).await
    }
}
