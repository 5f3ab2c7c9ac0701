//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{
    FeatureSettings, LoginRequest, LoginResponse, MatrixToggleRequest, RoleMatrix,
};

/// HTTP client for making network requests to the billing backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body, ignoring the response body
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::check_status(response).await
    }

    /// Make a POST request without body, ignoring the response body
    pub async fn post_empty(&self, path: &str) -> ClientResult<()> {
        let mut request = self.client.post(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::check_status(response).await
    }

    /// Make a PATCH request with JSON body, ignoring the response body
    pub async fn patch_unit<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let mut request = self.client.patch(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::check_status(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::status_error(status, response).await?);
        }

        response.json().await.map_err(Into::into)
    }

    /// Check the status of a response whose body the caller discards
    async fn check_status(response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::status_error(status, response).await?);
        }

        Ok(())
    }

    async fn status_error(
        status: StatusCode,
        response: reqwest::Response,
    ) -> ClientResult<ClientError> {
        let text = response.text().await?;
        tracing::warn!(status = %status, body = %text, "backend returned error status");
        Ok(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(text)
            }
            _ => ClientError::Internal(text),
        })
    }

    // ========== Auth API ==========

    /// Login with phone and password
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        let response: LoginResponse = self.post("/api/auth/login", request).await?;

        if response.token.is_empty() {
            return Err(ClientError::InvalidResponse(
                "login response carries an empty token".to_string(),
            ));
        }

        Ok(response)
    }

    /// Logout. The backend invalidates the token server-side; local
    /// cleanup is the session store's job.
    pub async fn logout(&self) -> ClientResult<()> {
        self.post_empty("/api/auth/logout").await
    }

    // ========== Role matrix API ==========

    /// Fetch the authoritative role → enabled-capability-keys mapping
    pub async fn fetch_role_matrix(&self) -> ClientResult<RoleMatrix> {
        self.get("/api/users/roles/matrix").await
    }

    /// Persist a single matrix entry toggle
    pub async fn push_matrix_toggle(&self, toggle: &MatrixToggleRequest) -> ClientResult<()> {
        self.post_unit("/api/users/roles/matrix", toggle).await
    }

    // ========== Feature settings API ==========

    /// Fetch the super-admin feature settings document
    pub async fn fetch_feature_settings(&self) -> ClientResult<FeatureSettings> {
        self.get("/api/super-admin/settings").await
    }

    /// Persist the full feature settings document
    pub async fn save_feature_settings(&self, settings: &FeatureSettings) -> ClientResult<()> {
        self.patch_unit("/api/super-admin/settings", settings).await
    }
}
