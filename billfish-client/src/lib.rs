//! Billfish Client - HTTP client for the billing backend
//!
//! Network calls the console core depends on: auth, the role
//! permission matrix, and super-admin feature settings.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared wire types for convenience
pub use shared::client::{
    FeatureSettings, LoginRequest, LoginResponse, MatrixToggleRequest, RoleMatrix, UserInfo,
};
