//! Console error types

use crate::session::SessionError;
use crate::storage::StorageError;
use billfish_client::ClientError;
use shared::principal::PrincipalError;
use thiserror::Error;

/// Error surface of the console bridge.
///
/// Stores swallow most failures internally; only the operations a
/// caller must react to, sign-in and restore, return these.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("API error: {0}")]
    Client(#[from] ClientError),

    #[error("login rejected: {0}")]
    Principal(#[from] PrincipalError),
}

impl ConsoleError {
    /// True when the backend rejected our credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ConsoleError::Client(error) if error.is_auth_error())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
