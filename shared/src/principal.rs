//! Authenticated principal

use crate::client::UserInfo;
use crate::role::{Role, UnknownRole};
use serde::{Deserialize, Serialize};

/// The authenticated user's identity, held for the session's duration
/// and persisted as the durable session blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub is_super_admin: bool,
}

/// Raised when a login response's user object cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrincipalError {
    #[error("user {0:?} carries no role")]
    MissingRole(String),
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),
}

impl Principal {
    /// Normalize the auth endpoint's user object.
    ///
    /// Super admins may arrive without a role; everyone else must name
    /// one of the known roles.
    pub fn from_user(user: UserInfo) -> Result<Self, PrincipalError> {
        let role = match user.role.as_deref() {
            Some(name) => name.parse()?,
            None if user.is_super_admin => Role::Superadmin,
            None => return Err(PrincipalError::MissingRole(user.id.clone())),
        };
        Ok(Self {
            id: user.id,
            name: user.name,
            role,
            is_super_admin: user.is_super_admin,
        })
    }

    /// Super admin status always wins over the stored role.
    pub fn effective_role(&self) -> Role {
        if self.is_super_admin {
            Role::Superadmin
        } else {
            self.role
        }
    }
}
