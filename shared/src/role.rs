//! Role definitions
//!
//! The console knows a closed set of three roles. The wire format uses
//! the upper-case names the backend reports ("SUPERADMIN", "OWNER",
//! "SALES_EXECUTIVE").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Superadmin,
    Owner,
    SalesExecutive,
}

impl Role {
    /// Every role the default matrix carries.
    pub const ALL: [Role; 3] = [Role::Superadmin, Role::Owner, Role::SalesExecutive];

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "SUPERADMIN",
            Role::Owner => "OWNER",
            Role::SalesExecutive => "SALES_EXECUTIVE",
        }
    }

    /// Parse a wire role name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "SUPERADMIN" => Some(Role::Superadmin),
            "OWNER" => Some(Role::Owner),
            "SALES_EXECUTIVE" => Some(Role::SalesExecutive),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a wire payload names a role this console does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}
