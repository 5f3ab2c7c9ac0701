//! Shared types for the billfish console
//!
//! Common types used across the client and console crates: roles, the
//! capability catalogue, the permission matrix, wire DTOs, and
//! notification payloads.

pub mod capability;
pub mod client;
pub mod matrix;
pub mod notification;
pub mod principal;
pub mod role;
pub mod util;

// Re-exports
pub use capability::{Capability, Category};
pub use matrix::PermissionMatrix;
pub use principal::Principal;
pub use role::Role;
pub use serde::{Deserialize, Serialize};
