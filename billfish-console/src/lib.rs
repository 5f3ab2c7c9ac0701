//! Billfish Console - client-side authorization core
//!
//! Session identity, role-based permission checks, feature
//! kill-switches, and route guarding for the billing admin console.
//! Local-first: every check answers synchronously from in-process
//! state while background refreshes reconcile with the backend.

pub mod backend;
pub mod bridge;
pub mod error;
pub mod features;
pub mod guard;
pub mod notify;
pub mod permissions;
pub mod refresh;
pub mod session;
pub mod storage;

pub use backend::{AuthBackend, HttpBackend, MatrixBackend, SettingsBackend};
pub use bridge::{ConsoleBridge, ConsoleConfig};
pub use error::{ConsoleError, ConsoleResult};
pub use features::FeatureStore;
pub use guard::{RouteDecision, RouteGuard, RouteRequirement, SessionPhase};
pub use notify::{ChannelNotifier, Notify, NullNotifier};
pub use permissions::PermissionStore;
pub use refresh::{Refresh, Refresher, POLL_INTERVAL};
pub use session::{SessionError, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

// Re-export shared types for convenience
pub use shared::capability::{Capability, CapabilityInfo, Category};
pub use shared::client::FeatureSettings;
pub use shared::matrix::PermissionMatrix;
pub use shared::notification::{NotificationCategory, NotificationLevel, NotificationPayload};
pub use shared::principal::Principal;
pub use shared::role::Role;
