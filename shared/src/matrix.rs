//! Permission matrix
//!
//! Role → capability → enabled table. Two sources of truth: the
//! compiled-in defaults below, and the authoritative remote payload
//! (role name → enabled capability keys) merged over a fresh copy of
//! the defaults. The remote source can only override keys the defaults
//! already carry; everything else it says is ignored.

use crate::capability::Capability;
use crate::role::Role;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Role name → enabled capability keys, as the matrix endpoint reports it.
pub type RoleMatrix = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionMatrix {
    entries: BTreeMap<Role, BTreeMap<Capability, bool>>,
}

impl PermissionMatrix {
    /// Compiled-in defaults for every role.
    ///
    /// Invariant: every role's map carries every catalogue key.
    pub fn defaults() -> Self {
        let entries = Role::ALL
            .iter()
            .map(|&role| (role, Self::default_role_map(role)))
            .collect();
        Self { entries }
    }

    fn default_role_map(role: Role) -> BTreeMap<Capability, bool> {
        Capability::ALL
            .iter()
            .map(|&capability| (capability, default_enabled(role, capability)))
            .collect()
    }

    /// Stored flag for one entry. Missing role or key reads as denied.
    pub fn get(&self, role: Role, capability: Capability) -> bool {
        self.entries
            .get(&role)
            .and_then(|map| map.get(&capability))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, role: Role, capability: Capability, enabled: bool) {
        if let Some(map) = self.entries.get_mut(&role) {
            map.insert(capability, enabled);
        }
    }

    /// Merge an authoritative payload over a fresh copy of the defaults.
    ///
    /// For every payload role the defaults know, each catalogue key
    /// becomes `enabled_keys.contains(key)`. Roles absent from the
    /// payload keep their defaults; unknown role names and unknown keys
    /// inside the lists are ignored.
    pub fn merged_with_remote(remote: &RoleMatrix) -> Self {
        let mut merged = Self::defaults();
        for (role_name, enabled_keys) in remote {
            let Some(role) = Role::parse(role_name) else {
                continue;
            };
            let Some(map) = merged.entries.get_mut(&role) else {
                continue;
            };
            for (capability, enabled) in map.iter_mut() {
                *enabled = enabled_keys.iter().any(|key| key == capability.key());
            }
        }
        merged
    }

    /// Overwrite one role's entries with its defaults, leaving other
    /// roles untouched.
    pub fn reset_role(&mut self, role: Role) {
        self.entries.insert(role, Self::default_role_map(role));
    }

    /// Set every capability for the role to true except the named
    /// exceptions, which are forced false. One atomic local operation.
    pub fn enable_all_for_role(&mut self, role: Role, exceptions: &[Capability]) {
        if let Some(map) = self.entries.get_mut(&role) {
            for (capability, enabled) in map.iter_mut() {
                *enabled = !exceptions.contains(capability);
            }
        }
    }

    /// Snapshot of one role's map, empty if the role is unknown.
    pub fn role_map(&self, role: Role) -> BTreeMap<Capability, bool> {
        self.entries.get(&role).cloned().unwrap_or_default()
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::defaults()
    }
}

fn default_enabled(role: Role, capability: Capability) -> bool {
    use Capability::*;
    match role {
        Role::Superadmin | Role::Owner => true,
        Role::SalesExecutive => matches!(
            capability,
            ViewDashboard
                | ViewCustomers
                | ManageCustomers
                | ExportCustomers
                | ViewInventory
                | ExportInventory
                | ViewPos
                | ManagePos
                | ExportPos
                | ViewInvoices
                | ManageInvoices
                | ExportInvoices
                | ViewReports
                | ViewLoyalty
                | ViewSupport
        ),
    }
}
