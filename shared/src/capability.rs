//! Capability catalogue
//!
//! Fine-grained permission flags the matrix is keyed by. The catalogue
//! is closed: the admin screens render exactly these entries, and wire
//! payloads naming anything else are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named permission flag, wire-keyed by its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    // Dashboard
    ViewDashboard,
    ManageDashboard,
    // Customers
    ViewCustomers,
    ManageCustomers,
    ExportCustomers,
    ImportCustomers,
    // Inventory
    ViewInventory,
    ManageInventory,
    ExportInventory,
    ImportInventory,
    // POS billing
    ViewPos,
    ManagePos,
    ExportPos,
    // Invoices
    ViewInvoices,
    ManageInvoices,
    ExportInvoices,
    // Subscription
    ViewSubscription,
    ManageSubscription,
    // User management
    ManageUsers,
    AssignRoles,
    // Settings
    ManageSettings,
    ViewAuditLogs,
    // Data management
    ExportAll,
    ImportAll,
    // Reports
    ViewReports,
    ExportReports,
    // Loyalty
    ViewLoyalty,
    ManageLoyalty,
    // Support
    ViewSupport,
}

/// Logical group a capability is presented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Dashboard,
    Customers,
    Inventory,
    #[serde(rename = "POS")]
    Pos,
    Invoices,
    Subscription,
    Users,
    Settings,
    Data,
    Reports,
    Loyalty,
    Support,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Dashboard => "Dashboard",
            Category::Customers => "Customers",
            Category::Inventory => "Inventory",
            Category::Pos => "POS",
            Category::Invoices => "Invoices",
            Category::Subscription => "Subscription",
            Category::Users => "Users",
            Category::Settings => "Settings",
            Category::Data => "Data",
            Category::Reports => "Reports",
            Category::Loyalty => "Loyalty",
            Category::Support => "Support",
        };
        f.write_str(name)
    }
}

impl Capability {
    /// Catalogue order, as the admin screens list it.
    pub const ALL: [Capability; 29] = [
        Capability::ViewDashboard,
        Capability::ManageDashboard,
        Capability::ViewCustomers,
        Capability::ManageCustomers,
        Capability::ExportCustomers,
        Capability::ImportCustomers,
        Capability::ViewInventory,
        Capability::ManageInventory,
        Capability::ExportInventory,
        Capability::ImportInventory,
        Capability::ViewPos,
        Capability::ManagePos,
        Capability::ExportPos,
        Capability::ViewInvoices,
        Capability::ManageInvoices,
        Capability::ExportInvoices,
        Capability::ViewSubscription,
        Capability::ManageSubscription,
        Capability::ManageUsers,
        Capability::AssignRoles,
        Capability::ManageSettings,
        Capability::ViewAuditLogs,
        Capability::ExportAll,
        Capability::ImportAll,
        Capability::ViewReports,
        Capability::ExportReports,
        Capability::ViewLoyalty,
        Capability::ManageLoyalty,
        Capability::ViewSupport,
    ];

    /// Wire key of the capability.
    pub fn key(&self) -> &'static str {
        match self {
            Capability::ViewDashboard => "view_dashboard",
            Capability::ManageDashboard => "manage_dashboard",
            Capability::ViewCustomers => "view_customers",
            Capability::ManageCustomers => "manage_customers",
            Capability::ExportCustomers => "export_customers",
            Capability::ImportCustomers => "import_customers",
            Capability::ViewInventory => "view_inventory",
            Capability::ManageInventory => "manage_inventory",
            Capability::ExportInventory => "export_inventory",
            Capability::ImportInventory => "import_inventory",
            Capability::ViewPos => "view_pos",
            Capability::ManagePos => "manage_pos",
            Capability::ExportPos => "export_pos",
            Capability::ViewInvoices => "view_invoices",
            Capability::ManageInvoices => "manage_invoices",
            Capability::ExportInvoices => "export_invoices",
            Capability::ViewSubscription => "view_subscription",
            Capability::ManageSubscription => "manage_subscription",
            Capability::ManageUsers => "manage_users",
            Capability::AssignRoles => "assign_roles",
            Capability::ManageSettings => "manage_settings",
            Capability::ViewAuditLogs => "view_audit_logs",
            Capability::ExportAll => "export_all",
            Capability::ImportAll => "import_all",
            Capability::ViewReports => "view_reports",
            Capability::ExportReports => "export_reports",
            Capability::ViewLoyalty => "view_loyalty",
            Capability::ManageLoyalty => "manage_loyalty",
            Capability::ViewSupport => "view_support",
        }
    }

    /// Parse a wire key. Unknown keys yield `None`, never an error.
    pub fn parse_key(key: &str) -> Option<Capability> {
        Capability::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// Human-readable label for admin screens.
    pub fn label(&self) -> &'static str {
        match self {
            Capability::ViewDashboard => "View Dashboard",
            Capability::ManageDashboard => "Manage Dashboard Widgets",
            Capability::ViewCustomers => "View Customers",
            Capability::ManageCustomers => "Add/Edit/Delete Customers",
            Capability::ExportCustomers => "Export Customers",
            Capability::ImportCustomers => "Import Customers",
            Capability::ViewInventory => "View Inventory",
            Capability::ManageInventory => "Add/Edit/Delete Inventory",
            Capability::ExportInventory => "Export Inventory",
            Capability::ImportInventory => "Import Inventory",
            Capability::ViewPos => "View POS Billing",
            Capability::ManagePos => "Manage POS Billing",
            Capability::ExportPos => "Export POS Data",
            Capability::ViewInvoices => "View Invoices",
            Capability::ManageInvoices => "Add/Edit/Delete Invoices",
            Capability::ExportInvoices => "Export Invoices",
            Capability::ViewSubscription => "View Subscription",
            Capability::ManageSubscription => "Manage Subscription Plans",
            Capability::ManageUsers => "Add/Edit/Delete Users",
            Capability::AssignRoles => "Assign User Roles",
            Capability::ManageSettings => "Manage Application Settings",
            Capability::ViewAuditLogs => "View Audit Logs",
            Capability::ExportAll => "Export All Data",
            Capability::ImportAll => "Import All Data",
            Capability::ViewReports => "View Reports",
            Capability::ExportReports => "Export Reports",
            Capability::ViewLoyalty => "View Loyalty Program",
            Capability::ManageLoyalty => "Manage Loyalty Program",
            Capability::ViewSupport => "View Support",
        }
    }

    /// Group the capability is presented under.
    pub fn category(&self) -> Category {
        use Capability::*;
        match self {
            ViewDashboard | ManageDashboard => Category::Dashboard,
            ViewCustomers | ManageCustomers | ExportCustomers | ImportCustomers => {
                Category::Customers
            }
            ViewInventory | ManageInventory | ExportInventory | ImportInventory => {
                Category::Inventory
            }
            ViewPos | ManagePos | ExportPos => Category::Pos,
            ViewInvoices | ManageInvoices | ExportInvoices => Category::Invoices,
            ViewSubscription | ManageSubscription => Category::Subscription,
            ManageUsers | AssignRoles => Category::Users,
            ManageSettings | ViewAuditLogs => Category::Settings,
            ExportAll | ImportAll => Category::Data,
            ViewReports | ExportReports => Category::Reports,
            ViewLoyalty | ManageLoyalty => Category::Loyalty,
            ViewSupport => Category::Support,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One catalogue row as the roles/permissions screen renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityInfo {
    pub capability: Capability,
    pub key: &'static str,
    pub label: &'static str,
    pub category: Category,
}

/// Full labelled catalogue in presentation order.
pub fn catalogue() -> Vec<CapabilityInfo> {
    Capability::ALL
        .iter()
        .map(|&capability| CapabilityInfo {
            capability,
            key: capability.key(),
            label: capability.label(),
            category: capability.category(),
        })
        .collect()
}
