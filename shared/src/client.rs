//! Wire types shared between the console and its backend
//!
//! Request/response shapes for the auth, role-matrix, and feature
//! settings endpoints. These mirror what the backend actually sends;
//! normalization into console types happens at the boundary.

use crate::capability::Capability;
use crate::role::Role;
use serde::{Deserialize, Serialize};

pub use crate::matrix::RoleMatrix;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
    /// Role hint for multi-tier login screens; the backend decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information as the auth endpoint reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    /// Raw role name; absent for some super-admin accounts.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_super_admin: bool,
}

// =============================================================================
// Role matrix API DTOs
// =============================================================================

/// Single-entry permission toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixToggleRequest {
    pub role: Role,
    pub permission: Capability,
    pub enabled: bool,
}

// =============================================================================
// Feature settings API DTOs
// =============================================================================

/// Module kill-switches the super admin controls. Fetched and saved as
/// one document; every flag ships enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    // Dashboard module
    pub dashboard_enable: bool,
    pub dashboard_kpi_cards: bool,
    pub dashboard_recent_orders: bool,

    // POS billing module
    pub billing_create_invoice: bool,
    pub billing_cancel_invoice: bool,
    pub billing_complete_payment: bool,
    pub billing_print_pdf: bool,

    // Invoice management module
    pub invoices_history_access: bool,
    pub invoices_reprint_download: bool,
    pub invoices_number_lock: bool,

    // Products and inventory module
    pub inventory_module_enable: bool,
    pub inventory_add_edit_products: bool,
    pub inventory_stock_deduction: bool,

    // Customers module
    pub customers_module_enable: bool,
    pub customers_add_view: bool,
    pub customers_outstanding_tracking: bool,

    // Payments module
    pub payments_cash: bool,
    pub payments_upi_digital: bool,
    pub payments_credit_pay_later: bool,
    pub payments_refund: bool,

    // Tax and GST module
    pub tax_gst_enable: bool,
    pub tax_calculation: bool,
    pub tax_display_on_invoice: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            dashboard_enable: true,
            dashboard_kpi_cards: true,
            dashboard_recent_orders: true,
            billing_create_invoice: true,
            billing_cancel_invoice: true,
            billing_complete_payment: true,
            billing_print_pdf: true,
            invoices_history_access: true,
            invoices_reprint_download: true,
            invoices_number_lock: true,
            inventory_module_enable: true,
            inventory_add_edit_products: true,
            inventory_stock_deduction: true,
            customers_module_enable: true,
            customers_add_view: true,
            customers_outstanding_tracking: true,
            payments_cash: true,
            payments_upi_digital: true,
            payments_credit_pay_later: true,
            payments_refund: true,
            tax_gst_enable: true,
            tax_calculation: true,
            tax_display_on_invoice: true,
        }
    }
}
