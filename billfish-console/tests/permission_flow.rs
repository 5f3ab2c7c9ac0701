//! Permission matrix: refresh merging, optimistic toggles, resets.

mod common;

use billfish_console::Refresher;
use shared::capability::Capability;
use shared::matrix::PermissionMatrix;
use shared::role::Role;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[tokio::test]
async fn test_defaults_answer_before_any_refresh() {
    let h = common::harness();

    assert!(!h.permissions.is_settled());
    assert!(h.permissions.has(Role::Owner, Capability::ManageUsers));
    assert!(h.permissions.has(Role::SalesExecutive, Capability::ViewPos));
    assert!(!h.permissions.has(Role::SalesExecutive, Capability::ManageUsers));
}

#[tokio::test]
async fn test_refresh_merges_remote_over_defaults() {
    let h = common::harness();
    *h.matrix.remote.lock() = common::role_matrix(&[("OWNER", &["view_dashboard"])]);

    h.permissions.refresh().await;

    assert!(h.permissions.is_settled());
    assert!(h.permissions.has(Role::Owner, Capability::ViewDashboard));
    assert!(
        !h.permissions.has(Role::Owner, Capability::ManageUsers),
        "keys the remote row omits go off"
    );
    // Roles absent from the payload keep compiled defaults.
    assert!(h.permissions.has(Role::SalesExecutive, Capability::ViewPos));
    assert!(!h.permissions.has(Role::SalesExecutive, Capability::ManageUsers));
}

#[tokio::test]
async fn test_refresh_ignores_unknown_roles_and_keys() {
    let h = common::harness();
    *h.matrix.remote.lock() = common::role_matrix(&[
        ("CASHIER", &["view_dashboard"]),
        ("OWNER", &["view_dashboard", "not_a_real_key"]),
    ]);

    h.permissions.refresh().await;

    assert!(h.permissions.has(Role::Owner, Capability::ViewDashboard));
    assert!(!h.permissions.has_key(Role::Owner, "not_a_real_key"));
    assert!(!h.permissions.has_key(Role::Owner, "CASHIER"));
}

#[tokio::test]
async fn test_refresh_failure_keeps_current_matrix_quietly() {
    let h = common::harness();
    h.matrix.fail_fetch.store(true, Ordering::SeqCst);

    h.permissions.refresh().await;

    assert!(h.permissions.is_settled());
    assert!(h.permissions.has(Role::Owner, Capability::ManageUsers));
    assert!(
        h.notifier.messages().is_empty(),
        "background refresh failures never toast"
    );
}

#[tokio::test]
async fn test_unauthorized_refresh_expires_session() {
    let h = common::harness();
    h.session.set_token("tok-1").unwrap();
    h.session
        .login(common::principal(Role::Owner, false))
        .unwrap();
    h.matrix.unauthorized.store(true, Ordering::SeqCst);

    h.permissions.refresh().await;

    assert!(!h.session.is_authenticated());
    assert!(h.session.token().is_none());
    assert!(h.permissions.is_settled());
}

#[tokio::test]
async fn test_toggle_applies_locally_then_confirms() {
    let h = common::harness();
    assert!(h.permissions.has(Role::SalesExecutive, Capability::ViewReports));

    h.permissions
        .toggle(Role::SalesExecutive, Capability::ViewReports)
        .await;

    assert!(!h.permissions.has(Role::SalesExecutive, Capability::ViewReports));
    {
        let toggles = h.matrix.toggles.lock();
        assert_eq!(toggles.len(), 1);
        assert_eq!(toggles[0].role, Role::SalesExecutive);
        assert_eq!(toggles[0].permission, Capability::ViewReports);
        assert!(!toggles[0].enabled);
    }
    assert_eq!(h.notifier.messages(), ["Permission updated successfully"]);
}

#[tokio::test]
async fn test_toggle_failure_reverts_captured_prior() {
    let h = common::harness();
    h.matrix.fail_toggle.store(true, Ordering::SeqCst);

    h.permissions
        .toggle(Role::SalesExecutive, Capability::ViewReports)
        .await;

    assert!(
        h.permissions.has(Role::SalesExecutive, Capability::ViewReports),
        "rejected toggle puts the entry back"
    );
    assert!(h.matrix.toggles.lock().is_empty());
    assert_eq!(
        h.notifier.messages(),
        ["Failed to update permission. Reverting changes."]
    );
}

#[tokio::test]
async fn test_toggle_round_trip_lands_on_the_starting_matrix() {
    let h = common::harness();
    let before = h.permissions.snapshot();
    h.matrix.fail_toggle.store(true, Ordering::SeqCst);

    h.permissions
        .toggle(Role::SalesExecutive, Capability::ManageInvoices)
        .await;
    h.permissions
        .toggle(Role::Owner, Capability::ViewAuditLogs)
        .await;

    assert_eq!(h.permissions.snapshot(), before);
}

#[tokio::test]
async fn test_toggle_unauthorized_expires_session_and_reverts() {
    let h = common::harness();
    h.session.set_token("tok-1").unwrap();
    h.session
        .login(common::principal(Role::Owner, false))
        .unwrap();
    h.matrix.unauthorized.store(true, Ordering::SeqCst);

    h.permissions
        .toggle(Role::SalesExecutive, Capability::ViewReports)
        .await;

    assert!(h.permissions.has(Role::SalesExecutive, Capability::ViewReports));
    assert!(!h.session.is_authenticated());
}

#[tokio::test]
async fn test_enable_all_for_role_keeps_exceptions_off() {
    let h = common::harness();

    h.permissions.enable_all_for_role(
        Role::Owner,
        &[Capability::ViewSubscription, Capability::ManageSubscription],
    );

    assert!(!h.permissions.has(Role::Owner, Capability::ViewSubscription));
    assert!(!h.permissions.has(Role::Owner, Capability::ManageSubscription));
    assert!(h.permissions.has(Role::Owner, Capability::ManageUsers));
    assert!(h.permissions.has(Role::Owner, Capability::ViewAuditLogs));
}

#[tokio::test]
async fn test_reset_role_restores_defaults_for_that_role_only() {
    let h = common::harness();
    *h.matrix.remote.lock() = common::role_matrix(&[
        ("SALES_EXECUTIVE", &["view_dashboard"]),
        ("OWNER", &["view_dashboard"]),
    ]);
    h.permissions.refresh().await;
    assert!(!h.permissions.has(Role::SalesExecutive, Capability::ViewPos));

    h.permissions.reset_role_to_defaults(Role::SalesExecutive);

    assert!(h.permissions.has(Role::SalesExecutive, Capability::ViewPos));
    assert!(!h.permissions.has(Role::SalesExecutive, Capability::ManageUsers));
    // The other narrowed role keeps its remote state.
    assert!(!h.permissions.has(Role::Owner, Capability::ManageUsers));
}

#[tokio::test]
async fn test_reset_all_restores_the_compiled_matrix() {
    let h = common::harness();
    *h.matrix.remote.lock() = common::role_matrix(&[("OWNER", &[])]);
    h.permissions.refresh().await;

    h.permissions.reset_all();

    assert_eq!(h.permissions.snapshot(), PermissionMatrix::defaults());
}

#[tokio::test]
async fn test_has_key_rejects_unknown_keys() {
    let h = common::harness();

    assert!(h.permissions.has_key(Role::Owner, "view_dashboard"));
    assert!(!h.permissions.has_key(Role::Owner, "made_up_key"));
    assert!(!h.permissions.has_key(Role::SalesExecutive, ""));
}

#[tokio::test(start_paused = true)]
async fn test_refresher_polls_the_permission_store() {
    let h = common::harness();
    let refresher = Refresher::spawn(h.permissions.clone(), Duration::from_secs(5));

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(h.matrix.fetches.load(Ordering::SeqCst), 1);
    assert!(h.permissions.is_settled());

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(h.matrix.fetches.load(Ordering::SeqCst), 3);

    refresher.stop();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(h.matrix.fetches.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_catalogue_covers_every_capability() {
    let h = common::harness();
    let catalogue = h.permissions.catalogue();

    assert_eq!(catalogue.len(), Capability::ALL.len());
    assert!(catalogue.iter().all(|info| !info.label.is_empty()));
}
