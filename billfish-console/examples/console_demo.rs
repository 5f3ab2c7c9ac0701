//! End-to-end tour of the console core against an in-process mock
//! backend: sign-in, guarded routes, an optimistic toggle, feature
//! controls, background polling, and a restart restore.
//!
//! Run: cargo run --example console_demo

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use billfish_console::{
    Capability, ChannelNotifier, ConsoleBridge, ConsoleConfig, NotificationPayload, Refresher,
    Role, RouteRequirement, POLL_INTERVAL,
};
use shared::client::{FeatureSettings, LoginRequest, LoginResponse, UserInfo};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Clone, Default)]
struct MockState {
    logout_calls: Arc<AtomicUsize>,
}

async fn login_handler(Json(req): Json<LoginRequest>) -> impl IntoResponse {
    let role = req.role.unwrap_or(Role::Owner);
    Json(LoginResponse {
        token: "demo-token".to_string(),
        user: UserInfo {
            id: "u-42".to_string(),
            name: "Asha".to_string(),
            role: Some(role.as_str().to_string()),
            is_super_admin: false,
        },
    })
}

async fn logout_handler(State(state): State<MockState>) -> impl IntoResponse {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn matrix_handler() -> impl IntoResponse {
    // The backend narrows the sales row to a handful of keys.
    let mut matrix = HashMap::new();
    matrix.insert(
        "SALES_EXECUTIVE".to_string(),
        vec![
            "view_dashboard".to_string(),
            "view_pos".to_string(),
            "manage_pos".to_string(),
            "view_invoices".to_string(),
        ],
    );
    Json(matrix)
}

async fn toggle_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn settings_handler() -> impl IntoResponse {
    Json(FeatureSettings {
        payments_refund: false,
        ..Default::default()
    })
}

async fn save_settings_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn spawn_mock() -> anyhow::Result<(String, MockState)> {
    let state = MockState::default();
    let app = axum::Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route(
            "/api/users/roles/matrix",
            get(matrix_handler).post(toggle_handler),
        )
        .route(
            "/api/super-admin/settings",
            get(settings_handler).patch(save_settings_handler),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, app).await {
            tracing::error!(%error, "mock backend stopped");
        }
    });

    Ok((format!("http://{addr}"), state))
}

fn drain(rx: &mut UnboundedReceiver<NotificationPayload>) {
    while let Ok(payload) = rx.try_recv() {
        println!("   [{}] {}: {}", payload.level, payload.title, payload.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let (base_url, state) = spawn_mock().await?;
    let data_dir = tempfile::tempdir()?;
    let config = ConsoleConfig::new(&base_url).with_data_dir(data_dir.path());

    let (notifier, mut toasts) = ChannelNotifier::channel();
    let bridge = ConsoleBridge::new(config.clone(), Arc::new(notifier))?;

    println!("=== 1. Sign in as a sales executive ===");
    let principal = bridge
        .sign_in("9000000001", "correct-horse", Some(Role::SalesExecutive))
        .await?;
    println!("   signed in: {} ({})", principal.name, principal.role);
    println!("   phase: {:?}", bridge.guard().phase());

    println!("=== 2. Route decisions ===");
    for requirement in [
        RouteRequirement::Capability(Capability::ViewPos),
        RouteRequirement::Capability(Capability::ManageUsers),
        RouteRequirement::Role(Role::Superadmin),
    ] {
        println!(
            "   {:?} -> {:?}",
            requirement,
            bridge.guard().guard_route(requirement)
        );
    }

    println!("=== 3. Optimistic permission toggle ===");
    let permissions = bridge.permissions();
    println!(
        "   sales/manage_pos before: {}",
        permissions.has(Role::SalesExecutive, Capability::ManagePos)
    );
    permissions
        .toggle(Role::SalesExecutive, Capability::ManagePos)
        .await;
    println!(
        "   sales/manage_pos after:  {}",
        permissions.has(Role::SalesExecutive, Capability::ManagePos)
    );
    drain(&mut toasts);

    println!("=== 4. Feature controls ===");
    let features = bridge.features();
    features.load().await;
    println!(
        "   payments_refund fetched as: {}",
        features.settings().payments_refund
    );
    features.edit(|s| s.billing_cancel_invoice = false);
    features.save().await;
    drain(&mut toasts);

    println!("=== 5. Background polling ({}s cadence) ===", POLL_INTERVAL.as_secs());
    let refresher = Refresher::spawn(bridge.features(), POLL_INTERVAL);
    tokio::time::sleep(POLL_INTERVAL + std::time::Duration::from_secs(1)).await;
    refresher.stop();
    println!("   refresher stopped: {}", refresher.is_stopped());

    println!("=== 6. Restart and restore ===");
    drop(bridge);
    let (notifier, _toasts) = ChannelNotifier::channel();
    let bridge = ConsoleBridge::new(config, Arc::new(notifier))?;
    match bridge.restore().await? {
        Some(principal) => println!("   restored session for {}", principal.name),
        None => println!("   nothing to restore"),
    }

    println!("=== 7. Sign out ===");
    bridge.sign_out();
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    println!(
        "   authenticated: {}, logout calls seen by backend: {}",
        bridge.session().is_authenticated(),
        state.logout_calls.load(Ordering::SeqCst)
    );

    Ok(())
}
