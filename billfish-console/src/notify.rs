//! Notification delivery.
//!
//! Stores push toasts through the [`Notify`] seam; the embedding UI
//! decides how to render them. Most failures never reach this boundary,
//! only the handful the operator must see.

use shared::notification::NotificationPayload;
use tokio::sync::mpsc;

/// Sink for user-facing notifications.
pub trait Notify: Send + Sync {
    fn notify(&self, payload: NotificationPayload);
}

/// Channel-backed notifier.
///
/// The UI holds the receiver and drains toasts at its own pace. If the
/// receiver is gone the payload is dropped; the console keeps working
/// headless.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<NotificationPayload>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NotificationPayload>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notify for ChannelNotifier {
    fn notify(&self, payload: NotificationPayload) {
        if self.tx.send(payload).is_err() {
            tracing::debug!("notification receiver dropped, payload discarded");
        }
    }
}

/// Notifier that discards everything. For tests and background tools.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notify for NullNotifier {
    fn notify(&self, _payload: NotificationPayload) {}
}
