//! Background polling.
//!
//! One [`Refresher`] drives one store while its screen is mounted. The
//! first tick fires immediately so the screen never waits a full period
//! for data; after that the cadence holds. Dropping the handle cancels
//! the task, so a forgotten screen cannot keep polling forever.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Cadence the billing screens poll at.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Anything a [`Refresher`] can drive.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn refresh(&self);
}

/// Handle to a background polling task.
pub struct Refresher {
    cancel: CancellationToken,
}

impl Refresher {
    /// Start polling `target` every `every`.
    pub fn spawn(target: Arc<dyn Refresh>, every: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            let mut ticker = interval(every);
            tracing::debug!(every_ms = every.as_millis() as u64, "refresher started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => target.refresh().await,
                    _ = token.cancelled() => break,
                }
            }
            tracing::debug!("refresher stopped");
        });
        Self { cancel }
    }

    /// Stop the polling task. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
