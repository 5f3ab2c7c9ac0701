//! Feature control settings store.
//!
//! One document of module kill-switches, edited by the super admin and
//! obeyed by every billing screen. Edits stage locally until `save`
//! pushes the whole draft. Two read paths exist on purpose: the
//! settings screen loads loudly, the billing screens poll quietly.

use crate::backend::SettingsBackend;
use crate::notify::Notify;
use crate::refresh::Refresh;
use crate::session::SessionStore;
use async_trait::async_trait;
use billfish_client::ClientError;
use parking_lot::RwLock;
use shared::client::FeatureSettings;
use shared::notification::{NotificationCategory, NotificationPayload};
use std::sync::Arc;

pub struct FeatureStore {
    settings: RwLock<FeatureSettings>,
    backend: Arc<dyn SettingsBackend>,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notify>,
}

impl FeatureStore {
    pub fn new(
        backend: Arc<dyn SettingsBackend>,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notify>,
    ) -> Self {
        Self {
            settings: RwLock::new(FeatureSettings::default()),
            backend,
            session,
            notifier,
        }
    }

    /// Current snapshot. Everything defaults to enabled until a fetch
    /// says otherwise.
    pub fn settings(&self) -> FeatureSettings {
        self.settings.read().clone()
    }

    /// Stage a local edit. Nothing leaves the process until [`save`].
    ///
    /// [`save`]: FeatureStore::save
    pub fn edit(&self, apply: impl FnOnce(&mut FeatureSettings)) {
        apply(&mut self.settings.write());
    }

    /// Explicit load for the settings screen. Failure keeps local state
    /// and raises an error toast.
    pub async fn load(&self) {
        if let Err(error) = self.fetch().await {
            tracing::warn!(%error, "feature settings load failed");
            self.notifier.notify(
                NotificationPayload::error("Feature Controls", "Error loading feature controls")
                    .with_category(NotificationCategory::Features),
            );
        }
    }

    /// Quiet variant backing the billing screens' background poll. A
    /// flaky network must not toast every five seconds.
    pub async fn poll(&self) {
        if let Err(error) = self.fetch().await {
            tracing::debug!(%error, "feature settings poll failed");
        }
    }

    async fn fetch(&self) -> Result<(), ClientError> {
        match self.backend.fetch_settings().await {
            Ok(remote) => {
                *self.settings.write() = remote;
                Ok(())
            }
            Err(error) => {
                if error.is_auth_error() {
                    self.session.expire();
                }
                Err(error)
            }
        }
    }

    /// Push the full draft. Failure keeps the draft so the admin can
    /// retry without re-entering changes.
    pub async fn save(&self) {
        let draft = self.settings();
        match self.backend.save_settings(&draft).await {
            Ok(()) => {
                tracing::info!("feature settings saved");
                self.notifier.notify(
                    NotificationPayload::success(
                        "Feature Controls",
                        "Feature controls saved successfully",
                    )
                    .with_category(NotificationCategory::Features),
                );
            }
            Err(error) => {
                tracing::warn!(%error, "feature settings save failed");
                if error.is_auth_error() {
                    self.session.expire();
                }
                self.notifier.notify(
                    NotificationPayload::error(
                        "Feature Controls",
                        "Error saving feature controls",
                    )
                    .with_category(NotificationCategory::Features),
                );
            }
        }
    }
}

#[async_trait]
impl Refresh for FeatureStore {
    async fn refresh(&self) {
        self.poll().await;
    }
}
