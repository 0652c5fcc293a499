//! Thread-safe handle around the status orchestrator

use crate::artwork::ArtworkDelivery;
use crate::command::TransportCommand;
use crate::status::StatusOrchestrator;
use crate::types::{Artwork, ScrobblePhase, ServiceState, StatusConfig};
use encore_core::{NowPlayingSnapshot, Track};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cloneable handle that serializes every call into one orchestrator
///
/// Engine status updates, UI setting changes and artwork deliveries may
/// come from different tasks; each call runs to completion before the next
/// one starts.
#[derive(Clone)]
pub struct SharedStatus {
    inner: Arc<Mutex<StatusOrchestrator>>,
}

impl SharedStatus {
    pub fn new(orchestrator: StatusOrchestrator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(orchestrator)),
        }
    }

    /// Run `f` with exclusive access to the orchestrator
    pub fn with<R>(&self, f: impl FnOnce(&mut StatusOrchestrator) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn start(&self) {
        self.lock().start();
    }

    pub fn stop(&self) {
        self.lock().stop();
    }

    pub fn update_status(&self, info: &NowPlayingSnapshot) {
        self.lock().update_status(info);
    }

    pub fn refresh(&self) {
        self.lock().refresh();
    }

    pub fn artwork_available(&self, album_key: &str) {
        self.lock().artwork_available(album_key);
    }

    pub fn artwork_delivered(&self, album_key: &str, artwork: Option<Artwork>) -> bool {
        self.lock().artwork_delivered(album_key, artwork)
    }

    pub fn set_hide_artwork(&self, hidden: bool) {
        self.lock().set_hide_artwork(hidden);
    }

    pub fn set_hide_on_lockscreen(&self, hidden: bool) {
        self.lock().set_hide_on_lockscreen(hidden);
    }

    pub fn set_service_state(&self, state: ServiceState) {
        self.lock().set_service_state(state);
    }

    pub fn scrobble(&self, track: &Track, phase: ScrobblePhase) {
        self.lock().scrobble(track, phase);
    }

    pub fn handle_command(&self, command: TransportCommand) {
        self.lock().handle_command(command);
    }

    pub fn config(&self) -> StatusConfig {
        self.lock().config()
    }

    /// Apply artwork deliveries as they arrive until the sender side closes
    pub fn spawn_artwork_pump(
        &self,
        mut deliveries: mpsc::UnboundedReceiver<ArtworkDelivery>,
    ) -> JoinHandle<()> {
        let status = self.clone();
        tokio::spawn(async move {
            while let Some(delivery) = deliveries.recv().await {
                status.artwork_delivered(&delivery.album_key, delivery.artwork);
            }
            tracing::debug!("Artwork delivery channel closed");
        })
    }

    fn lock(&self) -> MutexGuard<'_, StatusOrchestrator> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Status orchestrator lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
