//! Status events
//!
//! Broadcast to any number of listeners (widgets, scrobblers, the
//! command-line tool). Events are emitted:
//! - after every now-playing update, stamped with the artwork flags
//! - when the service goes busy or idle
//! - when the hide-artwork setting changes
//! - at each scrobble phase

use crate::session::EventSink;
use crate::types::ScrobblePhase;
use encore_core::NowPlayingSnapshot;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events emitted by the status orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatusEvent {
    /// Current track or transport status changed
    NowPlayingChanged(NowPlayingSnapshot),

    /// Service entered the foreground
    ServiceBusy,

    /// Service left the foreground
    ServiceIdle,

    /// Hide-artwork setting changed
    ArtworkVisibilityChanged {
        /// New setting
        hidden: bool,
    },

    /// Scrobble notification for an external scrobbler
    Scrobble(ScrobbleEvent),
}

/// Payload handed to scrobblers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrobbleEvent {
    pub phase: ScrobblePhase,
    pub artist: String,
    pub album: String,
    pub title: String,
    /// Whole seconds, 0 when unknown
    pub duration_secs: i64,
}

/// [`EventSink`] that fans events out over a tokio broadcast channel
///
/// Slow receivers lag and lose old events rather than blocking the
/// orchestrator.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    sender: broadcast::Sender<StatusEvent>,
}

impl ChannelEventSink {
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<StatusEvent>) {
        let (sender, receiver) = broadcast::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.sender.subscribe()
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: StatusEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("No status listeners attached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_subscriber_sees_events() {
        let (sink, mut first) = ChannelEventSink::new(8);
        let mut second = sink.subscribe();

        sink.emit(StatusEvent::ServiceBusy);
        sink.emit(StatusEvent::ArtworkVisibilityChanged { hidden: true });

        assert_eq!(first.recv().await.unwrap(), StatusEvent::ServiceBusy);
        assert_eq!(second.recv().await.unwrap(), StatusEvent::ServiceBusy);
        assert_eq!(
            second.recv().await.unwrap(),
            StatusEvent::ArtworkVisibilityChanged { hidden: true }
        );
    }

    #[test]
    fn emit_without_listeners_is_harmless() {
        let (sink, receiver) = ChannelEventSink::new(1);
        drop(receiver);
        sink.emit(StatusEvent::ServiceIdle);
    }
}
