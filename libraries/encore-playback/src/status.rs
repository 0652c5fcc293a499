//! Now-playing status orchestration
//!
//! `StatusOrchestrator` turns each engine status update into the matching
//! media-session state, notification, artwork lookup and broadcast. It is a
//! plain `&mut self` state machine; wrap it in [`SharedStatus`] when updates
//! and artwork deliveries arrive from different tasks.
//!
//! [`SharedStatus`]: crate::SharedStatus

use crate::command::TransportCommand;
use crate::events::{ScrobbleEvent, StatusEvent};
use crate::session::{ArtworkProvider, EventSink, MediaSession, NotificationSink, PlaybackEngine};
use crate::types::{
    Artwork, ScrobblePhase, ServiceState, SessionMetadata, SessionPlayback, StatusConfig,
    TransportAction,
};
use encore_core::{NowPlayingSnapshot, PlaybackStatus, Track};
use std::sync::Arc;
use tracing::{debug, warn};

/// Media-session, notification and artwork state machine
pub struct StatusOrchestrator {
    engine: Arc<dyn PlaybackEngine>,
    session: Box<dyn MediaSession>,
    notifications: Box<dyn NotificationSink>,
    events: Box<dyn EventSink>,
    artwork: Box<dyn ArtworkProvider>,
    config: StatusConfig,

    /// Track whose album artwork was last requested
    last_track: Option<Track>,
    /// Metadata last published to the session
    metadata: SessionMetadata,
    /// Track and status the notification currently shows
    notified: Option<(Track, PlaybackStatus)>,
    session_active: bool,
}

impl StatusOrchestrator {
    /// Wire up the collaborators and announce the initial artwork settings
    pub fn new(
        engine: Arc<dyn PlaybackEngine>,
        session: Box<dyn MediaSession>,
        notifications: Box<dyn NotificationSink>,
        events: Box<dyn EventSink>,
        artwork: Box<dyn ArtworkProvider>,
        config: StatusConfig,
    ) -> Self {
        notifications.hide_artwork(config.hide_artwork);
        notifications.hide_on_lockscreen(config.hide_on_lockscreen);
        events.emit(StatusEvent::ArtworkVisibilityChanged {
            hidden: config.hide_artwork,
        });

        Self {
            engine,
            session,
            notifications,
            events,
            artwork,
            config,
            last_track: None,
            metadata: SessionMetadata::default(),
            notified: None,
            session_active: false,
        }
    }

    pub fn config(&self) -> StatusConfig {
        self.config
    }

    pub fn is_session_active(&self) -> bool {
        self.session_active
    }

    /// Album key of the track whose artwork was last requested
    pub fn artwork_album(&self) -> Option<&str> {
        self.last_track.as_ref().map(|t| t.album_key.as_str())
    }

    /// Metadata currently published to the media session
    pub fn session_metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    /// Activate the media session
    pub fn start(&mut self) {
        if let Err(e) = self.session.set_active(true) {
            warn!("Failed to activate media session: {}", e);
        }
        self.session_active = true;
    }

    /// Publish a neutral stopped state and deactivate the media session
    pub fn stop(&mut self) {
        if let Err(e) = self.session.set_playback_state(&SessionPlayback::stopped()) {
            warn!("Failed to publish stopped session state: {}", e);
        }
        self.last_track = None;
        if let Err(e) = self.session.set_active(false) {
            warn!("Failed to deactivate media session: {}", e);
        }
        self.session_active = false;
    }

    /// Apply one status update from the engine
    ///
    /// Repeating an update is harmless: the notification is only re-shown
    /// when track or status differ and artwork is only requested when the
    /// album changes.
    pub fn update_status(&mut self, info: &NowPlayingSnapshot) {
        let mut track = info.track.clone();
        if let Some(t) = track.as_mut() {
            if t.duration_ms == 0 {
                t.duration_ms = self.engine.duration_ms();
            }
        }

        let snapshot = NowPlayingSnapshot {
            track: track.clone(),
            ..info.clone()
        }
        .with_artwork_visibility(self.config.hide_artwork, self.config.hide_on_lockscreen);

        match info.status {
            PlaybackStatus::Playing | PlaybackStatus::Paused => {
                if let Some(track) = &track {
                    self.publish_metadata(track, info.status);
                    self.show_notification(track, info.status);
                }
                self.events.emit(StatusEvent::NowPlayingChanged(snapshot));

                if let Some(track) = track {
                    let album_changed = !self
                        .last_track
                        .as_ref()
                        .is_some_and(|last| last.same_album(&track));
                    if album_changed {
                        self.last_track = Some(track);
                        if !self.config.hide_artwork {
                            self.start_artwork_request();
                        }
                    }
                }
            }
            PlaybackStatus::Resuming => {
                if let Some(track) = &track {
                    self.publish_metadata(track, info.status);
                }
                self.events.emit(StatusEvent::NowPlayingChanged(snapshot));
                self.last_track = None;
                self.clear_notification();
            }
            PlaybackStatus::Stopped => {
                self.stop();
                self.events.emit(StatusEvent::NowPlayingChanged(snapshot));
                self.clear_notification();
            }
        }
    }

    /// Re-run the update for whatever the engine reports now
    pub fn refresh(&mut self) {
        let info = self.engine.now_playing();
        self.update_status(&info);
    }

    /// New artwork exists for `album_key`; fetch it again if it is current
    pub fn artwork_available(&mut self, album_key: &str) {
        if self.config.hide_artwork {
            return;
        }
        if self.artwork_album() == Some(album_key) {
            self.start_artwork_request();
        }
    }

    /// Apply a finished artwork lookup
    ///
    /// Results for an album other than the current one, or arriving while
    /// artwork is hidden, are dropped. Returns whether the result was applied.
    pub fn artwork_delivered(&mut self, album_key: &str, artwork: Option<Artwork>) -> bool {
        if self.config.hide_artwork || self.artwork_album() != Some(album_key) {
            warn!(
                album_key,
                current = self.artwork_album().unwrap_or(""),
                "Dropping stale artwork result"
            );
            return false;
        }

        self.metadata.artwork = if self.config.hide_on_lockscreen {
            None
        } else {
            artwork.clone()
        };
        if let Err(e) = self.session.set_metadata(&self.metadata) {
            warn!("Failed to publish artwork to media session: {}", e);
        }
        if let Err(e) = self.notifications.set_image(artwork.as_ref()) {
            warn!("Failed to set notification image: {}", e);
        }

        debug!(album_key, found = artwork.is_some(), "Applied artwork");
        true
    }

    pub fn set_hide_artwork(&mut self, hidden: bool) {
        self.config.hide_artwork = hidden;
        self.last_track = None;
        self.notified = None;
        self.notifications.hide_artwork(hidden);
        self.events
            .emit(StatusEvent::ArtworkVisibilityChanged { hidden });
        self.refresh();
    }

    pub fn set_hide_on_lockscreen(&mut self, hidden: bool) {
        self.config.hide_on_lockscreen = hidden;
        self.last_track = None;
        self.notified = None;
        self.notifications.hide_on_lockscreen(hidden);
        self.refresh();
    }

    pub fn set_service_state(&self, state: ServiceState) {
        self.events.emit(match state {
            ServiceState::Busy => StatusEvent::ServiceBusy,
            ServiceState::Idle => StatusEvent::ServiceIdle,
        });
    }

    /// Emit a scrobble event for `track`
    pub fn scrobble(&self, track: &Track, phase: ScrobblePhase) {
        self.events.emit(StatusEvent::Scrobble(ScrobbleEvent {
            phase,
            artist: track.artist.clone(),
            album: track.album.clone(),
            title: track.name.clone(),
            duration_secs: track.duration_secs(),
        }));
    }

    /// Forward a transport command to the engine
    pub fn handle_command(&self, command: TransportCommand) {
        let result = match command {
            TransportCommand::Play => self.engine.resume(),
            TransportCommand::Pause => self.engine.pause(),
            TransportCommand::Next => self.engine.next(),
            TransportCommand::Previous => self.engine.previous(),
            TransportCommand::Stop => self.engine.stop(),
            TransportCommand::SeekTo(position_ms) => self.engine.seek_to(position_ms),
        };

        if let Err(e) = result {
            warn!(command = command.name(), "Transport command failed: {}", e);
        }
    }

    fn publish_metadata(&mut self, track: &Track, status: PlaybackStatus) {
        let playback = SessionPlayback {
            status: if status == PlaybackStatus::Playing {
                PlaybackStatus::Playing
            } else {
                PlaybackStatus::Paused
            },
            position_ms: if status == PlaybackStatus::Playing {
                self.engine.position_ms()
            } else {
                0
            },
            speed: 1.0,
            actions: TransportAction::ALL,
        };
        if let Err(e) = self.session.set_playback_state(&playback) {
            warn!("Failed to publish session playback state: {}", e);
        }

        let artwork = if self.config.hide_artwork || self.config.hide_on_lockscreen {
            None
        } else {
            self.metadata.artwork.take()
        };
        self.metadata = SessionMetadata::for_track(track, artwork);
        if let Err(e) = self.session.set_metadata(&self.metadata) {
            warn!("Failed to publish session metadata: {}", e);
        }
    }

    fn show_notification(&mut self, track: &Track, status: PlaybackStatus) {
        if self
            .notified
            .as_ref()
            .is_some_and(|(shown, shown_status)| shown == track && *shown_status == status)
        {
            return;
        }

        match self.notifications.show(track, status) {
            Ok(()) => self.notified = Some((track.clone(), status)),
            Err(e) => warn!("Failed to show notification: {}", e),
        }
    }

    fn clear_notification(&mut self) {
        self.notified = None;
        if let Err(e) = self.notifications.clear() {
            warn!("Failed to clear notification: {}", e);
        }
    }

    fn start_artwork_request(&mut self) {
        self.metadata.artwork = None;
        if let Err(e) = self.session.set_metadata(&self.metadata) {
            warn!("Failed to clear session artwork: {}", e);
        }

        if let Some(track) = &self.last_track {
            debug!(album_key = %track.album_key, "Requesting artwork");
            self.artwork.request(track);
        }
    }
}
