//! Types exchanged between the status orchestrator and its collaborators

use encore_core::{PlaybackStatus, Track};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Artwork visibility settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Never fetch or show album artwork
    pub hide_artwork: bool,

    /// Keep artwork in the notification but not on the lock screen
    pub hide_on_lockscreen: bool,
}

/// Encoded cover image for one album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    /// Album the image belongs to
    pub album_key: String,

    /// Encoded image bytes
    pub data: Arc<[u8]>,

    /// MIME type (e.g. "image/jpeg")
    pub mime_type: String,
}

impl Artwork {
    pub fn new(
        album_key: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            album_key: album_key.into(),
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Transport controls a media session advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportAction {
    Play,
    Pause,
    Next,
    Previous,
    Stop,
    SeekTo,
}

impl TransportAction {
    /// Every control, advertised while a track is loaded
    pub const ALL: &'static [TransportAction] = &[
        TransportAction::Next,
        TransportAction::Pause,
        TransportAction::Play,
        TransportAction::Previous,
        TransportAction::Stop,
        TransportAction::SeekTo,
    ];
}

/// Transport state published to the media session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlayback {
    /// `Playing`, `Paused` or `Stopped`; `Resuming` is published as `Paused`
    pub status: PlaybackStatus,
    pub position_ms: u64,
    pub speed: f32,
    pub actions: &'static [TransportAction],
}

impl SessionPlayback {
    /// Neutral state used when the session is torn down
    pub fn stopped() -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            position_ms: 0,
            speed: 0.0,
            actions: &[],
        }
    }
}

/// Track metadata published to the media session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionMetadata {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub album_artist: String,
    pub display_title: String,
    pub track_number: i64,
    pub duration_ms: i64,
    pub artwork: Option<Artwork>,
}

impl SessionMetadata {
    /// Metadata for `track`, carrying over `artwork`
    pub fn for_track(track: &Track, artwork: Option<Artwork>) -> Self {
        Self {
            title: track.name.clone(),
            album: track.album.clone(),
            artist: track.artist.clone(),
            album_artist: track.artist.clone(),
            display_title: track.display_name().to_string(),
            track_number: i64::from(track.track_number),
            duration_ms: track.duration_ms,
            artwork,
        }
    }
}

/// Whether the playback service is in the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Busy,
    Idle,
}

/// Scrobble lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrobblePhase {
    Start,
    Resume,
    Pause,
    Complete,
}
