/// Now-playing snapshot shared between the orchestrator and its listeners
use super::Track;
use serde::{Deserialize, Serialize};

/// Transport status reported by the playback engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Nothing loaded
    #[default]
    Stopped,

    /// Paused mid-track
    Paused,

    /// Playing audio
    Playing,

    /// Transient state right after the engine restored a saved state
    Resuming,
}

/// Current track plus transport status, rebuilt on every update
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NowPlayingSnapshot {
    /// Current track, `None` when nothing is loaded
    pub track: Option<Track>,

    /// Transport status
    pub status: PlaybackStatus,

    /// Index of the track in the active playlist
    pub track_index: Option<usize>,

    /// All artwork hidden
    pub hide_artwork: bool,

    /// Artwork hidden on the lock screen only
    pub hide_on_lockscreen: bool,
}

impl NowPlayingSnapshot {
    pub fn new(track: Option<Track>, status: PlaybackStatus) -> Self {
        Self {
            track,
            status,
            ..Default::default()
        }
    }

    /// Snapshot for an idle engine
    pub fn stopped() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_index(mut self, track_index: usize) -> Self {
        self.track_index = Some(track_index);
        self
    }

    /// Copy of this snapshot carrying the given artwork visibility
    #[must_use]
    pub fn with_artwork_visibility(mut self, hide_artwork: bool, hide_on_lockscreen: bool) -> Self {
        self.hide_artwork = hide_artwork;
        self.hide_on_lockscreen = hide_on_lockscreen;
        self
    }

    /// Album key of the current track
    pub fn album_key(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.album_key.as_str())
    }
}
