/// Track model
use serde::{Deserialize, Serialize};

/// Stable track identifier from the media library
pub type TrackId = i64;

/// A playable track and the metadata shown while it plays
///
/// `album_key` is the authoritative "same album" test. Two albums may share
/// a display name; they never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// Library identifier
    pub id: TrackId,

    /// Track title (may be empty for files without tags)
    pub name: String,

    /// Artist name (empty when unknown)
    pub artist: String,

    /// Album display name
    pub album: String,

    /// Album grouping key
    pub album_key: String,

    /// Duration in milliseconds, `-1` when unknown
    pub duration_ms: i64,

    /// Track number within the album, `-1` when unknown
    pub track_number: i32,

    /// Source locator (URI or path)
    pub url: String,

    /// Date added to the library (seconds since epoch), `-1` when unknown
    pub date_added: i64,
}

impl Track {
    /// Sentinel for an unknown duration or track number
    pub const UNKNOWN: i64 = -1;

    /// Create a track with unknown duration, number and date added
    pub fn new(
        id: TrackId,
        name: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        album_key: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            artist: artist.into(),
            album: album.into(),
            album_key: album_key.into(),
            duration_ms: Self::UNKNOWN,
            track_number: -1,
            url: url.into(),
            date_added: Self::UNKNOWN,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_track_number(mut self, track_number: i32) -> Self {
        self.track_number = track_number;
        self
    }

    /// Title to show, falling back to the last segment of the locator
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.url.rsplit('/').next().unwrap_or(&self.url)
        } else {
            &self.name
        }
    }

    /// True when both tracks belong to the same album
    pub fn same_album(&self, other: &Track) -> bool {
        self.album_key == other.album_key
    }

    /// Duration in whole seconds, 0 when unknown
    pub fn duration_secs(&self) -> i64 {
        if self.duration_ms > 0 {
            self.duration_ms / 1000
        } else {
            0
        }
    }
}
