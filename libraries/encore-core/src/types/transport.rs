/// Transport state types
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Repeat mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }
}

impl FromStr for RepeatMode {
    type Err = crate::EncoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "all" => Ok(Self::All),
            "one" => Ok(Self::One),
            other => Err(crate::EncoreError::invalid_input(format!(
                "unknown repeat mode '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where playback stands within a playlist
///
/// The zero value (`Default`) means "no prior state". It is only a valid
/// resume point when `track_count` is non-zero, see [`is_resumable`].
///
/// [`is_resumable`]: TransportState::is_resumable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransportState {
    /// Index of the current track in the playlist
    pub track_index: usize,

    /// Position within the current track in milliseconds
    pub position_ms: u64,

    /// Random (artist-fair shuffle) mode
    pub random: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Playlist length recorded when the state was saved
    pub track_count: usize,
}

impl TransportState {
    /// True when this state points at a track of a non-empty playlist
    pub fn is_resumable(&self) -> bool {
        self.track_count > 0 && self.track_index < self.track_count
    }
}
