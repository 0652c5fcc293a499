//! Transport commands from media buttons and remote controls

use serde::{Deserialize, Serialize};

/// Command forwarded to the playback engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportCommand {
    Play,
    Pause,
    Next,
    Previous,
    Stop,
    /// Absolute position in milliseconds
    SeekTo(u64),
}

impl TransportCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Stop => "stop",
            Self::SeekTo(_) => "seek_to",
        }
    }
}
