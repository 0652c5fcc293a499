//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Shuffle or advance requested with no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Shuffle index queried against a playlist it was not built from
    #[error("Shuffle index built from revision {built_from} queried with revision {queried_with}")]
    StaleIndex { built_from: u64, queried_with: u64 },

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// A session, notification or engine collaborator failed
    #[error("Session error: {0}")]
    Session(String),

    /// Persistence failure
    #[error(transparent)]
    Store(#[from] encore_core::EncoreError),
}

impl PlaybackError {
    /// Create a session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }
}

impl From<PlaybackError> for encore_core::EncoreError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::EmptyPlaylist => encore_core::EncoreError::EmptyPlaylist,
            PlaybackError::StaleIndex {
                built_from,
                queried_with,
            } => encore_core::EncoreError::StaleIndex {
                built_from,
                queried_with,
            },
            PlaybackError::Store(inner) => inner,
            other => encore_core::EncoreError::invalid_input(other.to_string()),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
