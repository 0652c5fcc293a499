/// Command-line tool error types
use encore_core::Timestamp;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CtlError>;

#[derive(Debug, Error)]
pub enum CtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No saved state at timestamp {0}")]
    NotFound(Timestamp),

    #[error("No saved state in the store")]
    NothingSaved,

    #[error("Invalid bookmark title: {0}")]
    InvalidTitle(String),

    #[error("Store error: {0}")]
    Store(#[from] encore_core::EncoreError),

    #[error("Playback error: {0}")]
    Playback(#[from] encore_playback::PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<encore_storage::StorageError> for CtlError {
    fn from(err: encore_storage::StorageError) -> Self {
        CtlError::Store(err.into())
    }
}

impl From<config::ConfigError> for CtlError {
    fn from(err: config::ConfigError) -> Self {
        CtlError::Config(err.to_string())
    }
}
