/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// An atomic save or removal could not commit and was rolled back
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A value does not fit its column
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// A stored row holds a value the domain types cannot represent
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Migration error
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Wrap any failure inside an atomic unit
    pub fn transaction(err: impl std::fmt::Display) -> Self {
        Self::TransactionFailed(err.to_string())
    }
}

impl From<StorageError> for encore_core::EncoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TransactionFailed(msg) => encore_core::EncoreError::Transaction(msg),
            StorageError::OutOfRange(msg) => encore_core::EncoreError::InvalidInput(msg),
            other => encore_core::EncoreError::storage(other.to_string()),
        }
    }
}
