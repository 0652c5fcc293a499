//! Encore Storage
//!
//! `SQLite` persistence for playlist snapshots, transport state and
//! bookmarks.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: `states` owns the `state` table and the atomic
//!   save/remove units, `state_tracks` owns the playlist rows
//! - **Atomic Units**: a state row and its playlist rows are always written
//!   and deleted in one transaction
//! - **Single Writer**: saves and removals are serialised per store
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_core::{PlaylistSnapshot, StateRepository, TransportState};
//! use encore_storage::StateStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StateStore::open("sqlite://encore-state.db", 5).await?;
//!
//! let playlist = PlaylistSnapshot::empty();
//! let state = TransportState::default();
//! let timestamp = store.save(&playlist, &state, "evening", false).await?;
//!
//! let restored = store.get_state(timestamp).await?;
//! assert_eq!(restored.track_count, 0);
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

// Vertical slices
pub mod state_tracks;
pub mod states;

pub use error::{Result, StorageError};
pub use store::StateStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://encore-state.db>`)
/// * `max_connections` - pool size
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal) // readers never see a half-written save
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("Pool created");

    Ok(pool)
}
