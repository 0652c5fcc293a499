//! Storage trait for persisted playback state

use crate::error::Result;
use crate::types::{BookmarkRecord, PlaylistSnapshot, Timestamp, TransportState};
use async_trait::async_trait;

/// Title recorded on the rolling autosave row
pub const AUTOSAVE_TITLE: &str = "auto";

/// Durable repository for playlist snapshots, transport state and bookmarks
///
/// Every write is one atomic unit: a state row and its playlist rows are
/// created and destroyed together. Lookups of unknown timestamps are not
/// failures; they yield empty or zero-valued results.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Persist `playlist` and `state` under a fresh timestamp
    ///
    /// With `autosave` set, every previous autosave row is replaced.
    /// Otherwise any row carrying exactly `title` is replaced.
    /// Returns the timestamp of the new row.
    async fn save(
        &self,
        playlist: &PlaylistSnapshot,
        state: &TransportState,
        title: &str,
        autosave: bool,
    ) -> Result<Timestamp>;

    /// Tracks stored under `timestamp`, in their original order
    async fn read_playlist(&self, timestamp: Timestamp) -> Result<PlaylistSnapshot>;

    /// Tracks of the most recently created row
    async fn read_latest_playlist(&self) -> Result<PlaylistSnapshot>;

    /// Transport state stored under `timestamp`, or the zero state
    async fn get_state(&self, timestamp: Timestamp) -> Result<TransportState>;

    /// Transport state of the most recently created row, or the zero state
    async fn get_latest_state(&self) -> Result<TransportState>;

    /// Titled bookmarks, most recent first (autosave rows excluded)
    async fn list_bookmarks(&self) -> Result<Vec<BookmarkRecord>>;

    /// Single record for `timestamp`, autosave rows included
    async fn get_bookmark(&self, timestamp: Timestamp) -> Result<Option<BookmarkRecord>>;

    /// Timestamp of the most recently created row
    async fn latest_timestamp(&self) -> Result<Option<Timestamp>>;

    /// Delete the state row and its playlist rows; unknown timestamps are ignored
    async fn remove(&self, timestamp: Timestamp) -> Result<()>;
}
