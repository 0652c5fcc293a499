//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints and
//! transactions.

#![allow(dead_code)]

use encore_core::{PlaylistSnapshot, RepeatMode, Track, TransportState};
use encore_storage::StateStore;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub store: StateStore,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("state.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let store = StateStore::open(&db_url, 5)
            .await
            .expect("Failed to open state store");

        Self {
            store,
            _temp_dir: temp_dir,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }
}

/// Test fixture: a track with every persisted field set
pub fn test_track(id: i64, artist: &str, album_key: &str) -> Track {
    Track::new(
        id,
        format!("Song {id}"),
        artist,
        format!("Album {album_key}"),
        album_key,
        format!("file:///music/{artist}/{id}.flac"),
    )
    .with_duration(180_000 + id)
    .with_track_number(id as i32)
}

/// Test fixture: playlist of `count` tracks spread over three albums
pub fn test_playlist(count: i64) -> PlaylistSnapshot {
    (0..count)
        .map(|i| test_track(i + 1, &format!("Artist {}", i % 3), &format!("key-{}", i % 3)))
        .collect()
}

/// Test fixture: a transport state matching `playlist`
pub fn test_state(playlist: &PlaylistSnapshot, index: usize) -> TransportState {
    TransportState {
        track_index: index,
        position_ms: 61_500,
        random: true,
        repeat: RepeatMode::All,
        track_count: playlist.len(),
    }
}
