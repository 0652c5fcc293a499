//! Encore Core
//!
//! Platform-agnostic domain types, the storage seam and error handling for
//! Encore, a local media-playback controller.
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlaylistSnapshot`, `TransportState`,
//!   `BookmarkRecord`, `NowPlayingSnapshot`
//! - **Storage Trait**: `StateRepository`, implemented by `encore-storage`
//! - **Error Handling**: Unified `EncoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use encore_core::types::{PlaylistSnapshot, RepeatMode, Track, TransportState};
//!
//! let playlist = PlaylistSnapshot::new(vec![
//!     Track::new(1, "Intro", "Artist", "Album", "album-1", "/music/01.flac"),
//!     Track::new(2, "Outro", "Artist", "Album", "album-1", "/music/02.flac"),
//! ]);
//!
//! let state = TransportState {
//!     track_index: 1,
//!     position_ms: 42_000,
//!     random: false,
//!     repeat: RepeatMode::All,
//!     track_count: playlist.len(),
//! };
//!
//! assert!(state.is_resumable());
//! assert_eq!(playlist.get(state.track_index).map(|t| t.name.as_str()), Some("Outro"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{EncoreError, Result};
pub use storage::{StateRepository, AUTOSAVE_TITLE};
pub use types::{
    BookmarkRecord, NowPlayingSnapshot, PlaybackStatus, PlaylistSnapshot, RepeatMode, Timestamp,
    Track, TrackId, TransportState,
};
