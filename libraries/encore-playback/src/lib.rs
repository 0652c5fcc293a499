//! Encore - Playback Status
//!
//! Platform-agnostic playback coordination for Encore.
//!
//! This crate provides:
//! - Artist-fair shuffle (`ShuffleBucketIndex`)
//! - Play queue with repeat/random navigation and save/restore (`PlayQueue`)
//! - Now-playing status orchestration (`StatusOrchestrator`)
//! - Asynchronous artwork lookup with an LRU cache (`ArtworkFetcher`)
//! - Status events for widgets and scrobblers (`StatusEvent`)
//!
//! # Architecture
//!
//! `encore-playback` never touches a platform API. The audio engine, media
//! session, notification, event and artwork collaborators are traits in
//! [`session`]; hosts implement them.
//!
//! # Example: Artist-fair shuffle
//!
//! ```rust
//! use encore_core::{PlaylistSnapshot, Track};
//! use encore_playback::ShuffleBucketIndex;
//!
//! let playlist: PlaylistSnapshot = (0..10)
//!     .map(|i| Track::new(i, format!("Song {i}"), "Prolific", "Album", "a", format!("/{i}")))
//!     .chain(std::iter::once(Track::new(99, "Only one", "Rare", "Single", "b", "/99")))
//!     .collect();
//!
//! let index = ShuffleBucketIndex::build(&playlist);
//! assert_eq!(index.artist_count(), 2);
//!
//! // "Rare" comes up about half the time
//! let position = index.pick_random_for(&playlist).unwrap();
//! assert!(position < playlist.len());
//! ```

#![forbid(unsafe_code)]

pub mod artwork;
pub mod command;
pub mod error;
pub mod events;
pub mod queue;
pub mod session;
pub mod shared;
pub mod shuffle;
pub mod status;
pub mod types;

pub use artwork::{ArtworkDelivery, ArtworkFetcher, ArtworkSource};
pub use command::TransportCommand;
pub use error::{PlaybackError, Result};
pub use events::{ChannelEventSink, ScrobbleEvent, StatusEvent};
pub use queue::PlayQueue;
pub use session::{ArtworkProvider, EventSink, MediaSession, NotificationSink, PlaybackEngine};
pub use shared::SharedStatus;
pub use shuffle::ShuffleBucketIndex;
pub use status::StatusOrchestrator;
pub use types::{
    Artwork, ScrobblePhase, ServiceState, SessionMetadata, SessionPlayback, StatusConfig,
    TransportAction,
};
