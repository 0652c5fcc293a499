//! Domain types shared by storage, playback and the command-line tool

mod bookmark;
mod now_playing;
mod playlist;
mod track;
mod transport;

pub use bookmark::BookmarkRecord;
pub use now_playing::{NowPlayingSnapshot, PlaybackStatus};
pub use playlist::PlaylistSnapshot;
pub use track::{Track, TrackId};
pub use transport::{RepeatMode, TransportState};

/// Creation time of a persisted state, in milliseconds since the Unix epoch
pub type Timestamp = i64;
