//! Collaborator seams of the status orchestrator
//!
//! The orchestrator never talks to a platform directly. Hosts plug in an
//! engine, a media session, a notification sink, an event sink and an
//! artwork provider. Collaborator failures are logged by the orchestrator
//! and never abort a status update.

use crate::error::Result;
use crate::events::StatusEvent;
use crate::types::{Artwork, SessionMetadata, SessionPlayback};
use encore_core::{NowPlayingSnapshot, PlaybackStatus, Track};

/// Audio engine queried for the current track and driven by transport commands
pub trait PlaybackEngine: Send + Sync {
    /// What the engine is doing right now
    fn now_playing(&self) -> NowPlayingSnapshot;

    /// Position within the current track in milliseconds
    fn position_ms(&self) -> u64;

    /// Duration of the current track in milliseconds, `-1` when unknown
    fn duration_ms(&self) -> i64;

    fn resume(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn next(&self) -> Result<()>;
    fn previous(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
    fn seek_to(&self, position_ms: u64) -> Result<()>;
}

/// OS-level media session (lock screen, headset buttons)
pub trait MediaSession: Send + Sync {
    fn set_active(&self, active: bool) -> Result<()>;
    fn set_playback_state(&self, playback: &SessionPlayback) -> Result<()>;
    fn set_metadata(&self, metadata: &SessionMetadata) -> Result<()>;
}

/// Persistent playback notification
pub trait NotificationSink: Send + Sync {
    /// Show or update the notification for `track`
    fn show(&self, track: &Track, status: PlaybackStatus) -> Result<()>;

    /// Remove the notification
    fn clear(&self) -> Result<()>;

    /// Replace the notification image; `None` clears it
    fn set_image(&self, artwork: Option<&Artwork>) -> Result<()>;

    fn hide_artwork(&self, hidden: bool);
    fn hide_on_lockscreen(&self, hidden: bool);
}

/// Destination for [`StatusEvent`]s
pub trait EventSink: Send + Sync {
    fn emit(&self, event: StatusEvent);
}

/// Starts an artwork lookup for a track
///
/// Fire-and-forget: the result comes back later through
/// `StatusOrchestrator::artwork_delivered`. Implementations must not call
/// back into the orchestrator from inside `request`.
pub trait ArtworkProvider: Send + Sync {
    fn request(&self, track: &Track);
}
