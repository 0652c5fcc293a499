//! Play queue: a playlist plus where playback stands in it
//!
//! Navigation honors repeat and random mode. In random mode the next track
//! comes from a [`ShuffleBucketIndex`] that is rebuilt whenever the playlist
//! changes, so it never refers to positions of an older playlist.

use crate::error::{PlaybackError, Result};
use crate::shuffle::ShuffleBucketIndex;
use encore_core::{
    NowPlayingSnapshot, PlaybackStatus, PlaylistSnapshot, RepeatMode, StateRepository, Timestamp,
    Track, TransportState,
};

#[derive(Debug, Clone)]
pub struct PlayQueue {
    playlist: PlaylistSnapshot,
    track_index: usize,
    position_ms: u64,
    random: bool,
    repeat: RepeatMode,
    shuffle: Option<ShuffleBucketIndex>,
}

impl PlayQueue {
    pub fn new(playlist: PlaylistSnapshot) -> Self {
        Self {
            playlist,
            track_index: 0,
            position_ms: 0,
            random: false,
            repeat: RepeatMode::Off,
            shuffle: None,
        }
    }

    /// Queue positioned according to a saved transport state
    ///
    /// An index past the end of `playlist` is clamped to the last track.
    pub fn with_state(playlist: PlaylistSnapshot, state: TransportState) -> Self {
        let mut queue = Self::new(playlist);
        queue.track_index = state
            .track_index
            .min(queue.playlist.len().saturating_sub(1));
        queue.position_ms = state.position_ms;
        queue.repeat = state.repeat;
        queue.set_random(state.random);
        queue
    }

    pub fn playlist(&self) -> &PlaylistSnapshot {
        &self.playlist
    }

    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// Index of the current track, `None` for an empty queue
    pub fn current_index(&self) -> Option<usize> {
        (!self.playlist.is_empty()).then_some(self.track_index)
    }

    pub fn current(&self) -> Option<&Track> {
        self.playlist.get(self.track_index)
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_random(&self) -> bool {
        self.random
    }

    /// Current transport state, ready to persist
    pub fn transport(&self) -> TransportState {
        TransportState {
            track_index: self.track_index,
            position_ms: self.position_ms,
            random: self.random,
            repeat: self.repeat,
            track_count: self.playlist.len(),
        }
    }

    /// Snapshot of the current track for the status orchestrator
    pub fn now_playing(&self, status: PlaybackStatus) -> NowPlayingSnapshot {
        let snapshot = NowPlayingSnapshot::new(self.current().cloned(), status);
        match self.current_index() {
            Some(index) => snapshot.with_index(index),
            None => snapshot,
        }
    }

    pub fn shuffle_index(&self) -> Option<&ShuffleBucketIndex> {
        self.shuffle.as_ref()
    }

    pub fn set_random(&mut self, random: bool) {
        self.random = random;
        self.shuffle = random.then(|| ShuffleBucketIndex::build(&self.playlist));
    }

    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
    }

    pub fn seek(&mut self, position_ms: u64) {
        self.position_ms = position_ms;
    }

    /// Make `index` the current track, starting from its beginning
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if index >= self.playlist.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        self.track_index = index;
        self.position_ms = 0;
        Ok(())
    }

    /// Move to the track that follows the current one
    ///
    /// Returns the new index, or `None` when playback ran off the end with
    /// repeat off.
    pub fn advance(&mut self) -> Result<Option<usize>> {
        if self.playlist.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }

        let next = if self.repeat == RepeatMode::One {
            Some(self.track_index)
        } else if self.random {
            let playlist = &self.playlist;
            let index = self
                .shuffle
                .get_or_insert_with(|| ShuffleBucketIndex::build(playlist));
            Some(index.pick_random_for(playlist)?)
        } else if self.track_index + 1 < self.playlist.len() {
            Some(self.track_index + 1)
        } else if self.repeat == RepeatMode::All {
            Some(0)
        } else {
            None
        };

        self.position_ms = 0;
        if let Some(index) = next {
            self.track_index = index;
        }
        Ok(next)
    }

    /// Move to the preceding track
    ///
    /// Wraps to the last track under repeat all and stays on the first
    /// track otherwise.
    pub fn previous(&mut self) -> Result<usize> {
        if self.playlist.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }

        if self.repeat != RepeatMode::One {
            self.track_index = match self.track_index {
                0 if self.repeat == RepeatMode::All => self.playlist.len() - 1,
                0 => 0,
                index => index - 1,
            };
        }
        self.position_ms = 0;
        Ok(self.track_index)
    }

    pub fn push(&mut self, track: Track) {
        self.playlist.push(track);
        self.playlist_changed();
    }

    /// Insert before `index`, keeping the current track current
    pub fn insert(&mut self, index: usize, track: Track) -> Result<()> {
        let was_empty = self.playlist.is_empty();
        self.playlist.insert(index, track)?;
        if !was_empty && index <= self.track_index {
            self.track_index += 1;
        }
        self.playlist_changed();
        Ok(())
    }

    /// Remove the track at `index`
    ///
    /// Removing the current track makes the following one current.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        let removed = self.playlist.remove(index)?;

        if index < self.track_index {
            self.track_index -= 1;
        } else if index == self.track_index {
            self.position_ms = 0;
        }
        self.track_index = self
            .track_index
            .min(self.playlist.len().saturating_sub(1));
        self.playlist_changed();
        Some(removed)
    }

    /// Move a track, keeping the current track current
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        self.playlist.move_track(from, to)?;

        let current = self.track_index;
        self.track_index = if current == from {
            to
        } else if from < current && to >= current {
            current - 1
        } else if from > current && to <= current {
            current + 1
        } else {
            current
        };
        self.playlist_changed();
        Ok(())
    }

    /// Swap in a new track list and start from its first track
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.playlist.replace(tracks);
        self.track_index = 0;
        self.position_ms = 0;
        self.playlist_changed();
    }

    /// Persist as the rolling autosave row
    pub async fn autosave<R>(&self, repo: &R, title: &str) -> Result<Timestamp>
    where
        R: StateRepository + ?Sized,
    {
        let timestamp = repo
            .save(&self.playlist, &self.transport(), title, true)
            .await?;
        Ok(timestamp)
    }

    /// Persist as a titled bookmark, replacing any bookmark with the same title
    pub async fn save_bookmark<R>(&self, repo: &R, title: &str) -> Result<Timestamp>
    where
        R: StateRepository + ?Sized,
    {
        let timestamp = repo
            .save(&self.playlist, &self.transport(), title, false)
            .await?;
        Ok(timestamp)
    }

    /// Rebuild the queue saved under `timestamp`
    ///
    /// Returns `None` when nothing resumable was saved there.
    pub async fn restore<R>(repo: &R, timestamp: Timestamp) -> Result<Option<Self>>
    where
        R: StateRepository + ?Sized,
    {
        let state = repo.get_state(timestamp).await?;
        if !state.is_resumable() {
            return Ok(None);
        }

        let playlist = repo.read_playlist(timestamp).await?;
        if playlist.is_empty() {
            tracing::warn!(timestamp, "Saved state has no playlist rows");
            return Ok(None);
        }

        tracing::debug!(
            timestamp,
            tracks = playlist.len(),
            index = state.track_index,
            "Restored play queue"
        );
        Ok(Some(Self::with_state(playlist, state)))
    }

    /// Rebuild the most recently saved queue
    pub async fn restore_latest<R>(repo: &R) -> Result<Option<Self>>
    where
        R: StateRepository + ?Sized,
    {
        match repo.latest_timestamp().await? {
            Some(timestamp) => Self::restore(repo, timestamp).await,
            None => Ok(None),
        }
    }

    fn playlist_changed(&mut self) {
        if self.random {
            self.shuffle = Some(ShuffleBucketIndex::build(&self.playlist));
        }
    }
}
