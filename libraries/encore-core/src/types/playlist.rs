/// Playlist snapshot
use super::Track;
use crate::error::{EncoreError, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Ordered list of tracks; a track's position is its identity for shuffle
/// and resume
///
/// Every snapshot carries a process-unique revision that changes on each
/// mutation. Indexes derived from a snapshot record the revision they were
/// built from so they can detect that the playlist moved on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSnapshot {
    #[serde(skip, default = "next_revision")]
    revision: u64,
    tracks: Vec<Track>,
}

impl PlaylistSnapshot {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            revision: next_revision(),
            tracks,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Identity of the current contents
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
        self.touch();
    }

    /// Insert a track before `index` (`index == len()` appends)
    pub fn insert(&mut self, index: usize, track: Track) -> Result<()> {
        if index > self.tracks.len() {
            return Err(EncoreError::invalid_input(format!(
                "insert position {index} beyond playlist of {}",
                self.tracks.len()
            )));
        }
        self.tracks.insert(index, track);
        self.touch();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }
        let removed = self.tracks.remove(index);
        self.touch();
        Some(removed)
    }

    /// Move the track at `from` so that it ends up at `to`
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return Err(EncoreError::invalid_input(format!(
                "move {from} -> {to} outside playlist of {len}"
            )));
        }
        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);
        self.touch();
        Ok(())
    }

    /// Swap in a whole new track list
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.touch();
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    fn touch(&mut self) {
        self.revision = next_revision();
    }
}

impl Default for PlaylistSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

// Two snapshots are equal when they hold the same tracks in the same order;
// the revision is bookkeeping, not content.
impl PartialEq for PlaylistSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.tracks == other.tracks
    }
}

impl Eq for PlaylistSnapshot {}

impl FromIterator<Track> for PlaylistSnapshot {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PlaylistSnapshot {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: i64) -> Track {
        Track::new(id, format!("Track {id}"), "Artist", "Album", "album", format!("/{id}"))
    }

    #[test]
    fn every_mutation_changes_revision() {
        let mut playlist = PlaylistSnapshot::new(vec![track(1), track(2)]);
        let mut seen = vec![playlist.revision()];

        playlist.push(track(3));
        seen.push(playlist.revision());
        playlist.insert(0, track(4)).unwrap();
        seen.push(playlist.revision());
        playlist.move_track(0, 3).unwrap();
        seen.push(playlist.revision());
        playlist.remove(1);
        seen.push(playlist.revision());
        playlist.replace(vec![track(9)]);
        seen.push(playlist.revision());

        let mut deduped = seen.clone();
        deduped.dedup();
        assert_eq!(seen, deduped);
    }

    #[test]
    fn failed_mutations_keep_revision() {
        let mut playlist = PlaylistSnapshot::new(vec![track(1)]);
        let revision = playlist.revision();

        assert!(playlist.insert(5, track(2)).is_err());
        assert!(playlist.move_track(0, 4).is_err());
        assert!(playlist.remove(3).is_none());
        assert_eq!(playlist.revision(), revision);
    }

    #[test]
    fn equality_ignores_revision() {
        let a = PlaylistSnapshot::new(vec![track(1), track(2)]);
        let b = PlaylistSnapshot::new(vec![track(1), track(2)]);
        assert_ne!(a.revision(), b.revision());
        assert_eq!(a, b);
    }

    #[test]
    fn move_track_reorders() {
        let mut playlist = PlaylistSnapshot::new(vec![track(1), track(2), track(3)]);
        playlist.move_track(0, 2).unwrap();
        let ids: Vec<i64> = playlist.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
