//! Artist-fair shuffle
//!
//! Random mode picks an artist uniformly first and then a track uniformly
//! within that artist. An artist with one track is chosen as often as an
//! artist with fifty, so prolific artists do not drown out the rest of the
//! playlist.
//!
//! The index is built from one playlist snapshot and remembers that
//! snapshot's revision. Querying it with a playlist that has since changed
//! fails with [`PlaybackError::StaleIndex`] instead of returning a position
//! that may no longer exist.

use crate::error::{PlaybackError, Result};
use encore_core::{PlaylistSnapshot, Track};
use rand::{thread_rng, Rng};
use std::collections::HashMap;

/// Tracks of one artist, in playlist order
#[derive(Debug, Clone)]
struct ArtistBucket {
    artist: String,
    entries: Vec<(usize, Track)>,
}

/// Artist buckets over a playlist snapshot
#[derive(Debug, Clone)]
pub struct ShuffleBucketIndex {
    revision: u64,
    buckets: Vec<ArtistBucket>,
    len: usize,
}

impl ShuffleBucketIndex {
    /// Group every track of `playlist` by artist
    ///
    /// Artists keep the order in which they first appear. Tracks without an
    /// artist share one bucket keyed by the empty name.
    pub fn build(playlist: &PlaylistSnapshot) -> Self {
        let mut buckets: Vec<ArtistBucket> = Vec::new();
        let mut by_artist: HashMap<&str, usize> = HashMap::new();

        for (position, track) in playlist.iter().enumerate() {
            let slot = *by_artist.entry(track.artist.as_str()).or_insert_with(|| {
                buckets.push(ArtistBucket {
                    artist: track.artist.clone(),
                    entries: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].entries.push((position, track.clone()));
        }

        tracing::debug!(
            artists = buckets.len(),
            tracks = playlist.len(),
            revision = playlist.revision(),
            "Built shuffle index"
        );

        Self {
            revision: playlist.revision(),
            buckets,
            len: playlist.len(),
        }
    }

    /// Revision of the snapshot this index was built from
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of indexed tracks
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct artists
    pub fn artist_count(&self) -> usize {
        self.buckets.len()
    }

    /// Artist names in first-seen order
    pub fn artists(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.artist.as_str())
    }

    /// Positions and tracks recorded for `artist`
    pub fn bucket(&self, artist: &str) -> Option<&[(usize, Track)]> {
        self.buckets
            .iter()
            .find(|b| b.artist == artist)
            .map(|b| b.entries.as_slice())
    }

    /// Pick a position using the thread-local generator
    pub fn pick_random(&self) -> Result<usize> {
        self.pick_random_with(&mut thread_rng())
    }

    /// Pick a position: uniform artist, then uniform track of that artist
    pub fn pick_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        if self.buckets.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }

        let bucket = &self.buckets[rng.gen_range(0..self.buckets.len())];
        let (position, _) = &bucket.entries[rng.gen_range(0..bucket.entries.len())];
        Ok(*position)
    }

    /// Pick a position in `playlist`, refusing if it changed since the build
    pub fn pick_random_for(&self, playlist: &PlaylistSnapshot) -> Result<usize> {
        self.ensure_current(playlist)?;
        self.pick_random()
    }

    /// Fail with `StaleIndex` unless `playlist` is the snapshot this index covers
    pub fn ensure_current(&self, playlist: &PlaylistSnapshot) -> Result<()> {
        if playlist.revision() == self.revision {
            Ok(())
        } else {
            Err(PlaybackError::StaleIndex {
                built_from: self.revision,
                queried_with: playlist.revision(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn track(id: i64, artist: &str) -> Track {
        Track::new(
            id,
            format!("Track {id}"),
            artist,
            "Album",
            format!("album-{artist}"),
            format!("/music/{id}.flac"),
        )
    }

    #[test]
    fn groups_by_artist_in_first_seen_order() {
        let playlist = PlaylistSnapshot::new(vec![
            track(1, "B"),
            track(2, "A"),
            track(3, "B"),
            track(4, "C"),
            track(5, "A"),
        ]);

        let index = ShuffleBucketIndex::build(&playlist);

        assert_eq!(index.artists().collect::<Vec<_>>(), vec!["B", "A", "C"]);
        assert_eq!(index.artist_count(), 3);
        assert_eq!(index.len(), 5);

        let positions: Vec<usize> = index.bucket("A").unwrap().iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![1, 4]);
        assert_eq!(index.bucket("C").unwrap()[0].1.id, 4);
        assert!(index.bucket("D").is_none());
    }

    #[test]
    fn empty_artist_is_its_own_bucket() {
        let playlist = PlaylistSnapshot::new(vec![track(1, ""), track(2, "A"), track(3, "")]);

        let index = ShuffleBucketIndex::build(&playlist);

        assert_eq!(index.artist_count(), 2);
        assert_eq!(index.bucket("").unwrap().len(), 2);
    }

    #[test]
    fn empty_playlist_fails_to_pick() {
        let playlist = PlaylistSnapshot::empty();
        let index = ShuffleBucketIndex::build(&playlist);

        assert!(index.is_empty());
        assert!(matches!(index.pick_random(), Err(PlaybackError::EmptyPlaylist)));
        assert!(matches!(
            index.pick_random_for(&playlist),
            Err(PlaybackError::EmptyPlaylist)
        ));
    }

    #[test]
    fn single_track_always_picked() {
        let playlist = PlaylistSnapshot::new(vec![track(7, "Solo")]);
        let index = ShuffleBucketIndex::build(&playlist);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            assert_eq!(index.pick_random_with(&mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn mutated_playlist_is_stale() {
        let mut playlist = PlaylistSnapshot::new(vec![track(1, "A"), track(2, "B")]);
        let index = ShuffleBucketIndex::build(&playlist);
        assert!(index.pick_random_for(&playlist).is_ok());

        playlist.push(track(3, "C"));

        match index.pick_random_for(&playlist) {
            Err(PlaybackError::StaleIndex {
                built_from,
                queried_with,
            }) => {
                assert_eq!(built_from, index.revision());
                assert_eq!(queried_with, playlist.revision());
            }
            other => panic!("expected stale index, got {other:?}"),
        }
    }

    #[test]
    fn equal_but_distinct_snapshot_is_stale() {
        let playlist = PlaylistSnapshot::new(vec![track(1, "A")]);
        let copy = PlaylistSnapshot::new(vec![track(1, "A")]);
        let index = ShuffleBucketIndex::build(&playlist);

        assert_eq!(playlist, copy);
        assert!(index.ensure_current(&copy).is_err());
    }

    #[test]
    fn every_artist_gets_picked() {
        let playlist = PlaylistSnapshot::new(vec![
            track(1, "A"),
            track(2, "B"),
            track(3, "B"),
            track(4, "C"),
        ]);
        let index = ShuffleBucketIndex::build(&playlist);
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let position = index.pick_random_with(&mut rng).unwrap();
            seen.insert(playlist.get(position).unwrap().artist.clone());
        }

        assert_eq!(seen.len(), 3);
    }
}
