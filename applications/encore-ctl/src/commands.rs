//! Subcommand implementations
//!
//! Each command works against any [`StateRepository`] and returns what it
//! found; `main` only prints.

use crate::error::{CtlError, Result};
use encore_core::{BookmarkRecord, PlaylistSnapshot, StateRepository, Timestamp, TransportState};
use encore_playback::{PlayQueue, ShuffleBucketIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// One persisted state with its playlist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedState {
    pub record: BookmarkRecord,
    pub state: TransportState,
    pub playlist: PlaylistSnapshot,
}

/// Load the state saved under `timestamp`, or the newest one
pub async fn load_saved_state<R>(repo: &R, timestamp: Option<Timestamp>) -> Result<SavedState>
where
    R: StateRepository + ?Sized,
{
    let timestamp = match timestamp {
        Some(timestamp) => timestamp,
        None => repo.latest_timestamp().await?.ok_or(CtlError::NothingSaved)?,
    };

    let record = repo
        .get_bookmark(timestamp)
        .await?
        .ok_or(CtlError::NotFound(timestamp))?;
    let state = repo.get_state(timestamp).await?;
    let playlist = repo.read_playlist(timestamp).await?;

    Ok(SavedState {
        record,
        state,
        playlist,
    })
}

/// Delete a saved state, failing when nothing is stored under `timestamp`
pub async fn remove_saved_state<R>(repo: &R, timestamp: Timestamp) -> Result<BookmarkRecord>
where
    R: StateRepository + ?Sized,
{
    let record = repo
        .get_bookmark(timestamp)
        .await?
        .ok_or(CtlError::NotFound(timestamp))?;
    repo.remove(timestamp).await?;

    tracing::info!(timestamp, title = %record.title, "Removed saved state");
    Ok(record)
}

/// Copy a stored state (the newest one by default) into a titled bookmark
///
/// `autosave_title` is reserved for the rolling autosave row.
pub async fn bookmark_saved_state<R>(
    repo: &R,
    from: Option<Timestamp>,
    title: &str,
    autosave_title: &str,
) -> Result<Timestamp>
where
    R: StateRepository + ?Sized,
{
    if title.trim().is_empty() {
        return Err(CtlError::InvalidTitle("title is empty".to_string()));
    }
    if title == autosave_title {
        return Err(CtlError::InvalidTitle(format!(
            "'{title}' is reserved for autosave"
        )));
    }

    let source = match from {
        Some(timestamp) => timestamp,
        None => repo.latest_timestamp().await?.ok_or(CtlError::NothingSaved)?,
    };
    let queue = PlayQueue::restore(repo, source)
        .await?
        .ok_or(CtlError::NotFound(source))?;

    Ok(queue.save_bookmark(repo, title).await?)
}

/// Draw `count` artist-fair picks from `playlist`
///
/// A `seed` makes the preview reproducible.
pub fn shuffle_preview(
    playlist: &PlaylistSnapshot,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<usize>> {
    let index = ShuffleBucketIndex::build(playlist);

    let picks = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..count)
                .map(|_| index.pick_random_with(&mut rng))
                .collect::<encore_playback::Result<Vec<_>>>()?
        }
        None => (0..count)
            .map(|_| index.pick_random_for(playlist))
            .collect::<encore_playback::Result<Vec<_>>>()?,
    };

    Ok(picks)
}

pub fn export_json(saved: &SavedState) -> Result<String> {
    Ok(serde_json::to_string_pretty(saved)?)
}

pub fn format_bookmarks(records: &[BookmarkRecord]) -> String {
    if records.is_empty() {
        return "No bookmarks saved.\n".to_string();
    }

    records
        .iter()
        .map(|record| {
            format!(
                "{:>15}  {}  {:>4} tracks  {}\n",
                record.timestamp,
                format_created(record),
                record.track_count,
                record.title
            )
        })
        .collect()
}

pub fn format_saved_state(saved: &SavedState) -> String {
    let record = &saved.record;
    let state = &saved.state;

    let header = format!(
        "{} ({}){}\ntrack {}/{} at {}  random: {}  repeat: {}\n",
        record.title,
        format_created(record),
        if record.autosave { " [autosave]" } else { "" },
        state.track_index + 1,
        state.track_count,
        format_position(state.position_ms),
        if state.random { "on" } else { "off" },
        state.repeat
    );

    let tracks = saved.playlist.iter().enumerate().map(|(i, track)| {
        let marker = if i == state.track_index { '>' } else { ' ' };
        let artist = if track.artist.is_empty() {
            "<unknown artist>"
        } else {
            track.artist.as_str()
        };
        format!("{marker} {:>3}. {} - {}\n", i + 1, artist, track.display_name())
    });

    std::iter::once(header).chain(tracks).collect()
}

fn format_created(record: &BookmarkRecord) -> String {
    record.created_at().map_or_else(
        || "unknown time".to_string(),
        |created| created.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

fn format_position(position_ms: u64) -> String {
    let secs = position_ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::{RepeatMode, Track};

    fn saved() -> SavedState {
        let playlist: PlaylistSnapshot = vec![
            Track::new(1, "One", "Alpha", "LP", "lp", "/1"),
            Track::new(2, "", "", "LP", "lp", "/music/two.ogg"),
        ]
        .into_iter()
        .collect();

        SavedState {
            record: BookmarkRecord {
                timestamp: 1_700_000_000_000,
                title: "evening".into(),
                track_count: 2,
                autosave: false,
            },
            state: TransportState {
                track_index: 1,
                position_ms: 125_000,
                random: false,
                repeat: RepeatMode::All,
                track_count: 2,
            },
            playlist,
        }
    }

    #[test]
    fn saved_state_listing_marks_current_track() {
        let text = format_saved_state(&saved());

        assert!(text.starts_with("evening (2023-11-14 22:13:20)"));
        assert!(text.contains("track 2/2 at 2:05"));
        assert!(text.contains("repeat: all"));
        assert!(text.contains(">   2. <unknown artist> - two.ogg"));
        assert!(text.contains("    1. Alpha - One"));
    }

    #[test]
    fn bookmark_listing_has_one_line_per_record() {
        let first = saved().record;
        let mut second = first.clone();
        second.title = "morning".into();
        let text = format_bookmarks(&[first, second]);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("   2 tracks  evening"));
        assert!(lines[1].ends_with("morning"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn empty_bookmark_list_says_so() {
        assert_eq!(format_bookmarks(&[]), "No bookmarks saved.\n");
    }

    #[test]
    fn export_is_valid_json() {
        let json = export_json(&saved()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["record"]["title"], "evening");
        assert_eq!(value["state"]["repeat"], "all");
        assert_eq!(value["playlist"]["tracks"][0]["name"], "One");
    }

    #[test]
    fn seeded_preview_is_reproducible() {
        let playlist = saved().playlist;

        let first = shuffle_preview(&playlist, 10, Some(5)).unwrap();
        let second = shuffle_preview(&playlist, 10, Some(5)).unwrap();

        assert_eq!(first, second);
        assert!(first.iter().all(|&p| p < 2));
    }

    #[test]
    fn preview_of_empty_playlist_fails() {
        let result = shuffle_preview(&PlaylistSnapshot::empty(), 3, None);
        assert!(matches!(
            result,
            Err(CtlError::Playback(encore_playback::PlaybackError::EmptyPlaylist))
        ));
    }
}
