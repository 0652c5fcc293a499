//! Playlist rows belonging to a saved state

use crate::error::Result;
use encore_core::{PlaylistSnapshot, Timestamp, Track};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

#[derive(Debug, FromRow)]
struct StateTrackRow {
    track_number: i32,
    title: String,
    album: String,
    album_key: String,
    duration: i64,
    artist: String,
    url: String,
    track_id: i64,
}

impl From<StateTrackRow> for Track {
    fn from(row: StateTrackRow) -> Self {
        Track {
            id: row.track_id,
            name: row.title,
            artist: row.artist,
            album: row.album,
            album_key: row.album_key,
            duration_ms: row.duration,
            track_number: row.track_number,
            url: row.url,
            date_added: Track::UNKNOWN,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT track_number, title, album, album_key, duration, artist, url, track_id FROM state_tracks";

/// Playlist saved under `timestamp`, empty when the timestamp is unknown
pub async fn get_for_timestamp(pool: &SqlitePool, timestamp: Timestamp) -> Result<PlaylistSnapshot> {
    let rows: Vec<StateTrackRow> =
        sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE timestamp = ? ORDER BY row_id"))
            .bind(timestamp)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(Track::from).collect())
}

/// Playlist of the most recent state row
///
/// Resolves the timestamp and reads the tracks in one statement so a
/// concurrent removal cannot slip between the two.
pub async fn get_latest(pool: &SqlitePool) -> Result<PlaylistSnapshot> {
    let rows: Vec<StateTrackRow> = sqlx::query_as(&format!(
        "{SELECT_COLUMNS} WHERE timestamp = (SELECT MAX(timestamp) FROM state) ORDER BY row_id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Track::from).collect())
}

/// Insert every track of `playlist` in order (caller owns the transaction)
pub async fn insert_all(
    conn: &mut SqliteConnection,
    timestamp: Timestamp,
    playlist: &PlaylistSnapshot,
) -> Result<()> {
    for track in playlist {
        sqlx::query(
            r#"
            INSERT INTO state_tracks
                (timestamp, track_number, title, album, album_key, duration, artist, url, track_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(timestamp)
        .bind(i64::from(track.track_number))
        .bind(&track.name)
        .bind(&track.album)
        .bind(&track.album_key)
        .bind(track.duration_ms)
        .bind(&track.artist)
        .bind(&track.url)
        .bind(track.id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Delete the playlist rows of `timestamp` (caller owns the transaction)
pub async fn delete_for_timestamp(conn: &mut SqliteConnection, timestamp: Timestamp) -> Result<u64> {
    let result = sqlx::query("DELETE FROM state_tracks WHERE timestamp = ?")
        .bind(timestamp)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
