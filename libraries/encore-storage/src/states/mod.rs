//! Saved states: transport rows, bookmarks and the atomic save/remove units

use crate::error::{Result, StorageError};
use crate::state_tracks;
use encore_core::{BookmarkRecord, PlaylistSnapshot, RepeatMode, Timestamp, TransportState};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

#[derive(Debug, FromRow)]
struct StateRow {
    timestamp: i64,
    track_index: i64,
    track_position: i64,
    random_state: i64,
    repeat_state: String,
    autosave: i64,
    title: String,
    track_count: i64,
}

impl StateRow {
    fn repeat_mode(&self) -> RepeatMode {
        self.repeat_state.parse().unwrap_or_else(|_| {
            tracing::warn!(
                timestamp = self.timestamp,
                "Unknown repeat mode '{}' in saved state, using off",
                self.repeat_state
            );
            RepeatMode::Off
        })
    }

    fn into_transport(self) -> Result<TransportState> {
        Ok(TransportState {
            track_index: column(self.timestamp, "track_index", self.track_index)?,
            position_ms: column(self.timestamp, "track_position", self.track_position)?,
            random: self.random_state != 0,
            repeat: self.repeat_mode(),
            track_count: column(self.timestamp, "track_count", self.track_count)?,
        })
    }

    fn into_bookmark(self) -> Result<BookmarkRecord> {
        Ok(BookmarkRecord {
            timestamp: self.timestamp,
            track_count: column(self.timestamp, "track_count", self.track_count)?,
            title: self.title,
            autosave: self.autosave != 0,
        })
    }
}

fn column<T: TryFrom<i64>>(timestamp: Timestamp, name: &str, value: i64) -> Result<T> {
    T::try_from(value)
        .map_err(|_| StorageError::CorruptRow(format!("state {timestamp} has {name} = {value}")))
}

/// Integer columns of a new row, checked before the transaction starts
struct StateColumns {
    track_index: i64,
    track_position: i64,
    track_count: i64,
}

impl StateColumns {
    fn new(state: &TransportState, playlist: &PlaylistSnapshot) -> Result<Self> {
        Ok(Self {
            track_index: bounded("track_index", state.track_index)?,
            track_position: bounded("track_position", state.position_ms)?,
            track_count: bounded("track_count", playlist.len())?,
        })
    }
}

fn bounded<T>(name: &str, value: T) -> Result<i64>
where
    T: TryInto<i64> + Copy + std::fmt::Display,
{
    value
        .try_into()
        .map_err(|_| StorageError::OutOfRange(format!("{name} = {value}")))
}

const SELECT_COLUMNS: &str = "SELECT timestamp, track_index, track_position, random_state, \
     repeat_state, autosave, title, track_count FROM state";

/// Transport state saved under `timestamp`
///
/// Returns the zero state when no row matches.
pub async fn get(pool: &SqlitePool, timestamp: Timestamp) -> Result<TransportState> {
    let row: Option<StateRow> =
        sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE timestamp = ? LIMIT 1"))
            .bind(timestamp)
            .fetch_optional(pool)
            .await?;

    Ok(row
        .map(StateRow::into_transport)
        .transpose()?
        .unwrap_or_default())
}

/// Transport state of the most recent row, or the zero state
pub async fn get_latest(pool: &SqlitePool) -> Result<TransportState> {
    let row: Option<StateRow> =
        sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY timestamp DESC LIMIT 1"))
            .fetch_optional(pool)
            .await?;

    Ok(row
        .map(StateRow::into_transport)
        .transpose()?
        .unwrap_or_default())
}

/// Timestamp of the most recent row
pub async fn latest_timestamp(pool: &SqlitePool) -> Result<Option<Timestamp>> {
    let latest: Option<i64> = sqlx::query_scalar("SELECT MAX(timestamp) FROM state")
        .fetch_one(pool)
        .await?;

    Ok(latest)
}

/// Titled bookmarks, most recent first
pub async fn list_bookmarks(pool: &SqlitePool) -> Result<Vec<BookmarkRecord>> {
    let rows: Vec<StateRow> =
        sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE autosave = 0 ORDER BY timestamp DESC"))
            .fetch_all(pool)
            .await?;

    rows.into_iter().map(StateRow::into_bookmark).collect()
}

/// Record for `timestamp`, autosave rows included
pub async fn get_bookmark(pool: &SqlitePool, timestamp: Timestamp) -> Result<Option<BookmarkRecord>> {
    let row: Option<StateRow> =
        sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE timestamp = ? LIMIT 1"))
            .bind(timestamp)
            .fetch_optional(pool)
            .await?;

    row.map(StateRow::into_bookmark).transpose()
}

/// Save a playlist and its transport state as one atomic unit
///
/// An autosave replaces every previous autosave row; a titled save replaces
/// the rows carrying the same title. The new row is stamped with the current
/// time in milliseconds, bumped past the newest existing row so timestamps
/// stay unique and increasing.
pub async fn save(
    pool: &SqlitePool,
    playlist: &PlaylistSnapshot,
    state: &TransportState,
    title: &str,
    autosave: bool,
) -> Result<Timestamp> {
    let columns = StateColumns::new(state, playlist)?;
    let mut tx = pool.begin().await.map_err(StorageError::transaction)?;

    match save_in(&mut *tx, playlist, state, &columns, title, autosave).await {
        Ok(timestamp) => {
            tx.commit().await.map_err(StorageError::transaction)?;
            tracing::info!(
                timestamp,
                title,
                autosave,
                tracks = playlist.len(),
                "Saved playback state"
            );
            Ok(timestamp)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!("Rollback after failed save also failed: {}", rollback);
            }
            Err(StorageError::transaction(e))
        }
    }
}

async fn save_in(
    conn: &mut SqliteConnection,
    playlist: &PlaylistSnapshot,
    state: &TransportState,
    columns: &StateColumns,
    title: &str,
    autosave: bool,
) -> Result<Timestamp> {
    let replaced: Vec<i64> = if autosave {
        sqlx::query_scalar("SELECT timestamp FROM state WHERE autosave = 1")
            .fetch_all(&mut *conn)
            .await?
    } else {
        sqlx::query_scalar("SELECT timestamp FROM state WHERE title = ?")
            .bind(title)
            .fetch_all(&mut *conn)
            .await?
    };

    for timestamp in replaced {
        delete_in(conn, timestamp).await?;
    }

    let newest: Option<i64> = sqlx::query_scalar("SELECT MAX(timestamp) FROM state")
        .fetch_one(&mut *conn)
        .await?;
    let now = chrono::Utc::now().timestamp_millis();
    let timestamp = newest.map_or(now, |newest| now.max(newest + 1));

    sqlx::query(
        r#"
        INSERT INTO state
            (timestamp, track_index, track_position, random_state, repeat_state,
             autosave, title, track_count)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(timestamp)
    .bind(columns.track_index)
    .bind(columns.track_position)
    .bind(i64::from(state.random))
    .bind(state.repeat.as_str())
    .bind(i64::from(autosave))
    .bind(title)
    .bind(columns.track_count)
    .execute(&mut *conn)
    .await?;

    state_tracks::insert_all(conn, timestamp, playlist).await?;

    Ok(timestamp)
}

/// Delete a state row and its playlist rows as one atomic unit
///
/// Unknown timestamps are a no-op. Returns whether a row was removed.
pub async fn remove(pool: &SqlitePool, timestamp: Timestamp) -> Result<bool> {
    let mut tx = pool.begin().await.map_err(StorageError::transaction)?;

    match delete_in(&mut *tx, timestamp).await {
        Ok(removed) => {
            tx.commit().await.map_err(StorageError::transaction)?;
            if removed {
                tracing::info!(timestamp, "Removed saved state");
            }
            Ok(removed)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!("Rollback after failed removal also failed: {}", rollback);
            }
            Err(StorageError::transaction(e))
        }
    }
}

async fn delete_in(conn: &mut SqliteConnection, timestamp: Timestamp) -> Result<bool> {
    state_tracks::delete_for_timestamp(conn, timestamp).await?;

    let result = sqlx::query("DELETE FROM state WHERE timestamp = ?")
        .bind(timestamp)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
