use crate::error::Result;
use crate::{state_tracks, states};
use async_trait::async_trait;
use encore_core::{
    BookmarkRecord, PlaylistSnapshot, StateRepository, Timestamp, TransportState,
};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

/// `SQLite`-backed state store
///
/// Construct one per database and hand it to whoever needs it; there is no
/// process-wide instance. Saves and removals take the write lock so only
/// one atomic unit is in flight per store.
pub struct StateStore {
    pool: SqlitePool,
    write_lock: Mutex<()>,
}

impl StateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Mutex::new(()),
        }
    }

    /// Connect, migrate and wrap the database at `database_url`
    pub async fn open(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = crate::create_pool(database_url, max_connections).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn save_state(
        &self,
        playlist: &PlaylistSnapshot,
        state: &TransportState,
        title: &str,
        autosave: bool,
    ) -> Result<Timestamp> {
        let _guard = self.write_lock.lock().await;
        states::save(&self.pool, playlist, state, title, autosave).await
    }

    pub async fn remove_state(&self, timestamp: Timestamp) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        states::remove(&self.pool, timestamp).await
    }
}

#[async_trait]
impl StateRepository for StateStore {
    async fn save(
        &self,
        playlist: &PlaylistSnapshot,
        state: &TransportState,
        title: &str,
        autosave: bool,
    ) -> encore_core::Result<Timestamp> {
        self.save_state(playlist, state, title, autosave)
            .await
            .map_err(Into::into)
    }

    async fn read_playlist(&self, timestamp: Timestamp) -> encore_core::Result<PlaylistSnapshot> {
        state_tracks::get_for_timestamp(&self.pool, timestamp)
            .await
            .map_err(Into::into)
    }

    async fn read_latest_playlist(&self) -> encore_core::Result<PlaylistSnapshot> {
        state_tracks::get_latest(&self.pool).await.map_err(Into::into)
    }

    async fn get_state(&self, timestamp: Timestamp) -> encore_core::Result<TransportState> {
        states::get(&self.pool, timestamp).await.map_err(Into::into)
    }

    async fn get_latest_state(&self) -> encore_core::Result<TransportState> {
        states::get_latest(&self.pool).await.map_err(Into::into)
    }

    async fn list_bookmarks(&self) -> encore_core::Result<Vec<BookmarkRecord>> {
        states::list_bookmarks(&self.pool).await.map_err(Into::into)
    }

    async fn get_bookmark(
        &self,
        timestamp: Timestamp,
    ) -> encore_core::Result<Option<BookmarkRecord>> {
        states::get_bookmark(&self.pool, timestamp)
            .await
            .map_err(Into::into)
    }

    async fn latest_timestamp(&self) -> encore_core::Result<Option<Timestamp>> {
        states::latest_timestamp(&self.pool).await.map_err(Into::into)
    }

    async fn remove(&self, timestamp: Timestamp) -> encore_core::Result<()> {
        self.remove_state(timestamp).await?;
        Ok(())
    }
}
