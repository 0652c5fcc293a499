//! Asynchronous artwork lookup with an LRU cache
//!
//! [`ArtworkFetcher`] is the tokio-backed [`ArtworkProvider`]: each request
//! is served from the cache or spawned onto the runtime, and the outcome is
//! sent as an [`ArtworkDelivery`] down a channel. The receiving end is
//! drained by [`SharedStatus::spawn_artwork_pump`], so results are applied
//! under the orchestrator lock and never from inside `request`.
//!
//! [`SharedStatus::spawn_artwork_pump`]: crate::SharedStatus::spawn_artwork_pump

use crate::error::Result;
use crate::session::ArtworkProvider;
use crate::types::Artwork;
use async_trait::async_trait;
use encore_core::Track;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Where cover images come from (embedded tags, a folder image, a server)
#[async_trait]
pub trait ArtworkSource: Send + Sync + 'static {
    /// Look up the cover for `track`'s album; `Ok(None)` when there is none
    async fn fetch(&self, track: &Track) -> Result<Option<Artwork>>;
}

/// Outcome of one lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkDelivery {
    pub album_key: String,
    pub artwork: Option<Artwork>,
}

type Cache = Arc<Mutex<LruCache<String, Artwork>>>;

/// [`ArtworkProvider`] that fetches on the tokio runtime
pub struct ArtworkFetcher {
    source: Arc<dyn ArtworkSource>,
    cache: Cache,
    sender: mpsc::UnboundedSender<ArtworkDelivery>,
    runtime: Handle,
}

impl ArtworkFetcher {
    /// Create a fetcher and the receiver its deliveries arrive on
    ///
    /// Must be called from within a tokio runtime. A `cache_size` of 0 is
    /// treated as 1.
    pub fn new(
        source: Arc<dyn ArtworkSource>,
        cache_size: usize,
    ) -> (Self, mpsc::UnboundedReceiver<ArtworkDelivery>) {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        let (sender, receiver) = mpsc::unbounded_channel();

        let fetcher = Self {
            source,
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            sender,
            runtime: Handle::current(),
        };
        (fetcher, receiver)
    }

    /// Forget the cached cover of `album_key` so the next request refetches
    pub fn invalidate(&self, album_key: &str) {
        lock(&self.cache).pop(album_key);
    }

    pub fn cached_len(&self) -> usize {
        lock(&self.cache).len()
    }
}

impl ArtworkProvider for ArtworkFetcher {
    fn request(&self, track: &Track) {
        let album_key = track.album_key.clone();

        if let Some(artwork) = lock(&self.cache).get(&album_key).cloned() {
            tracing::debug!(album_key = %album_key, "Artwork cache hit");
            if self
                .sender
                .send(ArtworkDelivery {
                    album_key,
                    artwork: Some(artwork),
                })
                .is_err()
            {
                tracing::debug!("Artwork receiver dropped");
            }
            return;
        }

        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let sender = self.sender.clone();
        let track = track.clone();

        self.runtime.spawn(async move {
            let artwork = match source.fetch(&track).await {
                Ok(artwork) => artwork,
                Err(e) => {
                    tracing::warn!(album_key = %album_key, "Artwork lookup failed: {}", e);
                    None
                }
            };

            // Misses are not cached; new artwork may show up for the album later
            if let Some(found) = &artwork {
                lock(&cache).put(album_key.clone(), found.clone());
            }

            if sender.send(ArtworkDelivery { album_key, artwork }).is_err() {
                tracing::debug!("Artwork receiver dropped");
            }
        });
    }
}

fn lock(cache: &Cache) -> std::sync::MutexGuard<'_, LruCache<String, Artwork>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}
