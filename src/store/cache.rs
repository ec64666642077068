//! In-memory TTL cache for the record listing.
//!
//! The listing is read on every page load but only changes through the
//! store's own writes, which invalidate it. Rows changed behind the
//! console's back show up once the entry expires.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default TTL for the cached listing.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// A cached value with expiration time.
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn get(&self) -> Option<T> {
        if self.is_expired() {
            None
        } else {
            Some(self.value.clone())
        }
    }
}

/// Single-slot cache with a fixed time to live.
///
/// Every invalidation bumps a generation counter. A load that started under
/// an older generation is returned to its caller but never stored.
pub struct TtlCache<T> {
    entry: RwLock<Option<CacheEntry<T>>>,
    generation: AtomicU64,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            generation: AtomicU64::new(0),
            ttl,
        }
    }

    /// Current generation; changes on every invalidation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Get the cached value, or None if expired/missing.
    pub fn get(&self) -> Option<T> {
        self.entry
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().and_then(|e| e.get()))
    }

    /// Store `value` only if no invalidation happened since `generation`
    /// was read. Returns whether the value was stored.
    pub fn set_if_current(&self, generation: u64, value: T) -> bool {
        let Ok(mut guard) = self.entry.write() else {
            return false;
        };
        // Checked under the write lock; invalidate() bumps under the same lock.
        if self.generation.load(Ordering::Acquire) != generation {
            return false;
        }
        *guard = Some(CacheEntry::new(value, self.ttl));
        true
    }

    /// Drop the cached value so the next read goes to the loader.
    pub fn invalidate(&self) {
        let guard = self.entry.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Ok(mut guard) = guard {
            *guard = None;
        }
    }

    /// Return the cached value, or run `load` and cache its result.
    ///
    /// Failed loads are not cached.
    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get() {
            tracing::debug!("listing cache hit");
            return Ok(value);
        }

        tracing::debug!("listing cache miss");
        let generation = self.generation();
        let value = load().await?;
        if !self.set_if_current(generation, value.clone()) {
            tracing::debug!("listing invalidated during load, not caching");
        }
        Ok(value)
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let cache = TtlCache::new();
        assert_eq!(cache.get(), None::<Vec<i32>>);

        assert!(cache.set_if_current(cache.generation(), vec![1, 2]));
        assert_eq!(cache.get(), Some(vec![1, 2]));
    }

    #[test]
    fn test_invalidate_clears_entry() {
        let cache = TtlCache::new();
        cache.set_if_current(cache.generation(), 5u32);
        cache.invalidate();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_zero_ttl_never_serves() {
        let cache = TtlCache::with_ttl(Duration::ZERO);
        cache.set_if_current(cache.generation(), "stale".to_string());
        assert_eq!(cache.get(), None);
    }

    #[tokio::test]
    async fn test_get_or_load_caches_success() {
        let cache = TtlCache::new();
        let first: Result<u32, ()> = cache.get_or_load(|| async { Ok(1) }).await;
        let second: Result<u32, ()> = cache.get_or_load(|| async { Ok(2) }).await;

        assert_eq!(first, Ok(1));
        assert_eq!(second, Ok(1));
    }

    #[tokio::test]
    async fn test_invalidate_during_load_discards_snapshot() {
        use std::sync::Arc;
        use tokio::sync::oneshot;

        let cache: Arc<TtlCache<Vec<i32>>> = Arc::new(TtlCache::new());
        let (loaded_tx, loaded_rx) = oneshot::channel();
        let (resume_tx, resume_rx) = oneshot::channel::<()>();

        let loader = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .get_or_load(|| async move {
                        let snapshot = vec![1];
                        let _ = loaded_tx.send(());
                        let _ = resume_rx.await;
                        Ok::<_, ()>(snapshot)
                    })
                    .await
            })
        };

        loaded_rx.await.unwrap();
        cache.invalidate();
        resume_tx.send(()).unwrap();

        let returned = loader.await.unwrap();
        assert_eq!(returned, Ok(vec![1]));
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_set_if_current_rejects_old_generation() {
        let cache = TtlCache::new();
        let before = cache.generation();
        cache.invalidate();

        assert!(!cache.set_if_current(before, 1u8));
        assert_eq!(cache.get(), None);
        assert!(cache.set_if_current(cache.generation(), 2u8));
        assert_eq!(cache.get(), Some(2));
    }

    #[tokio::test]
    async fn test_get_or_load_does_not_cache_errors() {
        let cache: TtlCache<u32> = TtlCache::new();
        let failed = cache.get_or_load(|| async { Err("boom") }).await;
        assert_eq!(failed, Err("boom"));

        let loaded = cache.get_or_load(|| async { Ok::<_, &str>(9) }).await;
        assert_eq!(loaded, Ok(9));
    }
}
