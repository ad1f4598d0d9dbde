use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::Notify;

struct Snapshot<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

/// Immutable-snapshot store for fetched data.
///
/// Every `store` replaces the previous snapshot with a fresh `Arc`; readers
/// clone the `Arc` and never observe in-place mutation. `invalidate` clears
/// the snapshot and wakes any watcher parked on [`SnapshotCache::invalidated`],
/// which is how a successful mutation forces the next read to hit the
/// network instead of waiting out the freshness window.
pub struct SnapshotCache<T> {
    inner: Mutex<Option<Snapshot<T>>>,
    changed: Notify,
}

impl<T> SnapshotCache<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
            changed: Notify::new(),
        }
    }

    /// The stored snapshot if it is younger than `freshness`.
    pub fn fresh(&self, freshness: Duration) -> Option<Arc<T>> {
        let guard = self.inner.lock().expect("cache lock");
        guard
            .as_ref()
            .filter(|snapshot| snapshot.fetched_at.elapsed() <= freshness)
            .map(|snapshot| Arc::clone(&snapshot.value))
    }

    /// The stored snapshot regardless of age.
    pub fn latest(&self) -> Option<Arc<T>> {
        let guard = self.inner.lock().expect("cache lock");
        guard.as_ref().map(|snapshot| Arc::clone(&snapshot.value))
    }

    /// Replaces the snapshot with a freshly fetched value.
    pub fn store(&self, value: T) {
        let mut guard = self.inner.lock().expect("cache lock");
        *guard = Some(Snapshot {
            value: Arc::new(value),
            fetched_at: Instant::now(),
        });
    }

    /// Drops the snapshot and wakes subscribed watchers.
    pub fn invalidate(&self) {
        {
            let mut guard = self.inner.lock().expect("cache lock");
            *guard = None;
        }
        self.changed.notify_waiters();
    }

    /// Resolves on the next invalidation.
    pub async fn invalidated(&self) {
        self.changed.notified().await;
    }
}

impl<T> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_replaces_rather_than_mutates() {
        let cache = SnapshotCache::new();
        cache.store(vec![1]);
        let first = cache.latest().unwrap();

        cache.store(vec![1, 2]);
        let second = cache.latest().unwrap();

        // The earlier snapshot is untouched by the update.
        assert_eq!(*first, vec![1]);
        assert_eq!(*second, vec![1, 2]);
    }

    #[test]
    fn freshness_window_expires() {
        let cache = SnapshotCache::new();
        cache.store(42u32);

        assert!(cache.fresh(Duration::from_secs(60)).is_some());
        assert!(cache.fresh(Duration::ZERO).is_none());
        assert!(cache.latest().is_some());
    }

    #[test]
    fn invalidate_clears_the_snapshot() {
        let cache = SnapshotCache::new();
        cache.store(42u32);
        cache.invalidate();

        assert!(cache.latest().is_none());
        assert!(cache.fresh(Duration::from_secs(60)).is_none());
    }

    #[tokio::test]
    async fn invalidate_wakes_a_parked_watcher() {
        let cache = Arc::new(SnapshotCache::<u32>::new());
        let waiter = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.invalidated().await })
        };

        // Let the waiter park before notifying.
        tokio::task::yield_now().await;
        cache.invalidate();

        waiter.await.expect("waiter completes");
    }
}
