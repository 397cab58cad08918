use std::{
    any::Any,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use dashmap::DashMap;
use warden_core::{CacheError, CacheHandler};

use crate::config::CacheSettings;

type Key = (String, String);

struct CachedValue {
    value: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
}

/// One lock per key. Whoever holds it is the only caller allowed to run the
/// creator for that key.
#[derive(Default)]
struct Slot {
    value: Mutex<Option<CachedValue>>,
}

/// In-process cache with per-key single-flight population and optional TTL.
///
/// Creators must not call back into the same `(domain, identifier)` key.
#[derive(Clone, Default)]
pub struct DashMapCacheHandler {
    slots: Arc<DashMap<Key, Arc<Slot>>>,
    ttl: Option<Duration>,
}

impl DashMapCacheHandler {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// A TTL of zero seconds disables expiry.
    pub fn from_settings(settings: &CacheSettings) -> Self {
        let ttl = (settings.ttl_seconds > 0).then(|| Duration::from_secs(settings.ttl_seconds));
        Self::new(ttl)
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Drops every entry whose TTL has passed. Slots currently in use are
    /// left alone.
    pub fn purge_expired(&self) {
        self.slots.retain(|_, slot| {
            Arc::strong_count(slot) > 1
                || slot.value.try_lock().map_or(true, |value| {
                    value.as_ref().is_some_and(|cached| self.is_fresh(cached))
                })
        });
    }

    fn slot(&self, key: &Key) -> Arc<Slot> {
        Arc::clone(&self.slots.entry(key.clone()).or_default())
    }

    /// Give up this caller's handle on `slot` and remove it from the map if
    /// it holds no value and nobody else is queued on it. Each caller drops
    /// its handle before checking, so the last one out sees a count of one.
    /// New handles need the shard lock `remove_if` holds.
    fn release(&self, key: &Key, slot: Arc<Slot>) {
        let released = Arc::as_ptr(&slot);
        drop(slot);

        self.slots.remove_if(key, |_, current| {
            std::ptr::eq(Arc::as_ptr(current), released)
                && Arc::strong_count(current) == 1
                && current.value.try_lock().is_ok_and(|value| value.is_none())
        });
    }

    fn fill<V, E, F>(&self, slot: &Slot, domain: &str, identifier: &str, creator: F) -> Result<Option<V>, E>
    where
        V: Clone + Send + Sync + 'static,
        E: From<CacheError>,
        F: FnOnce() -> Result<Option<V>, E>,
    {
        // Concurrent callers for this key queue here until the value is in
        let mut guard = slot.value.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = guard.as_ref().filter(|cached| self.is_fresh(cached)) {
            tracing::debug!(domain, identifier, "Cache hit");
            let value = cached
                .value
                .downcast_ref::<V>()
                .cloned()
                .ok_or_else(|| CacheError::TypeMismatch {
                    domain: domain.to_string(),
                })?;
            return Ok(Some(value));
        }

        tracing::debug!(domain, identifier, "Cache miss");
        *guard = None;

        let created = creator()?;
        if let Some(value) = &created {
            *guard = Some(CachedValue {
                value: Arc::new(value.clone()),
                stored_at: Instant::now(),
            });
        }

        Ok(created)
    }

    fn is_fresh(&self, cached: &CachedValue) -> bool {
        match self.ttl {
            Some(ttl) => cached.stored_at.elapsed() < ttl,
            None => true,
        }
    }
}

impl CacheHandler for DashMapCacheHandler {
    fn get_or_create<V, E, F>(&self, domain: &str, identifier: &str, creator: F) -> Result<Option<V>, E>
    where
        V: Clone + Send + Sync + 'static,
        E: From<CacheError>,
        F: FnOnce() -> Result<Option<V>, E>,
    {
        let key = (domain.to_string(), identifier.to_string());
        let slot = self.slot(&key);
        let result = self.fill(&slot, domain, identifier, creator);
        self.release(&key, slot);
        result
    }

    fn delete(&self, domain: &str, identifier: &str) -> Result<(), CacheError> {
        self.slots
            .remove(&(domain.to_string(), identifier.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, faker::internet::en::Username};
    use std::sync::{
        Barrier,
        atomic::{AtomicUsize, Ordering},
    };
    use std::thread;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Cache,
        Store,
    }

    impl From<CacheError> for TestError {
        fn from(_: CacheError) -> Self {
            TestError::Cache
        }
    }

    fn counted(calls: &AtomicUsize, value: Option<String>) -> Result<Option<String>, TestError> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[test]
    fn second_lookup_is_served_from_cache() {
        let cache = DashMapCacheHandler::new(None);
        let calls = AtomicUsize::new(0);
        let identifier: String = Username().fake();

        for _ in 0..3 {
            let value = cache
                .get_or_create("credentials", &identifier, || {
                    counted(&calls, Some("account".to_string()))
                })
                .unwrap();
            assert_eq!(value.as_deref(), Some("account"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn domains_are_separate() {
        let cache = DashMapCacheHandler::new(None);
        cache
            .get_or_create("credentials", "alice", || Ok::<_, TestError>(Some(1u32)))
            .unwrap();

        let value = cache
            .get_or_create("authz_info", "alice", || Ok::<_, TestError>(Some(2u32)))
            .unwrap();

        assert_eq!(value, Some(2));
    }

    #[test]
    fn missing_values_are_not_cached() {
        let cache = DashMapCacheHandler::new(None);
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = cache
                .get_or_create("credentials", "ghost", || counted(&calls, None))
                .unwrap();
            assert_eq!(value, None);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn creator_errors_are_returned_and_not_cached() {
        let cache = DashMapCacheHandler::new(None);

        let result = cache.get_or_create::<String, _, _>("credentials", "alice", || {
            Err(TestError::Store)
        });
        assert_eq!(result, Err(TestError::Store));

        let value = cache
            .get_or_create("credentials", "alice", || Ok::<_, TestError>(Some("ok".to_string())))
            .unwrap();
        assert_eq!(value.as_deref(), Some("ok"));
    }

    #[test]
    fn type_mismatch_is_reported() {
        let cache = DashMapCacheHandler::new(None);
        cache
            .get_or_create("credentials", "alice", || Ok::<_, TestError>(Some(7u64)))
            .unwrap();

        let result = cache.get_or_create::<String, _, _>("credentials", "alice", || {
            Ok(Some("never".to_string()))
        });

        assert_eq!(result, Err(TestError::Cache));
    }

    #[test]
    fn delete_forces_reload() {
        let cache = DashMapCacheHandler::new(None);
        let calls = AtomicUsize::new(0);
        let load = || counted(&calls, Some("account".to_string()));

        cache.get_or_create("credentials", "alice", load).unwrap();
        cache.delete("credentials", "alice").unwrap();
        cache.get_or_create("credentials", "alice", load).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn expired_entries_are_recomputed() {
        let cache = DashMapCacheHandler::new(Some(Duration::from_millis(10)));
        let calls = AtomicUsize::new(0);
        let load = || counted(&calls, Some("account".to_string()));

        cache.get_or_create("credentials", "alice", load).unwrap();
        thread::sleep(Duration::from_millis(30));
        cache.get_or_create("credentials", "alice", load).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_misses_run_creator_once() {
        const THREADS: usize = 16;
        let cache = DashMapCacheHandler::new(None);
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    barrier.wait();
                    let value = cache
                        .get_or_create("credentials", "alice", || {
                            thread::sleep(Duration::from_millis(50));
                            counted(&calls, Some("account".to_string()))
                        })
                        .unwrap();
                    assert_eq!(value.as_deref(), Some("account"));
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_identifiers_leave_no_entries_behind() {
        let cache = DashMapCacheHandler::new(Some(Duration::from_millis(1)));

        for i in 0..1_000 {
            let identifier = format!("ghost-{i}");
            let value = cache
                .get_or_create("credentials", &identifier, || Ok::<Option<String>, TestError>(None))
                .unwrap();
            assert_eq!(value, None);
        }
        let _ = cache.get_or_create::<String, _, _>("credentials", "broken", || {
            Err(TestError::Store)
        });

        assert_eq!(cache.slots.len(), 0);
    }

    #[test]
    fn cached_values_keep_their_entry() {
        let cache = DashMapCacheHandler::new(None);
        cache
            .get_or_create("credentials", "alice", || Ok::<_, TestError>(Some(1u32)))
            .unwrap();

        assert_eq!(cache.slots.len(), 1);
    }

    #[test]
    fn expired_entries_are_purged() {
        let cache = DashMapCacheHandler::new(Some(Duration::from_millis(10)));
        cache
            .get_or_create("credentials", "alice", || Ok::<_, TestError>(Some(1u32)))
            .unwrap();
        thread::sleep(Duration::from_millis(30));
        cache
            .get_or_create("credentials", "bob", || Ok::<_, TestError>(Some(2u32)))
            .unwrap();

        cache.purge_expired();

        assert_eq!(cache.slots.len(), 1);
        assert!(cache.slots.contains_key(&("credentials".to_string(), "bob".to_string())));
    }

    #[test]
    fn concurrent_misses_for_unknown_identifier_leave_no_entry() {
        const THREADS: usize = 8;
        let cache = DashMapCacheHandler::new(None);
        let barrier = Barrier::new(THREADS);

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    barrier.wait();
                    let value = cache
                        .get_or_create("credentials", "ghost", || {
                            thread::sleep(Duration::from_millis(5));
                            Ok::<Option<String>, TestError>(None)
                        })
                        .unwrap();
                    assert_eq!(value, None);
                });
            }
        });

        assert_eq!(cache.slots.len(), 0);
    }

    #[test]
    fn ttl_comes_from_settings() {
        let cache = DashMapCacheHandler::from_settings(&CacheSettings { ttl_seconds: 0 });
        assert_eq!(cache.ttl(), None);

        let cache = DashMapCacheHandler::from_settings(&CacheSettings { ttl_seconds: 60 });
        assert_eq!(cache.ttl(), Some(Duration::from_secs(60)));
    }
}
