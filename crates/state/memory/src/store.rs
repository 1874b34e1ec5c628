use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use tollgate_state::error::StateError;
use tollgate_state::key::StateKey;
use tollgate_state::store::{CounterStore, Expiry};

/// A single entry in the in-memory store.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    /// Returns `true` if this entry has passed its TTL deadline.
    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Compute the expiry instant from an optional TTL duration.
fn expiry_from_ttl(ttl: Option<Duration>) -> Option<Instant> {
    ttl.map(|d| Instant::now() + d)
}

/// In-memory [`CounterStore`] backed by a [`DashMap`].
///
/// Entries are lazily evicted when their TTL has elapsed, so an expired
/// counter reads as absent and restarts from zero on the next increment.
/// Uses [`tokio::time::Instant`], which makes expiry controllable from
/// `start_paused` tests.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    data: DashMap<String, Entry>,
}

impl MemoryCounterStore {
    /// Create a new, empty in-memory counter store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a [`StateKey`] into the string used as the map key.
    fn render_key(key: &StateKey) -> String {
        key.canonical()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn get(&self, key: &StateKey) -> Result<Option<String>, StateError> {
        let rendered = Self::render_key(key);

        // Lazy TTL eviction: check and remove if expired.
        if let Some(entry) = self.data.get(&rendered) {
            if entry.is_expired() {
                drop(entry);
                self.data.remove(&rendered);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }

        Ok(None)
    }

    async fn set(
        &self,
        key: &StateKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StateError> {
        let rendered = Self::render_key(key);
        let expires_at = expiry_from_ttl(ttl);

        self.data
            .entry(rendered)
            .and_modify(|entry| {
                value.clone_into(&mut entry.value);
                entry.expires_at = expires_at;
            })
            .or_insert_with(|| Entry {
                value: value.to_owned(),
                expires_at,
            });

        Ok(())
    }

    async fn delete(&self, key: &StateKey) -> Result<bool, StateError> {
        let rendered = Self::render_key(key);

        // Remove, but treat expired entries as "not found".
        match self.data.remove(&rendered) {
            Some((_, entry)) => Ok(!entry.is_expired()),
            None => Ok(false),
        }
    }

    async fn increment(
        &self,
        key: &StateKey,
        delta: i64,
        expiry: Expiry,
    ) -> Result<i64, StateError> {
        let rendered = Self::render_key(key);

        // Remove any expired entry first so the counter starts fresh.
        self.data
            .remove_if(&rendered, |_, entry| entry.is_expired());

        let created_expiry = match expiry {
            Expiry::StartWindow(d) | Expiry::Refresh(d) => Some(Instant::now() + d),
            Expiry::Keep => None,
        };

        let mut ref_mut = self.data.entry(rendered).or_insert_with(|| Entry {
            value: "0".to_owned(),
            expires_at: created_expiry,
        });

        let current: i64 = ref_mut
            .value
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                StateError::Serialization(format!("counter value is not an integer: {e}"))
            })?;

        let new_value = current + delta;
        ref_mut.value = new_value.to_string();
        if let Expiry::Refresh(d) = expiry {
            ref_mut.expires_at = Some(Instant::now() + d);
        }

        Ok(new_value)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tollgate_state::key::{KeyKind, StateKey};
    use tollgate_state::testing::run_store_conformance_tests;

    use super::*;

    fn test_key(kind: KeyKind, id: &str) -> StateKey {
        StateKey::new("test-ns", "test-tenant", kind, id)
    }

    #[tokio::test]
    async fn conformance() {
        let store = MemoryCounterStore::new();
        run_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }

    #[tokio::test(start_paused = true)]
    async fn ttl_expiry_via_get() {
        let store = MemoryCounterStore::new();
        let key = test_key(KeyKind::Lockout, "ttl-expire");

        store
            .set(&key, "short-lived", Some(Duration::from_secs(5)))
            .await
            .unwrap();

        // Value should be present before TTL elapses.
        let val = store.get(&key).await.unwrap();
        assert_eq!(val.as_deref(), Some("short-lived"));

        // Advance time past TTL.
        tokio::time::advance(Duration::from_secs(6)).await;

        // Lazy eviction: get should return None.
        let val = store.get(&key).await.unwrap();
        assert!(val.is_none(), "value should be expired");
    }

    #[tokio::test(start_paused = true)]
    async fn start_window_anchors_at_first_write() {
        let store = MemoryCounterStore::new();
        let key = test_key(KeyKind::RateWindow, "fixed-window");
        let window = Expiry::StartWindow(Duration::from_secs(60));

        store.increment(&key, 1, window).await.unwrap();

        tokio::time::advance(Duration::from_secs(50)).await;
        // Later increments must not extend the deadline.
        let val = store.increment(&key, 1, window).await.unwrap();
        assert_eq!(val, 2);

        tokio::time::advance(Duration::from_secs(11)).await;
        // 61s after the first write the window has elapsed, even though the
        // second write was only 11s ago.
        let val = store.increment(&key, 1, window).await.unwrap();
        assert_eq!(val, 1, "counter should restart after the anchored window");
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_extends_on_every_write() {
        let store = MemoryCounterStore::new();
        let key = test_key(KeyKind::FailedLogins, "extending-window");
        let refresh = Expiry::Refresh(Duration::from_secs(10));

        store.increment(&key, 1, refresh).await.unwrap();

        tokio::time::advance(Duration::from_secs(8)).await;
        let val = store.increment(&key, 1, refresh).await.unwrap();
        assert_eq!(val, 2);

        // 8s later the original deadline has long passed, but the refreshed
        // one has not.
        tokio::time::advance(Duration::from_secs(8)).await;
        let val = store.increment(&key, 1, refresh).await.unwrap();
        assert_eq!(val, 3, "refreshed window should still be live");

        tokio::time::advance(Duration::from_secs(11)).await;
        let val = store.increment(&key, 1, refresh).await.unwrap();
        assert_eq!(val, 1, "counter should restart once the window lapses");
    }

    #[tokio::test(start_paused = true)]
    async fn increment_resets_after_expiry() {
        let store = MemoryCounterStore::new();
        let key = test_key(KeyKind::SuspiciousStrikes, "ttl-counter");

        store
            .increment(&key, 10, Expiry::StartWindow(Duration::from_secs(2)))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(3)).await;

        // After expiry the counter should restart from zero.
        let val = store.increment(&key, 1, Expiry::Keep).await.unwrap();
        assert_eq!(val, 1, "counter should reset after TTL expiry");
    }

    #[tokio::test]
    async fn delete_returns_false_for_missing() {
        let store = MemoryCounterStore::new();
        let key = test_key(KeyKind::Lockout, "never-set");
        let existed = store.delete(&key).await.unwrap();
        assert!(!existed);
    }
}
