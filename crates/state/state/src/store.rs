use std::time::Duration;

use async_trait::async_trait;

use crate::error::StateError;
use crate::key::StateKey;

/// How an [`increment`](CounterStore::increment) call applies its TTL.
///
/// The distinction matters for the gate's two counting behaviors: the general
/// rate window is anchored at the first write and never extended, while the
/// failed-login counter re-arms its window on every write (so the lockout
/// countdown runs from the *last* failure, not the first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Set the TTL only when the entry is created; subsequent increments
    /// leave the existing deadline untouched (fixed window).
    StartWindow(Duration),
    /// Reset the TTL to `now + duration` on every increment, including
    /// creation (extending window).
    Refresh(Duration),
    /// Preserve whatever expiry exists; a newly created entry never expires.
    Keep,
}

/// Trait for persisting keyed policy counters and markers.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// An expired entry is indistinguishable from an absent one: `get` returns
/// `None`, counters restart from zero, and `delete` reports nothing removed.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Get the value for a key. Returns `None` if not found or expired.
    async fn get(&self, key: &StateKey) -> Result<Option<String>, StateError>;

    /// Set a value with an optional TTL, overwriting any previous value.
    async fn set(
        &self,
        key: &StateKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StateError>;

    /// Delete a key. Returns `true` if a live entry existed.
    async fn delete(&self, key: &StateKey) -> Result<bool, StateError>;

    /// Atomically increment a counter by `delta`, creating it at `delta` if
    /// absent. Returns the new value. Creation and add must not race with
    /// concurrent increments for the same key.
    async fn increment(
        &self,
        key: &StateKey,
        delta: i64,
        expiry: Expiry,
    ) -> Result<i64, StateError>;

    /// Read a counter, treating absence as zero.
    ///
    /// A stored value that does not parse as an integer is a
    /// [`StateError::Serialization`], never silently zero.
    async fn get_count(&self, key: &StateKey) -> Result<i64, StateError> {
        match self.get(key).await? {
            None => Ok(0),
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                StateError::Serialization(format!("counter value is not an integer: {e}"))
            }),
        }
    }
}
