//! Revalidation cache
//!
//! Holds the last known value of a remote resource keyed by its request
//! path, and commits the result of mutations against it. Every mutation
//! names its [`Revalidate`] policy explicitly.
//!
//! # Ordering
//!
//! There is no queue between overlapping mutations of the same key. Each
//! producer works from the snapshot its caller read, and the commit of the
//! producer that resolves last wins. Callers that need strict ordering must
//! await one mutation before starting the next.
//!
//! A background refetch is tagged with the generation it revalidates and
//! is dropped if the slot moved on before it resolved.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Loads the authoritative value of a key
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    type Value: Clone + Send + Sync + 'static;
    type Error: Display + Send + 'static;

    async fn fetch(&self, key: &str) -> Result<Self::Value, Self::Error>;
}

/// What happens after a mutation commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revalidate {
    /// The committed value is authoritative; no refetch
    TrustLocal,
    /// Refetch in the background and overwrite the committed value
    Refetch,
}

/// Result of reading a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry<V> {
    Ready(V),
    /// Never fetched (or discarded)
    Pending,
}

impl<V> CacheEntry<V> {
    pub fn is_pending(&self) -> bool {
        matches!(self, CacheEntry::Pending)
    }

    pub fn ready(self) -> Option<V> {
        match self {
            CacheEntry::Ready(value) => Some(value),
            CacheEntry::Pending => None,
        }
    }
}

struct Slot<V> {
    value: V,
    generation: u64,
}

type Slots<V> = Arc<RwLock<HashMap<String, Slot<V>>>>;

/// Keyed cache with fetch and mutate operations
pub struct RevalidationCache<F: Fetcher> {
    fetcher: Arc<F>,
    slots: Slots<F::Value>,
}

impl<F: Fetcher> Clone for RevalidationCache<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<F: Fetcher> RevalidationCache<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Last known value of `key`
    pub fn read(&self, key: &str) -> CacheEntry<F::Value> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        match slots.get(key) {
            Some(slot) => CacheEntry::Ready(slot.value.clone()),
            None => CacheEntry::Pending,
        }
    }

    /// Number of commits to `key` since it was first stored (0 if absent)
    pub fn generation(&self, key: &str) -> u64 {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).map_or(0, |slot| slot.generation)
    }

    /// Fetch `key` and store the result.
    ///
    /// On failure the slot keeps its previous value.
    pub async fn load(&self, key: &str) -> Result<F::Value, F::Error> {
        let value = self.fetcher.fetch(key).await?;
        commit(&self.slots, key, value.clone());
        Ok(value)
    }

    /// Run `producer` and commit what it returns.
    ///
    /// `Ok(Some(v))` replaces the slot, `Ok(None)` discards it, and `Err`
    /// leaves it untouched and is returned to the caller.
    pub async fn mutate<Fut, E>(
        &self,
        key: &str,
        producer: Fut,
        revalidate: Revalidate,
    ) -> Result<Option<F::Value>, E>
    where
        Fut: Future<Output = Result<Option<F::Value>, E>>,
    {
        let next = producer.await?;
        match &next {
            Some(value) => {
                let generation = commit(&self.slots, key, value.clone());
                if revalidate == Revalidate::Refetch {
                    self.spawn_refetch(key, generation);
                }
            }
            None => self.evict(key),
        }
        Ok(next)
    }

    /// Discard the value of `key`
    pub fn evict(&self, key: &str) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        if slots.remove(key).is_some() {
            debug!("Evicted cache slot {}", key);
        }
    }

    /// Refetch `key` and commit only if no other commit or eviction
    /// happened while the fetch was in flight.
    fn spawn_refetch(&self, key: &str, expected: u64) {
        let fetcher = Arc::clone(&self.fetcher);
        let slots = Arc::clone(&self.slots);
        let key = key.to_string();
        tokio::spawn(async move {
            match fetcher.fetch(&key).await {
                Ok(value) => {
                    let mut guard = slots.write().unwrap_or_else(PoisonError::into_inner);
                    match guard.get_mut(&key) {
                        Some(slot) if slot.generation == expected => {
                            slot.value = value;
                            slot.generation += 1;
                            debug!(
                                "Refetched cache slot {} (generation {})",
                                key, slot.generation
                            );
                        }
                        _ => debug!("Dropped stale refetch of {}", key),
                    }
                }
                Err(e) => warn!("Background refetch of {} failed: {}", key, e),
            }
        });
    }
}

fn commit<V>(slots: &Slots<V>, key: &str, value: V) -> u64 {
    let mut slots = slots.write().unwrap_or_else(PoisonError::into_inner);
    let generation = slots.get(key).map_or(0, |slot| slot.generation) + 1;
    slots.insert(key.to_string(), Slot { value, generation });
    debug!("Committed cache slot {} (generation {})", key, generation);
    generation
}
