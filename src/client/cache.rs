// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query cache with in-flight de-duplication and manual invalidation.
//!
//! A value stays cached until `invalidate` or `invalidate_all` is called;
//! there is no time-based eviction. Concurrent requests for a key that is
//! not cached share a single fetch. Failed fetches are not cached.

use super::ClientError;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, ClientError>>>;

/// A cached value and when it was fetched.
#[derive(Debug, Clone)]
pub struct Cached<V> {
    pub value: V,
    pub fetched_at: DateTime<Utc>,
}

/// A running fetch. `id` tells it apart from later fetches for the same key.
struct InFlight<V> {
    id: u64,
    fetch: SharedFetch<V>,
}

pub struct QueryCache<K, V> {
    entries: DashMap<K, Cached<V>>,
    in_flight: DashMap<K, InFlight<V>>,
    next_fetch_id: AtomicU64,
}

impl<K, V> Default for QueryCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            in_flight: DashMap::new(),
            next_fetch_id: AtomicU64::new(0),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached entry for `key`, if any.
    pub fn peek(&self, key: &K) -> Option<Cached<V>> {
        self.entries.get(key).map(|e| e.clone())
    }

    /// Return the cached value or run `fetch`, sharing it with concurrent callers.
    ///
    /// A fetch that was invalidated while running still answers its callers
    /// but is not cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<V, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ClientError>> + Send + 'static,
    {
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.value.clone());
        }

        // Shard lock is released at the end of this block, before awaiting.
        let (id, pending) = match self.in_flight.entry(key.clone()) {
            Entry::Occupied(entry) => (entry.get().id, entry.get().fetch.clone()),
            Entry::Vacant(entry) => {
                let id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
                let shared = fetch().boxed().shared();
                entry.insert(InFlight {
                    id,
                    fetch: shared.clone(),
                });
                (id, shared)
            }
        };

        let result = pending.await;

        // Only the caller that still finds its own fetch registered publishes,
        // and it does so before clearing the marker so no reader sees neither.
        if let Entry::Occupied(entry) = self.in_flight.entry(key.clone()) {
            if entry.get().id == id {
                if let Ok(value) = &result {
                    self.entries.insert(
                        key,
                        Cached {
                            value: value.clone(),
                            fetched_at: Utc::now(),
                        },
                    );
                }
                entry.remove();
            }
        }

        result
    }

    /// Drop the cached value for `key`, and forget any fetch still running for
    /// it; the next read fetches again.
    pub fn invalidate(&self, key: &K) {
        self.in_flight.remove(key);
        self.entries.remove(key);
    }

    pub fn invalidate_all(&self) {
        self.in_flight.clear();
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
