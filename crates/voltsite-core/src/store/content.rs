//! Read-through content store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use voltsite_api::{ApiError, Backend, Lookup, Mutation, Payload, ResourceKind};

use super::key::{CacheKey, StoreUpdate};
use crate::resource::Content;

/// Default freshness window for cached reads.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Capacity of the store-update broadcast channel.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

type Outcome = Result<Arc<Value>, ApiError>;

struct CacheEntry {
    value: Arc<Value>,
    fetched_at: Instant,
}

enum ReadPlan {
    Fresh(Arc<Value>),
    Stale(Arc<Value>),
    Miss,
}

enum FetchRole {
    Lead(broadcast::Sender<Outcome>),
    Join(broadcast::Receiver<Outcome>),
}

struct Inner<B> {
    backend: B,
    ttl: Duration,
    cache: Mutex<HashMap<CacheKey, CacheEntry>>,
    inflight: Mutex<HashMap<CacheKey, broadcast::Sender<Outcome>>>,
    updates: broadcast::Sender<StoreUpdate>,
}

/// Read-through cache over a [`Backend`].
///
/// Every page-level consumer reads through this store. Reads are cached
/// per key within a freshness window, concurrent reads of one key share a
/// single request, stale reads are answered immediately while a background
/// revalidation runs, and successful mutations evict every entry of the
/// mutated kind.
///
/// The handle is cheap to clone; all clones share one cache.
pub struct ContentStore<B: Backend> {
    inner: Arc<Inner<B>>,
}

impl<B: Backend> Clone for ContentStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Backend> ContentStore<B> {
    /// Create a store over the given backend with the default freshness
    /// window.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_ttl(backend, DEFAULT_TTL)
    }

    /// Create a store with an explicit freshness window.
    #[must_use]
    pub fn with_ttl(backend: B, ttl: Duration) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                backend,
                ttl,
                cache: Mutex::new(HashMap::new()),
                inflight: Mutex::new(HashMap::new()),
                updates,
            }),
        }
    }

    /// The configured freshness window.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Access the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Subscribe to store updates (background refreshes and invalidations).
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreUpdate> {
        self.inner.updates.subscribe()
    }

    /// Fetch a collection, cached per (kind, query parameters).
    ///
    /// # Errors
    ///
    /// Returns the transport error once retries are exhausted, or
    /// [`ApiError::Unknown`] if the cached payload does not match `T`.
    pub async fn list<T: Content>(&self, query: &BTreeMap<String, String>) -> Result<Vec<T>, ApiError> {
        let key = CacheKey::List {
            kind: T::KIND,
            query: query.clone(),
        };
        let value = self.read(key).await?;
        decode(&value)
    }

    /// Fetch a single resource by slug or id, cached under its own key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the resource does not exist.
    pub async fn detail<T: Content>(&self, lookup: Lookup) -> Result<T, ApiError> {
        let key = CacheKey::Detail {
            kind: T::KIND,
            lookup,
        };
        let value = self.read(key).await?;
        decode(&value)
    }

    /// Fetch a singleton resource. `T` must belong to a singleton kind.
    ///
    /// # Errors
    ///
    /// Returns the mapped transport error on failure.
    pub async fn singleton<T: Content>(&self) -> Result<T, ApiError> {
        debug_assert!(T::KIND.is_singleton(), "{} is not a singleton", T::KIND);
        let key = CacheKey::Singleton { kind: T::KIND };
        let value = self.read(key).await?;
        decode(&value)
    }

    /// Fetch the featured sub-collection. `T` must belong to a kind that
    /// exposes one.
    ///
    /// # Errors
    ///
    /// Returns the mapped transport error on failure.
    pub async fn featured<T: Content>(&self) -> Result<Vec<T>, ApiError> {
        debug_assert!(T::KIND.has_featured(), "{} has no featured listing", T::KIND);
        let key = CacheKey::Featured { kind: T::KIND };
        let value = self.read(key).await?;
        decode(&value)
    }

    /// Issue a mutation: exactly one backend request, never retried.
    ///
    /// On success every cache entry for `kind` is evicted so the next read
    /// refetches, and an [`StoreUpdate::Invalidated`] event is published.
    /// Contact inquiries do not touch cached content and skip eviction.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] with field messages on 4xx
    /// rejections, [`ApiError::Network`] on transport failure.
    pub async fn mutate(
        &self,
        kind: ResourceKind,
        mutation: Mutation,
        payload: Payload,
    ) -> Result<Option<Value>, ApiError> {
        let result = self.inner.backend.submit(kind, &mutation, &payload).await?;
        if matches!(mutation, Mutation::Inquire) {
            debug!("inquiry submitted, no cache effect");
        } else {
            self.invalidate(kind);
        }
        Ok(result)
    }

    /// Evict every cache entry for a kind and publish an invalidation
    /// event.
    pub fn invalidate(&self, kind: ResourceKind) {
        let evicted = {
            let mut cache = lock(&self.inner.cache);
            let before = cache.len();
            cache.retain(|key, _| key.kind() != kind);
            before - cache.len()
        };
        debug!("invalidated {evicted} cache entries for {kind}");
        let _ = self.inner.updates.send(StoreUpdate::Invalidated(kind));
    }

    /// Serve a read from cache, joining or starting a fetch as needed.
    async fn read(&self, key: CacheKey) -> Outcome {
        let plan = {
            let cache = lock(&self.inner.cache);
            match cache.get(&key) {
                Some(entry) if entry.fetched_at.elapsed() < self.inner.ttl => {
                    ReadPlan::Fresh(Arc::clone(&entry.value))
                }
                Some(entry) => ReadPlan::Stale(Arc::clone(&entry.value)),
                None => ReadPlan::Miss,
            }
        };

        match plan {
            ReadPlan::Fresh(value) => Ok(value),
            ReadPlan::Stale(value) => {
                self.spawn_revalidation(key);
                Ok(value)
            }
            ReadPlan::Miss => self.fetch_shared(key).await,
        }
    }

    /// Revalidate a stale key in the background. The shared-fetch path
    /// already collapses concurrent revalidations of the same key.
    fn spawn_revalidation(&self, key: CacheKey) {
        let store = self.clone();
        tokio::spawn(async move {
            if let Err(e) = store.fetch_shared(key.clone()).await {
                warn!("background revalidation of {key:?} failed: {e}");
            }
        });
    }

    /// Perform one fetch per key, sharing the outcome with every caller
    /// that arrives while it is in flight.
    ///
    /// The in-flight marker is checked and set under the lock, before any
    /// suspension point; that is what upholds the one-request-per-key
    /// invariant.
    async fn fetch_shared(&self, key: CacheKey) -> Outcome {
        let role = {
            let mut inflight = lock(&self.inner.inflight);
            match inflight.get(&key) {
                Some(tx) => FetchRole::Join(tx.subscribe()),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    inflight.insert(key.clone(), tx.clone());
                    FetchRole::Lead(tx)
                }
            }
        };

        match role {
            FetchRole::Join(mut rx) => rx
                .recv()
                .await
                .unwrap_or_else(|_| Err(ApiError::Unknown("in-flight request dropped".into()))),
            FetchRole::Lead(tx) => {
                let outcome = self.fetch_direct(&key).await.map(Arc::new);

                if let Ok(value) = &outcome {
                    let changed = {
                        let mut cache = lock(&self.inner.cache);
                        let changed = cache
                            .get(&key)
                            .is_some_and(|previous| *previous.value != **value);
                        cache.insert(
                            key.clone(),
                            CacheEntry {
                                value: Arc::clone(value),
                                fetched_at: Instant::now(),
                            },
                        );
                        changed
                    };
                    if changed {
                        let _ = self.inner.updates.send(StoreUpdate::Refreshed(key.clone()));
                    }
                }

                lock(&self.inner.inflight).remove(&key);
                let _ = tx.send(outcome.clone());
                outcome
            }
        }
    }

    /// Issue the actual backend read for a key.
    async fn fetch_direct(&self, key: &CacheKey) -> Result<Value, ApiError> {
        match key {
            CacheKey::List { kind, query } => self
                .inner
                .backend
                .list(*kind, query)
                .await
                .map(Value::Array),
            CacheKey::Detail { kind, lookup } => {
                self.inner.backend.detail(*kind, lookup).await
            }
            CacheKey::Singleton { kind } => self.inner.backend.singleton(*kind).await,
            CacheKey::Featured { kind } => self
                .inner
                .backend
                .featured(*kind)
                .await
                .map(Value::Array),
        }
    }
}

/// Lock a mutex, recovering the guard if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T, ApiError> {
    serde_json::from_value(value.clone())
        .map_err(|e| ApiError::Unknown(format!("malformed cached payload: {e}")))
}
