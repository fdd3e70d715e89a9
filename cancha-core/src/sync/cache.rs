//! In-memory list cache with in-flight fetch de-duplication.
//!
//! One cache per entity list, owned by its repository, so cache lifetime is
//! the application session - there is no module-level state. Mutations
//! patch the cache only after the backend confirmed them; nothing here is
//! speculative or rolled back.

use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::error::ApiError;

type FetchFuture<T> = Shared<BoxFuture<'static, Result<Vec<T>, ApiError>>>;

#[derive(Debug)]
struct CacheInner<T> {
    entries: Option<Vec<T>>,
    in_flight: Option<FetchFuture<T>>,
}

/// List cache: `Empty -> Loading -> Ready` on first fetch, `Ready -> Ready`
/// on single-record patches, back to `Empty` on invalidation.
#[derive(Debug)]
pub struct ListCache<T> {
    inner: Arc<Mutex<CacheInner<T>>>,
}

impl<T> Default for ListCache<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: None,
                in_flight: None,
            })),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ListCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached list, or runs `fetch` to populate it. While a
    /// fetch is in flight, every later caller awaits that same future
    /// instead of issuing a duplicate request. A failed fetch leaves the
    /// cache cold; all waiters share the failure.
    pub async fn get_or_fetch<F>(&self, fetch: F) -> Result<Vec<T>, ApiError>
    where
        F: Future<Output = Result<Vec<T>, ApiError>> + Send + 'static,
    {
        let shared = {
            let mut inner = self.inner.lock().expect("cache lock poisoned");
            if let Some(entries) = &inner.entries {
                return Ok(entries.clone());
            }
            if let Some(in_flight) = &inner.in_flight {
                in_flight.clone()
            } else {
                let slot = Arc::clone(&self.inner);
                let future: FetchFuture<T> = async move {
                    let result = fetch.await;
                    let mut inner = slot.lock().expect("cache lock poisoned");
                    inner.in_flight = None;
                    if let Ok(entries) = &result {
                        inner.entries = Some(entries.clone());
                    }
                    result
                }
                .boxed()
                .shared();
                inner.in_flight = Some(future.clone());
                future
            }
        };
        shared.await
    }

    /// Current contents when the cache is warm.
    pub fn snapshot(&self) -> Option<Vec<T>> {
        self.inner.lock().expect("cache lock poisoned").entries.clone()
    }

    pub fn is_warm(&self) -> bool {
        self.inner
            .lock()
            .expect("cache lock poisoned")
            .entries
            .is_some()
    }

    /// Replaces the whole cached list.
    pub fn set(&self, items: Vec<T>) {
        self.inner.lock().expect("cache lock poisoned").entries = Some(items);
    }

    /// Appends one entry, only when the cache is warm. A cold cache stays
    /// cold - the next fetch will pick the record up from the backend.
    pub fn insert(&self, item: T) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        if let Some(entries) = inner.entries.as_mut() {
            entries.push(item);
        }
    }

    /// Replaces every entry matching `matches` with `item` (id equality in
    /// practice, so a single entry).
    pub fn replace_where(&self, matches: impl Fn(&T) -> bool, item: T) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        if let Some(entries) = inner.entries.as_mut() {
            for entry in entries.iter_mut() {
                if matches(entry) {
                    *entry = item.clone();
                }
            }
        }
    }

    /// Removes every entry matching `matches`.
    pub fn remove_where(&self, matches: impl Fn(&T) -> bool) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        if let Some(entries) = inner.entries.as_mut() {
            entries.retain(|entry| !matches(entry));
        }
    }

    /// Drops the cached list; the next `get_or_fetch` hits the backend.
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.entries = None;
        inner.in_flight = None;
    }
}
