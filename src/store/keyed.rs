//! Parameter-keyed store with request de-duplication
//!
//! A [`Store`] maps a typed parameter record to the state of the last fetch
//! made with it. Fetches of a key already in flight join the running
//! operation instead of issuing another request. The operation runs on its
//! own task, so the entry is settled even when every caller has gone away.

use chrono::{DateTime, Duration, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::clock::{Clock, SystemClock};
use crate::error::{Error, Result};

/// Lifecycle of one entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// State of one cached fetch
#[derive(Debug)]
struct Entry<T> {
    status: LoadingState,
    /// Data of the last successful fetch; kept while a refetch is loading
    data: Option<Arc<T>>,
    error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            status: LoadingState::Idle,
            data: None,
            error: None,
            fetched_at: None,
        }
    }
}

/// Freshness and timing shared by every store
#[derive(Clone)]
pub struct StoreConfig {
    pub clock: Arc<dyn Clock>,
    /// Age after which a successful entry is refetched; `None` keeps it for
    /// the life of the process
    pub ttl: Option<Duration>,
}

impl StoreConfig {
    pub fn new(clock: Arc<dyn Clock>, ttl: Option<Duration>) -> Self {
        Self { clock, ttl }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), None)
    }
}

/// Last error recorded by any store of a slice
#[derive(Debug, Default)]
pub struct SliceError(Mutex<Option<String>>);

impl SliceError {
    pub fn get(&self) -> Option<String> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, error: Option<String>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }
}

type FetchResult<T> = std::result::Result<Arc<T>, String>;
type SharedFetch<T> = Shared<BoxFuture<'static, FetchResult<T>>>;

struct InFlight<T> {
    generation: u64,
    /// Started by a forced refresh, so its result is already fresh
    forced: bool,
    fetch: SharedFetch<T>,
}

struct State<P, T> {
    entries: HashMap<P, Entry<T>>,
    in_flight: HashMap<P, InFlight<T>>,
    generation: u64,
}

enum Plan<T> {
    Cached(Arc<T>),
    Await(SharedFetch<T>),
}

struct Inner<P, T> {
    resource: &'static str,
    state: Mutex<State<P, T>>,
    slice_error: Arc<SliceError>,
    config: StoreConfig,
}

impl<P: Hash + Eq + Clone, T> Inner<P, T> {
    fn lock(&self) -> MutexGuard<'_, State<P, T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &Entry<T>) -> bool {
        match (self.config.ttl, entry.fetched_at) {
            (None, _) => true,
            (Some(ttl), Some(fetched_at)) => self.config.clock.now() - fetched_at < ttl,
            (Some(_), None) => false,
        }
    }

    /// Record the outcome of fetch `generation` unless a newer one replaced it
    fn settle(&self, params: &P, generation: u64, result: &FetchResult<T>) {
        let mut state = self.lock();

        let current = matches!(state.in_flight.get(params), Some(f) if f.generation == generation);
        if !current {
            return;
        }
        state.in_flight.remove(params);

        let now = self.config.clock.now();
        let entry = state.entries.entry(params.clone()).or_default();
        match result {
            Ok(data) => {
                entry.status = LoadingState::Succeeded;
                entry.data = Some(Arc::clone(data));
                entry.error = None;
                entry.fetched_at = Some(now);
                drop(state);
                self.slice_error.set(None);
            }
            Err(message) => {
                log::debug!("Failed to fetch {}: {}", self.resource, message);
                entry.status = LoadingState::Failed;
                entry.error = Some(message.clone());
                drop(state);
                self.slice_error.set(Some(message.clone()));
            }
        }
    }
}

/// Cache of fetch results keyed by parameter record `P`
pub struct Store<P, T> {
    inner: Arc<Inner<P, T>>,
}

impl<P, T> Store<P, T>
where
    P: Hash + Eq + Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    /// Store for `resource` reporting failures to `slice_error`
    pub fn new(resource: &'static str, slice_error: Arc<SliceError>, config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                resource,
                state: Mutex::new(State {
                    entries: HashMap::new(),
                    in_flight: HashMap::new(),
                    generation: 0,
                }),
                slice_error,
                config,
            }),
        }
    }

    /// Return cached data for `params`, or run `fetcher` and cache its result.
    ///
    /// A fresh successful entry is returned without I/O unless
    /// `force_refresh` is set. A call for a key already in flight awaits the
    /// running fetch; a forced call only joins a fetch that was itself
    /// forced. A forced refresh otherwise starts a new fetch, and an older
    /// fetch finishing afterwards does not overwrite the entry.
    ///
    /// Must be called within a Tokio runtime.
    pub async fn fetch<F, Fut>(&self, params: P, force_refresh: bool, fetcher: F) -> Result<Arc<T>>
    where
        F: FnOnce(P) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let plan = {
            let mut state = self.inner.lock();

            let cached = state
                .entries
                .get(&params)
                .filter(|e| e.status == LoadingState::Succeeded && self.inner.is_fresh(e))
                .and_then(|e| e.data.clone());
            let running = state
                .in_flight
                .get(&params)
                .filter(|f| f.forced || !force_refresh)
                .map(|f| f.fetch.clone());

            match (force_refresh, cached, running) {
                (false, Some(data), _) => Plan::Cached(data),
                (_, _, Some(fetch)) => {
                    log::debug!("Joining in-flight fetch of {}", self.inner.resource);
                    Plan::Await(fetch)
                }
                _ => {
                    state.generation += 1;
                    let generation = state.generation;
                    let fetch = self.spawn(params.clone(), generation, fetcher(params.clone()));
                    state.in_flight.insert(
                        params.clone(),
                        InFlight {
                            generation,
                            forced: force_refresh,
                            fetch: fetch.clone(),
                        },
                    );
                    let entry = state.entries.entry(params.clone()).or_default();
                    if let Some(previous) = entry.error.take() {
                        log::debug!("Retrying {} after: {}", self.inner.resource, previous);
                    }
                    entry.status = LoadingState::Loading;
                    Plan::Await(fetch)
                }
            }
        };

        let result = match plan {
            Plan::Cached(data) => return Ok(data),
            Plan::Await(fetch) => fetch.await,
        };

        result.map_err(|message| Error::Fetch {
            resource: self.inner.resource,
            message,
        })
    }

    /// Run `fut` on its own task, settling the entry when it finishes
    fn spawn<Fut>(&self, params: P, generation: u64, fut: Fut) -> SharedFetch<T>
    where
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let key = params.clone();
        let task = tokio::spawn(async move {
            let result = fut.await.map(Arc::new).map_err(|e| e.to_string());
            inner.settle(&key, generation, &result);
            result
        });

        let inner = Arc::clone(&self.inner);
        async move {
            match task.await {
                Ok(result) => result,
                Err(err) => {
                    let result = Err(format!("fetch task failed: {}", err));
                    inner.settle(&params, generation, &result);
                    result
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Most recent failure in this store's slice, cleared by the next success
    pub fn last_error(&self) -> Option<String> {
        self.inner.slice_error.get()
    }
}

#[cfg(test)]
impl<P: Hash + Eq + Clone, T> Store<P, T> {
    /// Data of the last successful fetch for `params`
    pub fn select(&self, params: &P) -> Option<Arc<T>> {
        self.inner.lock().entries.get(params).and_then(|e| e.data.clone())
    }

    pub fn status(&self, params: &P) -> LoadingState {
        self.inner
            .lock()
            .entries
            .get(params)
            .map(|e| e.status)
            .unwrap_or_default()
    }

    pub fn error(&self, params: &P) -> Option<String> {
        self.inner
            .lock()
            .entries
            .get(params)
            .and_then(|e| e.error.clone())
    }

    pub fn fetched_at(&self, params: &P) -> Option<DateTime<Utc>> {
        self.inner.lock().entries.get(params).and_then(|e| e.fetched_at)
    }

    /// Number of keys with an entry
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
