//! Single-slot get-or-fetch cache with request coalescing.

use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;

use crate::observability::metrics;

/// Memoizes one value for the lifetime of the process.
///
/// Concurrent callers that find the slot empty are coalesced: exactly one
/// fetch runs, everyone else waits for its result. Clones of the `Arc` are
/// handed out, never copies of the value.
pub struct ResourceCache<T> {
    /// Label for metrics and logs.
    resource: &'static str,
    /// The cached value, if any. Lock-free to read.
    slot: ArcSwapOption<T>,
    /// Held by whichever caller is currently fetching.
    flight: Mutex<()>,
}

impl<T> ResourceCache<T> {
    /// Create an empty cache for the named resource.
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            slot: ArcSwapOption::empty(),
            flight: Mutex::new(()),
        }
    }

    /// Return the cached value, running `fetch` to fill the slot if needed.
    ///
    /// A failed fetch leaves the slot empty; the error goes to the caller
    /// and the next lookup fetches again.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.slot.load_full() {
            metrics::record_cache_lookup(self.resource, true);
            return Ok(cached);
        }

        let _flight = self.flight.lock().await;

        // Someone else may have filled the slot while we waited.
        if let Some(cached) = self.slot.load_full() {
            metrics::record_cache_lookup(self.resource, true);
            return Ok(cached);
        }

        metrics::record_cache_lookup(self.resource, false);
        let value = Arc::new(fetch().await?);
        self.slot.store(Some(value.clone()));

        tracing::debug!(resource = self.resource, "Cache filled");
        Ok(value)
    }

    /// Current value without fetching.
    pub fn peek(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    /// Drop the cached value; the next lookup fetches fresh.
    pub fn invalidate(&self) {
        self.slot.store(None);
        tracing::debug!(resource = self.resource, "Cache invalidated");
    }
}

impl<T> std::fmt::Debug for ResourceCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("resource", &self.resource)
            .field("filled", &self.slot.load().is_some())
            .finish()
    }
}
