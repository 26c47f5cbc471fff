//! Single-slot TTL caching with concurrent-miss collapsing.
//!
//! Both the raw blog list and the derived statistics are expensive to
//! produce (each refresh is an upstream HTTP round-trip), so each gets one
//! `TtlCell`: a single cached value with a freshness window, not a keyed
//! cache. A refresh already in flight is shared with every caller that
//! arrives before it resolves, so a burst of requests during a miss costs
//! exactly one producer invocation.
//!
//! Failures are never stored. All callers joined to a failing refresh see
//! the same error, and the next call afterwards re-attempts immediately.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;

use crate::error::ApiError;

/// A refresh attempt shared among every caller that joins it.
type SharedAttempt<T> = Shared<BoxFuture<'static, Result<T, Arc<ApiError>>>>;

struct Slot<T> {
    /// Last successful value and when it was stored.
    ready: Option<(Instant, T)>,
    /// Refresh currently in flight, if any.
    inflight: Option<SharedAttempt<T>>,
}

/// A single cached value with a time-to-live and an in-flight guard.
///
/// Cloning a `TtlCell` yields a handle to the same slot.
#[derive(Clone)]
pub struct TtlCell<T> {
    ttl: Duration,
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> TtlCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty cell whose values stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Arc::new(Mutex::new(Slot {
                ready: None,
                inflight: None,
            })),
        }
    }

    /// Return the cached value, or produce a new one.
    ///
    /// - A stored value younger than the TTL is returned without invoking
    ///   `produce`.
    /// - On a miss with no refresh in flight, `produce()` runs once; its
    ///   success is stored with a fresh timestamp before callers resume.
    /// - On a miss while a refresh is already in flight, the caller awaits
    ///   that same attempt and receives its outcome, error included.
    pub async fn get_or_refresh<F, Fut>(&self, produce: F) -> Result<T, Arc<ApiError>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let attempt = {
            let mut slot = self.slot.lock();

            if let Some((stored_at, value)) = &slot.ready {
                if stored_at.elapsed() < self.ttl {
                    tracing::debug!("cache hit");
                    return Ok(value.clone());
                }
            }

            match &slot.inflight {
                Some(attempt) => {
                    tracing::debug!("cache miss, joining in-flight refresh");
                    attempt.clone()
                }
                None => {
                    tracing::debug!("cache miss, refreshing");
                    let fut = produce();
                    let shared_slot = Arc::clone(&self.slot);
                    let attempt: SharedAttempt<T> = async move {
                        let result = fut.await.map_err(Arc::new);
                        // Publish before any waiter resumes: clear the
                        // in-flight marker and store only successes.
                        let mut slot = shared_slot.lock();
                        slot.inflight = None;
                        if let Ok(value) = &result {
                            slot.ready = Some((Instant::now(), value.clone()));
                        }
                        result
                    }
                    .boxed()
                    .shared();
                    slot.inflight = Some(attempt.clone());
                    attempt
                }
            }
        };

        attempt.await
    }
}
