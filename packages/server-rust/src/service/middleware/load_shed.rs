//! Load-shedding middleware for calls.
//!
//! Rejects calls when the server is overloaded (in-flight count reaches
//! `max_concurrent_calls`) with `DispatchError::Overloaded`.

use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::FutureExt;
use tokio::sync::Semaphore;
use tower::{Layer, Service};
use tracing::warn;

use crate::dispatch::{BoxFuture, CallFault, DispatchError, DispatchResult};
use crate::service::call::Call;

// ---------------------------------------------------------------------------
// LoadShedLayer
// ---------------------------------------------------------------------------

/// Tower layer that limits concurrent calls via a semaphore.
///
/// When all permits are taken, incoming calls are rejected immediately
/// with `DispatchError::Overloaded` rather than queued.
#[derive(Debug, Clone)]
pub struct LoadShedLayer {
    semaphore: Arc<Semaphore>,
}

impl LoadShedLayer {
    /// Create a new `LoadShedLayer` with the given concurrency limit.
    #[must_use]
    pub fn new(max_concurrent: u32) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent as usize)),
        }
    }
}

impl<S> Layer<S> for LoadShedLayer {
    type Service = LoadShedService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoadShedService {
            inner,
            semaphore: self.semaphore.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoadShedService
// ---------------------------------------------------------------------------

/// Service wrapper that enforces a concurrency limit via semaphore-based backpressure.
#[derive(Debug, Clone)]
pub struct LoadShedService<S> {
    inner: S,
    semaphore: Arc<Semaphore>,
}

impl<S> Service<Call> for LoadShedService<S>
where
    S: Service<Call, Response = Option<Bytes>, Error = CallFault> + Send,
    S::Future: Send + 'static,
{
    type Response = Option<Bytes>;
    type Error = CallFault;
    type Future = BoxFuture<'static, DispatchResult>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, call: Call) -> Self::Future {
        let Ok(permit) = self.semaphore.clone().try_acquire_owned() else {
            warn!(call_id = call.ctx.call_id, opnum = call.opnum, "shedding call");
            return async { Err(DispatchError::Overloaded.into()) }.boxed();
        };

        let fut = self.inner.call(call);
        async move {
            // Held until the call completes.
            let result = fut.await;
            drop(permit);
            result
        }
        .boxed()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tower::ServiceExt;

    use super::*;
    use crate::service::middleware::test_support::{make_call, Outcome, SlowService};

    #[tokio::test]
    async fn allows_calls_under_limit() {
        let svc = LoadShedLayer::new(10).layer(SlowService {
            delay_ms: 1,
            outcome: Outcome::Empty,
        });
        let resp = svc.oneshot(make_call(1, 5000)).await.unwrap();
        assert!(resp.is_none());
    }

    #[tokio::test]
    async fn rejects_when_overloaded() {
        let mut svc = LoadShedLayer::new(1).layer(SlowService {
            delay_ms: 500,
            outcome: Outcome::Empty,
        });

        // First call acquires the single permit.
        let _ = ServiceExt::ready(&mut svc).await.unwrap();
        let _in_flight = tokio::spawn(svc.call(make_call(1, 5000)));

        tokio::time::sleep(Duration::from_millis(10)).await;

        let fault = svc.call(make_call(2, 5000)).await.unwrap_err();
        assert!(matches!(fault.error, DispatchError::Overloaded));
    }

    #[tokio::test]
    async fn permit_is_released_after_completion() {
        let mut svc = LoadShedLayer::new(1).layer(SlowService {
            delay_ms: 1,
            outcome: Outcome::Fault,
        });

        for call_id in 0..3 {
            let fault = ServiceExt::ready(&mut svc)
                .await
                .unwrap()
                .call(make_call(call_id, 5000))
                .await
                .unwrap_err();
            assert!(fault.error.is_not_implemented());
        }
    }
}
