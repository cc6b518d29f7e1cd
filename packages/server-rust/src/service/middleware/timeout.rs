//! Timeout middleware for calls.
//!
//! Rejects calls that exceed their `call_timeout_ms` with
//! `DispatchError::Timeout` and cancels the call's token. Calls carrying a
//! zero timeout get the layer's default.

use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures_util::FutureExt;
use tower::{Layer, Service};
use tracing::debug;

use crate::dispatch::{BoxFuture, CallFault, DispatchError, DispatchResult};
use crate::service::call::Call;

// ---------------------------------------------------------------------------
// TimeoutLayer
// ---------------------------------------------------------------------------

/// Tower layer that wraps services with per-call timeout enforcement.
///
/// The timeout is read from each call's `ctx.call_timeout_ms` field,
/// allowing different calls to have different timeouts. A zero field falls
/// back to `default_timeout_ms`.
#[derive(Debug, Clone)]
pub struct TimeoutLayer {
    default_timeout_ms: u64,
}

impl TimeoutLayer {
    #[must_use]
    pub fn new(default_timeout_ms: u64) -> Self {
        Self { default_timeout_ms }
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService {
            inner,
            default_timeout_ms: self.default_timeout_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// TimeoutService
// ---------------------------------------------------------------------------

/// Service wrapper that enforces per-call timeouts.
#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
    default_timeout_ms: u64,
}

impl<S> Service<Call> for TimeoutService<S>
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
        let timeout_ms = match call.ctx.call_timeout_ms {
            0 => self.default_timeout_ms,
            ms => ms,
        };
        let cancellation = call.ctx.cancellation.clone();
        let call_id = call.ctx.call_id;
        let fut = self.inner.call(call);
        async move {
            let duration = Duration::from_millis(timeout_ms);
            match tokio::time::timeout(duration, fut).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    cancellation.cancel();
                    debug!(call_id, timeout_ms, "call timed out");
                    Err(DispatchError::Timeout { timeout_ms }.into())
                }
            }
        }
        .boxed()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tower::ServiceExt;

    use super::*;
    use crate::service::middleware::test_support::{make_call, Outcome, SlowService};

    #[tokio::test]
    async fn completes_within_timeout() {
        let svc = TimeoutLayer::new(30_000).layer(SlowService {
            delay_ms: 10,
            outcome: Outcome::Payload,
        });
        let call = make_call(1, 1000);
        let ctx = call.ctx.clone();

        let resp = svc.oneshot(call).await.unwrap();
        assert_eq!(resp, Some(Bytes::from_static(&[0, 0, 0, 7])));
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn exceeds_timeout_returns_error_and_cancels() {
        let svc = TimeoutLayer::new(30_000).layer(SlowService {
            delay_ms: 200,
            outcome: Outcome::Payload,
        });
        let call = make_call(2, 50);
        let ctx = call.ctx.clone();

        let fault = svc.oneshot(call).await.unwrap_err();
        assert!(matches!(fault.error, DispatchError::Timeout { timeout_ms: 50 }));
        assert!(fault.payload.is_none());
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn zero_timeout_uses_the_layer_default() {
        let svc = TimeoutLayer::new(40).layer(SlowService {
            delay_ms: 200,
            outcome: Outcome::Payload,
        });
        let call = make_call(3, 0);
        let ctx = call.ctx.clone();

        let fault = svc.oneshot(call).await.unwrap_err();
        assert!(matches!(fault.error, DispatchError::Timeout { timeout_ms: 40 }));
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn call_timeout_overrides_the_layer_default() {
        let svc = TimeoutLayer::new(40).layer(SlowService {
            delay_ms: 100,
            outcome: Outcome::Empty,
        });

        let resp = svc.oneshot(make_call(4, 1_000)).await.unwrap();
        assert!(resp.is_none());
    }
}
