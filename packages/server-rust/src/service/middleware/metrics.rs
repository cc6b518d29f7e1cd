//! Metrics middleware for calls.
//!
//! Records call duration and outcome using `tracing` spans, not a full
//! metrics crate.

use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use futures_util::FutureExt;
use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::dispatch::{BoxFuture, CallFault, DispatchResult};
use crate::service::call::Call;

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments calls with timing and outcome via `tracing` spans.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

/// Service wrapper that records call duration and outcome in tracing spans.
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

/// Outcome label: `ok` for a response, `empty` for the empty result of a
/// reserved or unknown opnum, `fault` for any error.
fn outcome(result: &DispatchResult) -> &'static str {
    match result {
        Ok(Some(_)) => "ok",
        Ok(None) => "empty",
        Err(_) => "fault",
    }
}

impl<S> Service<Call> for MetricsService<S>
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
        let syntax = call.syntax;
        let opnum = call.opnum;
        let call_id = call.ctx.call_id;

        let span = info_span!(
            "call",
            interface = %syntax,
            opnum,
            call_id,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        let fut = self.inner.call(call);

        async move {
            let start = Instant::now();
            let result = fut.await;

            #[allow(clippy::cast_possible_truncation)]
            let duration_ms = start.elapsed().as_millis() as u64;
            let outcome = outcome(&result);
            tracing::Span::current().record("duration_ms", duration_ms);
            tracing::Span::current().record("outcome", outcome);

            match &result {
                Err(fault) => tracing::info!(error = %fault, "call complete"),
                Ok(_) => tracing::info!("call complete"),
            }

            result
        }
        .instrument(span)
        .boxed()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
