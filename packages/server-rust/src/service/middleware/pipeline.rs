//! Pipeline composition: combines all middleware layers into a single service stack.

use bytes::Bytes;
use tower::ServiceBuilder;

use super::load_shed::LoadShedLayer;
use super::metrics::MetricsLayer;
use super::timeout::TimeoutLayer;
use crate::dispatch::CallFault;
use crate::service::call::Call;
use crate::service::config::ServerConfig;
use crate::service::router::InterfaceRouter;

/// Build the call pipeline by wrapping the `InterfaceRouter` with middleware layers.
///
/// Layer order (outermost to innermost):
/// 1. `LoadShedLayer` -- reject when overloaded (fail fast before doing any work)
/// 2. `TimeoutLayer` -- enforce per-call timeouts, defaulting to
///    `config.default_call_timeout_ms`
/// 3. `MetricsLayer` -- record timing and outcome (closest to the dispatcher)
///
/// The returned service implements `tower::Service<Call>`.
#[must_use]
pub fn build_call_pipeline(
    router: InterfaceRouter,
    config: &ServerConfig,
) -> impl tower::Service<
    Call,
    Response = Option<Bytes>,
    Error = CallFault,
    Future = crate::dispatch::BoxFuture<'static, crate::dispatch::DispatchResult>,
> + Clone {
    ServiceBuilder::new()
        .layer(LoadShedLayer::new(config.max_concurrent_calls))
        .layer(TimeoutLayer::new(config.default_call_timeout_ms))
        .layer(MetricsLayer)
        .service(router)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
