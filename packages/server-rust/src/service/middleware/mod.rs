//! Tower middleware layers for the call pipeline.
//!
//! - [`timeout`]: Per-call timeout enforcement and cancellation
//! - [`metrics`]: Call timing and outcome via `tracing` spans
//! - [`load_shed`]: Semaphore-based concurrency limiting
//! - [`pipeline`]: Composes all layers into a single service stack

pub mod load_shed;
pub mod metrics;
pub mod pipeline;
pub mod timeout;

pub use load_shed::LoadShedLayer;
pub use metrics::MetricsLayer;
pub use pipeline::build_call_pipeline;
pub use timeout::TimeoutLayer;

#[cfg(test)]
pub(crate) mod test_support {
    use std::task::{Context, Poll};
    use std::time::Duration;

    use bytes::Bytes;
    use dmrp_core::SyntaxId;
    use futures_util::FutureExt;
    use tower::Service;

    use crate::dispatch::{
        BoxFuture, CallContext, CallFault, DispatchError, DispatchResult, OperationError,
    };
    use crate::service::Call;

    /// Service that sleeps, then answers according to `outcome`.
    pub(crate) struct SlowService {
        pub delay_ms: u64,
        pub outcome: Outcome,
    }

    #[derive(Clone, Copy)]
    pub(crate) enum Outcome {
        Payload,
        Empty,
        Fault,
    }

    impl Service<Call> for SlowService {
        type Response = Option<Bytes>;
        type Error = CallFault;
        type Future = BoxFuture<'static, DispatchResult>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, call: Call) -> Self::Future {
            let delay = self.delay_ms;
            let outcome = self.outcome;
            async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                match outcome {
                    Outcome::Payload => Ok(Some(Bytes::from(call.opnum.to_be_bytes().to_vec()))),
                    Outcome::Empty => Ok(None),
                    Outcome::Fault => Err(CallFault::from(DispatchError::Operation {
                        interface: "ITest",
                        operation: "Fail",
                        opnum: call.opnum,
                        source: OperationError::NotImplemented,
                    })),
                }
            }
            .boxed()
        }
    }

    pub(crate) fn make_call(call_id: u64, timeout_ms: u64) -> Call {
        Call::new(
            CallContext::new(call_id, timeout_ms),
            SyntaxId::from_u128(0x7E57, 0, 0),
            7,
            Bytes::new(),
        )
    }
}
