//! Request-enum handlers.
//!
//! A [`DynamicHandler`] receives the interface's whole request enum instead
//! of one typed method per operation. Wrapping it in [`Dynamic`] yields a
//! value that satisfies the interface's handler trait, so proxies, recorders
//! and partial test doubles can be written as a single `match`.

use async_trait::async_trait;

use super::context::CallContext;
use super::error::{OpResult, OperationError};

/// Handles every operation of one interface through its request/response enums.
#[async_trait]
pub trait DynamicHandler<Req, Resp>: Send + Sync
where
    Req: Send + 'static,
    Resp: Send + 'static,
{
    /// Handles one call. The response must be the variant matching the request.
    async fn handle(&self, ctx: &CallContext, request: Req) -> OpResult<Resp>;
}

/// Adapts a [`DynamicHandler`] to the typed handler traits.
///
/// A response of the wrong variant is reported as
/// [`OperationError::Failed`]; a fault's response of the wrong variant is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct Dynamic<H>(pub H);

impl<H> Dynamic<H> {
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self(handler)
    }

    #[must_use]
    pub fn inner(&self) -> &H {
        &self.0
    }
}

/// Error for a handler that answered with another operation's response.
#[must_use]
pub fn mismatched_response(expected: u32, actual: u32) -> OperationError {
    OperationError::Failed(anyhow::anyhow!(
        "handler answered opnum {expected} with the response shape of opnum {actual}"
    ))
}
