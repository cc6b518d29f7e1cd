//! Per-call context threaded from the transport into handler methods.

use tokio_util::sync::CancellationToken;

/// Context for a single inbound call.
///
/// Created by the transport for each request and borrowed by the handler for
/// the duration of the call. The dispatcher forwards it without inspecting it.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Transport-assigned identifier, unique per connection.
    pub call_id: u64,
    /// Deadline enforced by the pipeline's timeout layer. 0 defers to the
    /// layer's configured default.
    pub call_timeout_ms: u64,
    /// Cancelled by the transport when the caller goes away or the call times out.
    pub cancellation: CancellationToken,
}

impl CallContext {
    #[must_use]
    pub fn new(call_id: u64, call_timeout_ms: u64) -> Self {
        Self {
            call_id,
            call_timeout_ms,
            cancellation: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_cancellation() {
        let ctx = CallContext::new(1, 5_000);
        let clone = ctx.clone();
        assert!(!clone.is_cancelled());

        ctx.cancellation.cancel();

        assert!(clone.is_cancelled());
        assert_eq!(clone.call_id, 1);
    }
}
