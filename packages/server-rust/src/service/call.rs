//! The unit of work flowing through the call pipeline.

use bytes::Bytes;
use dmrp_core::SyntaxId;

use crate::dispatch::CallContext;

/// One inbound call: the interface it targets, the opnum, and the raw
/// request bytes.
#[derive(Debug, Clone)]
pub struct Call {
    pub ctx: CallContext,
    pub syntax: SyntaxId,
    pub opnum: u32,
    pub payload: Bytes,
}

impl Call {
    #[must_use]
    pub fn new(ctx: CallContext, syntax: SyntaxId, opnum: u32, payload: Bytes) -> Self {
        Self {
            ctx,
            syntax,
            opnum,
            payload,
        }
    }

    #[must_use]
    pub fn ctx(&self) -> &CallContext {
        &self.ctx
    }
}
