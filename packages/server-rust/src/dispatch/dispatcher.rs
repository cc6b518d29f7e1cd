//! The generic per-interface dispatch algorithm.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use dmrp_core::WireCodec;
pub use futures_util::future::BoxFuture;
use tracing::{debug, trace, warn};

use super::adapter::WireMessage;
use super::context::CallContext;
use super::error::{CallFault, DispatchError, Fault, OpResult};
use super::interface::InterfaceDef;
use super::table::{Lookup, OpSlot};

/// Outcome of one call.
///
/// `Ok(None)` is the empty result of a reserved or unknown opnum,
/// `Ok(Some(bytes))` a successful response, and `Err` a failure that may
/// still carry an encoded response in [`CallFault::payload`].
pub type DispatchResult = Result<Option<Bytes>, CallFault>;

/// A registered interface server: handler, codec and dispatch function
/// erased behind one shareable callable.
pub type ServerHandle =
    Arc<dyn Fn(CallContext, u32, Bytes) -> BoxFuture<'static, DispatchResult> + Send + Sync>;

/// Dispatches an opnum that [`InterfaceDef::route`] resolved locally.
///
/// Reserved and unknown opnums return `Ok(None)` without calling `invoke`.
/// A request that fails to decode aborts the call before `invoke` runs.
/// When the handler fails, any response it produced is still encoded and
/// returned alongside its error.
///
/// # Errors
///
/// - [`DispatchError::Malformed`] if the request does not decode
/// - [`DispatchError::Operation`] if the handler fails
/// - [`DispatchError::Encode`] if a successful response does not encode
pub async fn dispatch_local<Req, Resp, C, F, Fut>(
    def: &'static InterfaceDef,
    codec: &C,
    opnum: u32,
    reader: &mut Bytes,
    invoke: F,
) -> DispatchResult
where
    Req: WireMessage,
    Resp: WireMessage,
    C: WireCodec,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = OpResult<Resp>>,
{
    let slot = match def.ops.lookup(opnum) {
        Lookup::Operation(slot) => slot,
        Lookup::Reserved(slot) => {
            debug!(interface = def.name, opnum, slot = slot.name, "reserved opnum");
            return Ok(None);
        }
        Lookup::Unknown => {
            debug!(interface = def.name, opnum, "unknown opnum");
            return Ok(None);
        }
    };

    let request = match Req::decode(codec, opnum, reader) {
        Ok(Some(request)) => request,
        Ok(None) => {
            warn!(
                interface = def.name,
                opnum,
                operation = slot.name,
                "operation has no request shape"
            );
            return Ok(None);
        }
        Err(source) => {
            warn!(
                interface = def.name,
                opnum,
                operation = slot.name,
                error = %source,
                "malformed request"
            );
            return Err(DispatchError::Malformed {
                interface: def.name,
                opnum,
                source,
            }
            .into());
        }
    };

    match invoke(request).await {
        Ok(response) => {
            let payload = encode_response(def, slot, codec, &response)?;
            trace!(
                interface = def.name,
                operation = slot.name,
                bytes = payload.len(),
                "operation complete"
            );
            Ok(Some(payload))
        }
        Err(Fault { response, error }) => {
            debug!(
                interface = def.name,
                operation = slot.name,
                error = %error,
                with_response = response.is_some(),
                "operation failed"
            );
            // The handler's error wins over an encode failure of its response.
            let payload = response.and_then(|r| encode_response(def, slot, codec, &r).ok());
            Err(CallFault::with_payload(
                payload,
                DispatchError::Operation {
                    interface: def.name,
                    operation: slot.name,
                    opnum: slot.opnum,
                    source: error,
                },
            ))
        }
    }
}

fn encode_response<Resp: WireMessage, C: WireCodec>(
    def: &'static InterfaceDef,
    slot: &OpSlot,
    codec: &C,
    response: &Resp,
) -> Result<Bytes, DispatchError> {
    debug_assert_eq!(response.opnum(), slot.opnum, "response shape of another opnum");
    response.encode(codec).map_err(|source| {
        warn!(
            interface = def.name,
            operation = slot.name,
            error = %source,
            "failed to encode response"
        );
        DispatchError::Encode {
            interface: def.name,
            opnum: slot.opnum,
            source,
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use dmrp_core::{HResult, MsgPackCodec, SyntaxId, WireError};

    use super::*;
    use crate::dispatch::{OpTable, OperationError};

    static SLOTS: [OpSlot; 2] = [
        OpSlot::operation(3, "Echo", "String", "String"),
        OpSlot::reserved(4, "Reserved_Opnum4"),
    ];
    static ECHO: InterfaceDef = InterfaceDef {
        name: "IEcho",
        syntax: SyntaxId::from_u128(0xEC40, 0, 0),
        base: None,
        ops: OpTable::new(&SLOTS),
    };

    #[derive(Debug, PartialEq)]
    struct Echo(String);

    impl WireMessage for Echo {
        fn opnum(&self) -> u32 {
            3
        }

        fn decode<C: WireCodec>(
            codec: &C,
            opnum: u32,
            reader: &mut Bytes,
        ) -> Result<Option<Self>, WireError> {
            match opnum {
                3 => codec.read_value(reader).map(|s| Some(Self(s))),
                _ => Ok(None),
            }
        }

        fn encode<C: WireCodec>(&self, codec: &C) -> Result<Bytes, WireError> {
            codec.write_value(&self.0)
        }

        fn default_for(opnum: u32) -> Option<Self> {
            (opnum == 3).then(|| Self(String::new()))
        }
    }

    fn payload(s: &str) -> Bytes {
        MsgPackCodec.write_value(s).expect("encode")
    }

    async fn run<F, Fut>(opnum: u32, reader: &mut Bytes, invoke: F) -> DispatchResult
    where
        F: FnOnce(Echo) -> Fut,
        Fut: Future<Output = OpResult<Echo>>,
    {
        dispatch_local::<Echo, Echo, _, _, _>(&ECHO, &MsgPackCodec, opnum, reader, invoke).await
    }

    #[tokio::test]
    async fn live_opnum_round_trips_through_handler() {
        let mut reader = payload("disk 0");
        let result = run(3, &mut reader, |req| async move {
            Ok(Echo(req.0.to_uppercase()))
        })
        .await;

        let mut bytes = result.expect("dispatch").expect("payload");
        let decoded: String = MsgPackCodec.read_value(&mut bytes).expect("decode");
        assert_eq!(decoded, "DISK 0");
    }

    #[tokio::test]
    async fn reserved_and_unknown_opnums_skip_the_handler() {
        let calls = AtomicUsize::new(0);
        for opnum in [0, 4, 5, 1000] {
            let mut reader = payload("ignored");
            let result = run(opnum, &mut reader, |req| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok(req) }
            })
            .await;
            assert!(matches!(result, Ok(None)), "opnum {opnum}");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_request_aborts_before_handler() {
        let calls = AtomicUsize::new(0);
        let mut reader = Bytes::from_static(&[0xC1]);
        let result = run(3, &mut reader, |req| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(req) }
        })
        .await;

        let fault = result.unwrap_err();
        assert!(fault.payload.is_none());
        assert!(matches!(
            fault.error,
            DispatchError::Malformed { interface: "IEcho", opnum: 3, .. }
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_handler_response_is_still_encoded() {
        let mut reader = payload("disk 9");
        let result = run(3, &mut reader, |_req| async move {
            Err(Fault::with_response(
                Echo("partial".into()),
                OperationError::Status(HResult::LDM_E_OBJECT_NOT_FOUND),
            ))
        })
        .await;

        let fault = result.unwrap_err();
        let mut bytes = fault.payload.expect("payload travels with the error");
        let decoded: String = MsgPackCodec.read_value(&mut bytes).expect("decode");
        assert_eq!(decoded, "partial");
        assert!(matches!(
            fault.error,
            DispatchError::Operation {
                operation: "Echo",
                source: OperationError::Status(s),
                ..
            } if s == HResult::LDM_E_OBJECT_NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn failed_handler_without_response_has_no_payload() {
        let mut reader = payload("x");
        let result = run(3, &mut reader, |_req| async move {
            Err(OperationError::NotImplemented.into())
        })
        .await;

        let fault = result.unwrap_err();
        assert!(fault.payload.is_none());
        assert!(fault.error.is_not_implemented());
    }
}
