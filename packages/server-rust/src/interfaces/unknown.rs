//! `IUnknown`, the root of every DCOM interface chain.
//!
//! Written out by hand: it has no base, so it is the one interface
//! `define_interface!` does not generate. Derived interfaces delegate opnums
//! 0..3 to [`dispatch_unknown`] and embed [`UnimplementedUnknownServer`] in
//! their default handlers through [`delegate_unknown_server!`].
//!
//! [`delegate_unknown_server!`]: crate::delegate_unknown_server

use async_trait::async_trait;
use bytes::Bytes;
use dmrp_core::messages::unknown::{
    AddRefRequest, AddRefResponse, QueryInterfaceRequest, QueryInterfaceResponse, ReleaseRequest,
    ReleaseResponse,
};
use dmrp_core::{SyntaxId, WireCodec, WireError};

use crate::dispatch::dynamic::mismatched_response;
use crate::dispatch::{
    dispatch_local, CallContext, DispatchResult, Dynamic, DynamicHandler, InterfaceDef, OpResult,
    OpSlot, OpTable, OperationError, WireMessage,
};

pub const UNKNOWN_SYNTAX_V0_0: SyntaxId =
    SyntaxId::from_u128(0x0000_0000_0000_0000_C000_0000_0000_0046, 0, 0);

static UNKNOWN_SLOTS: [OpSlot; 3] = [
    OpSlot::operation(0, "QueryInterface", "QueryInterfaceRequest", "QueryInterfaceResponse"),
    OpSlot::operation(1, "AddRef", "AddRefRequest", "AddRefResponse"),
    OpSlot::operation(2, "Release", "ReleaseRequest", "ReleaseResponse"),
];

pub static UNKNOWN: InterfaceDef = InterfaceDef {
    name: "IUnknown",
    syntax: UNKNOWN_SYNTAX_V0_0,
    base: None,
    ops: OpTable::new(&UNKNOWN_SLOTS),
};

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownRequest {
    QueryInterface(QueryInterfaceRequest),
    AddRef(AddRefRequest),
    Release(ReleaseRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownResponse {
    QueryInterface(QueryInterfaceResponse),
    AddRef(AddRefResponse),
    Release(ReleaseResponse),
}

impl WireMessage for UnknownRequest {
    fn opnum(&self) -> u32 {
        match self {
            Self::QueryInterface(_) => 0,
            Self::AddRef(_) => 1,
            Self::Release(_) => 2,
        }
    }

    fn decode<C: WireCodec>(
        codec: &C,
        opnum: u32,
        reader: &mut Bytes,
    ) -> Result<Option<Self>, WireError> {
        Ok(Some(match opnum {
            0 => Self::QueryInterface(codec.read_value(reader)?),
            1 => Self::AddRef(codec.read_value(reader)?),
            2 => Self::Release(codec.read_value(reader)?),
            _ => return Ok(None),
        }))
    }

    fn encode<C: WireCodec>(&self, codec: &C) -> Result<Bytes, WireError> {
        match self {
            Self::QueryInterface(req) => codec.write_value(req),
            Self::AddRef(req) => codec.write_value(req),
            Self::Release(req) => codec.write_value(req),
        }
    }

    fn default_for(opnum: u32) -> Option<Self> {
        match opnum {
            0 => Some(Self::QueryInterface(QueryInterfaceRequest::default())),
            1 => Some(Self::AddRef(AddRefRequest::default())),
            2 => Some(Self::Release(ReleaseRequest::default())),
            _ => None,
        }
    }
}

impl WireMessage for UnknownResponse {
    fn opnum(&self) -> u32 {
        match self {
            Self::QueryInterface(_) => 0,
            Self::AddRef(_) => 1,
            Self::Release(_) => 2,
        }
    }

    fn decode<C: WireCodec>(
        codec: &C,
        opnum: u32,
        reader: &mut Bytes,
    ) -> Result<Option<Self>, WireError> {
        Ok(Some(match opnum {
            0 => Self::QueryInterface(codec.read_value(reader)?),
            1 => Self::AddRef(codec.read_value(reader)?),
            2 => Self::Release(codec.read_value(reader)?),
            _ => return Ok(None),
        }))
    }

    fn encode<C: WireCodec>(&self, codec: &C) -> Result<Bytes, WireError> {
        match self {
            Self::QueryInterface(resp) => codec.write_value(resp),
            Self::AddRef(resp) => codec.write_value(resp),
            Self::Release(resp) => codec.write_value(resp),
        }
    }

    fn default_for(opnum: u32) -> Option<Self> {
        match opnum {
            0 => Some(Self::QueryInterface(QueryInterfaceResponse::default())),
            1 => Some(Self::AddRef(AddRefResponse::default())),
            2 => Some(Self::Release(ReleaseResponse::default())),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Handler trait and default handler
// ---------------------------------------------------------------------------

/// Handler for the three `IUnknown` operations.
#[async_trait]
pub trait UnknownServer: Send + Sync {
    async fn query_interface(
        &self,
        ctx: &CallContext,
        req: QueryInterfaceRequest,
    ) -> OpResult<QueryInterfaceResponse>;

    async fn add_ref(&self, ctx: &CallContext, req: AddRefRequest) -> OpResult<AddRefResponse>;

    async fn release(&self, ctx: &CallContext, req: ReleaseRequest) -> OpResult<ReleaseResponse>;
}

/// Answers every `IUnknown` operation with [`OperationError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedUnknownServer;

#[async_trait]
impl UnknownServer for UnimplementedUnknownServer {
    async fn query_interface(
        &self,
        _ctx: &CallContext,
        _req: QueryInterfaceRequest,
    ) -> OpResult<QueryInterfaceResponse> {
        Err(OperationError::NotImplemented.into())
    }

    async fn add_ref(&self, _ctx: &CallContext, _req: AddRefRequest) -> OpResult<AddRefResponse> {
        Err(OperationError::NotImplemented.into())
    }

    async fn release(
        &self,
        _ctx: &CallContext,
        _req: ReleaseRequest,
    ) -> OpResult<ReleaseResponse> {
        Err(OperationError::NotImplemented.into())
    }
}

/// Implements [`UnknownServer`] for `$ty` by forwarding to its `$field`.
#[macro_export]
macro_rules! delegate_unknown_server {
    ($ty:ty, $field:ident) => {
        #[::async_trait::async_trait]
        impl $crate::interfaces::unknown::UnknownServer for $ty {
            async fn query_interface(
                &self,
                ctx: &$crate::dispatch::CallContext,
                req: ::dmrp_core::messages::unknown::QueryInterfaceRequest,
            ) -> $crate::dispatch::OpResult<::dmrp_core::messages::unknown::QueryInterfaceResponse>
            {
                $crate::interfaces::unknown::UnknownServer::query_interface(&self.$field, ctx, req).await
            }

            async fn add_ref(
                &self,
                ctx: &$crate::dispatch::CallContext,
                req: ::dmrp_core::messages::unknown::AddRefRequest,
            ) -> $crate::dispatch::OpResult<::dmrp_core::messages::unknown::AddRefResponse> {
                $crate::interfaces::unknown::UnknownServer::add_ref(&self.$field, ctx, req).await
            }

            async fn release(
                &self,
                ctx: &$crate::dispatch::CallContext,
                req: ::dmrp_core::messages::unknown::ReleaseRequest,
            ) -> $crate::dispatch::OpResult<::dmrp_core::messages::unknown::ReleaseResponse> {
                $crate::interfaces::unknown::UnknownServer::release(&self.$field, ctx, req).await
            }
        }
    };
}

#[async_trait]
impl<H> UnknownServer for Dynamic<H>
where
    H: DynamicHandler<UnknownRequest, UnknownResponse>,
{
    async fn query_interface(
        &self,
        ctx: &CallContext,
        req: QueryInterfaceRequest,
    ) -> OpResult<QueryInterfaceResponse> {
        match self.0.handle(ctx, UnknownRequest::QueryInterface(req)).await {
            Ok(UnknownResponse::QueryInterface(resp)) => Ok(resp),
            Ok(other) => Err(mismatched_response(0, other.opnum()).into()),
            Err(fault) => Err(fault.filter_map(|resp| match resp {
                UnknownResponse::QueryInterface(resp) => Some(resp),
                _ => None,
            })),
        }
    }

    async fn add_ref(&self, ctx: &CallContext, req: AddRefRequest) -> OpResult<AddRefResponse> {
        match self.0.handle(ctx, UnknownRequest::AddRef(req)).await {
            Ok(UnknownResponse::AddRef(resp)) => Ok(resp),
            Ok(other) => Err(mismatched_response(1, other.opnum()).into()),
            Err(fault) => Err(fault.filter_map(|resp| match resp {
                UnknownResponse::AddRef(resp) => Some(resp),
                _ => None,
            })),
        }
    }

    async fn release(&self, ctx: &CallContext, req: ReleaseRequest) -> OpResult<ReleaseResponse> {
        match self.0.handle(ctx, UnknownRequest::Release(req)).await {
            Ok(UnknownResponse::Release(resp)) => Ok(resp),
            Ok(other) => Err(mismatched_response(2, other.opnum()).into()),
            Err(fault) => Err(fault.filter_map(|resp| match resp {
                UnknownResponse::Release(resp) => Some(resp),
                _ => None,
            })),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

async fn invoke_operation<S>(
    server: &S,
    ctx: &CallContext,
    request: UnknownRequest,
) -> OpResult<UnknownResponse>
where
    S: UnknownServer + ?Sized,
{
    match request {
        UnknownRequest::QueryInterface(req) => server
            .query_interface(ctx, req)
            .await
            .map(UnknownResponse::QueryInterface)
            .map_err(|f| f.map(UnknownResponse::QueryInterface)),
        UnknownRequest::AddRef(req) => server
            .add_ref(ctx, req)
            .await
            .map(UnknownResponse::AddRef)
            .map_err(|f| f.map(UnknownResponse::AddRef)),
        UnknownRequest::Release(req) => server
            .release(ctx, req)
            .await
            .map(UnknownResponse::Release)
            .map_err(|f| f.map(UnknownResponse::Release)),
    }
}

/// Dispatches an `IUnknown` opnum. Derived interfaces call this for 0..3.
///
/// # Errors
///
/// See [`dispatch_local`].
pub async fn dispatch_unknown<S, C>(
    ctx: &CallContext,
    server: &S,
    codec: &C,
    opnum: u32,
    reader: &mut Bytes,
) -> DispatchResult
where
    S: UnknownServer + ?Sized,
    C: WireCodec,
{
    dispatch_local::<UnknownRequest, UnknownResponse, C, _, _>(
        &UNKNOWN,
        codec,
        opnum,
        reader,
        |request| invoke_operation(server, ctx, request),
    )
    .await
}
