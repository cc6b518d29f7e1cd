//! `define_interface!`: one data block per derived interface.

/// Generates a derived interface from its opnum table.
///
/// From the `operations` and `reserved` blocks this emits:
///
/// - the `static` [`InterfaceDef`](crate::dispatch::InterfaceDef) with its
///   [`OpTable`](crate::dispatch::OpTable), based on the named base interface
/// - request and response enums implementing
///   [`WireMessage`](crate::dispatch::WireMessage)
/// - the handler trait (base handler trait as supertrait, no default methods)
/// - the `Unimplemented*` default handler, embedding the base default handler
/// - a [`Dynamic`](crate::dispatch::Dynamic) impl of the handler trait
/// - the dispatch function, the [`ServerHandle`](crate::dispatch::ServerHandle)
///   constructor, and the router registration function
///
/// The base names must be in scope at the invocation site, as must the
/// request and response shape types. The expansion names `async_trait`,
/// `bytes`, `dmrp_core`, `futures_util` and `tracing` by absolute path.
#[macro_export]
macro_rules! define_interface {
    (
        $(#[$meta:meta])*
        interface $name:literal {
            syntax: $syntax:expr,
            def: $Def:ident,
            base: {
                def: $BaseDef:ident,
                server: $BaseServer:ident,
                unimplemented: $BaseUnimpl:ident,
                request: $BaseRequest:ident,
                response: $BaseResponse:ident,
                dispatch: $base_dispatch:ident,
                delegate: $base_delegate:ident $(,)?
            },
            server: $Server:ident,
            unimplemented: $Unimpl:ident,
            request: $Request:ident,
            response: $Response:ident,
            dispatch: $dispatch:ident,
            handle: $new_handle:ident,
            register: $register:ident $(,)?
        }
        operations {
            $(
                $(#[$op_meta:meta])*
                $opnum:literal => $Op:ident = $op_name:literal ($Req:ident, $Resp:ident) $method:ident;
            )+
        }
        reserved {
            $( $r_opnum:literal => $r_name:literal; )*
        }
    ) => {
        // -------------------------------------------------------------------
        // Opnum table
        // -------------------------------------------------------------------

        static OPERATION_SLOTS: [$crate::dispatch::OpSlot; [$($opnum,)+ $($r_opnum,)*].len()] = [
            $(
                $crate::dispatch::OpSlot::operation(
                    $opnum,
                    $op_name,
                    stringify!($Req),
                    stringify!($Resp),
                ),
            )+
            $( $crate::dispatch::OpSlot::reserved($r_opnum, $r_name), )*
        ];

        #[doc = concat!("Opnum table of `", $name, "`.")]
        pub static $Def: $crate::dispatch::InterfaceDef = $crate::dispatch::InterfaceDef {
            name: $name,
            syntax: $syntax,
            base: ::std::option::Option::Some(&$BaseDef),
            ops: $crate::dispatch::OpTable::new(&OPERATION_SLOTS),
        };

        // -------------------------------------------------------------------
        // Request / response shapes
        // -------------------------------------------------------------------

        #[doc = concat!("Decoded request of any local `", $name, "` operation.")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[allow(clippy::large_enum_variant)]
        pub enum $Request {
            $( $Op($Req), )+
        }

        #[doc = concat!("Response of any local `", $name, "` operation.")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[allow(clippy::large_enum_variant)]
        pub enum $Response {
            $( $Op($Resp), )+
        }

        impl $crate::dispatch::WireMessage for $Request {
            fn opnum(&self) -> u32 {
                match self {
                    $( Self::$Op(_) => $opnum, )+
                }
            }

            fn decode<C: ::dmrp_core::WireCodec>(
                codec: &C,
                opnum: u32,
                reader: &mut ::bytes::Bytes,
            ) -> ::std::result::Result<::std::option::Option<Self>, ::dmrp_core::WireError> {
                ::std::result::Result::Ok(::std::option::Option::Some(match opnum {
                    $( $opnum => Self::$Op(codec.read_value::<$Req>(reader)?), )+
                    _ => return ::std::result::Result::Ok(::std::option::Option::None),
                }))
            }

            fn encode<C: ::dmrp_core::WireCodec>(
                &self,
                codec: &C,
            ) -> ::std::result::Result<::bytes::Bytes, ::dmrp_core::WireError> {
                match self {
                    $( Self::$Op(value) => codec.write_value(value), )+
                }
            }

            fn default_for(opnum: u32) -> ::std::option::Option<Self> {
                match opnum {
                    $( $opnum => ::std::option::Option::Some(Self::$Op(<$Req>::default())), )+
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl $crate::dispatch::WireMessage for $Response {
            fn opnum(&self) -> u32 {
                match self {
                    $( Self::$Op(_) => $opnum, )+
                }
            }

            fn decode<C: ::dmrp_core::WireCodec>(
                codec: &C,
                opnum: u32,
                reader: &mut ::bytes::Bytes,
            ) -> ::std::result::Result<::std::option::Option<Self>, ::dmrp_core::WireError> {
                ::std::result::Result::Ok(::std::option::Option::Some(match opnum {
                    $( $opnum => Self::$Op(codec.read_value::<$Resp>(reader)?), )+
                    _ => return ::std::result::Result::Ok(::std::option::Option::None),
                }))
            }

            fn encode<C: ::dmrp_core::WireCodec>(
                &self,
                codec: &C,
            ) -> ::std::result::Result<::bytes::Bytes, ::dmrp_core::WireError> {
                match self {
                    $( Self::$Op(value) => codec.write_value(value), )+
                }
            }

            fn default_for(opnum: u32) -> ::std::option::Option<Self> {
                match opnum {
                    $( $opnum => ::std::option::Option::Some(Self::$Op(<$Resp>::default())), )+
                    _ => ::std::option::Option::None,
                }
            }
        }

        // -------------------------------------------------------------------
        // Handler trait and default handler
        // -------------------------------------------------------------------

        $(#[$meta])*
        #[::async_trait::async_trait]
        pub trait $Server: $BaseServer {
            $(
                $(#[$op_meta])*
                async fn $method(
                    &self,
                    ctx: &$crate::dispatch::CallContext,
                    req: $Req,
                ) -> $crate::dispatch::OpResult<$Resp>;
            )+
        }

        #[doc = concat!(
            "Answers every `", $name, "` operation, inherited ones included, ",
            "with `OperationError::NotImplemented`."
        )]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $Unimpl {
            base: $BaseUnimpl,
        }

        $base_delegate!($Unimpl, base);

        #[::async_trait::async_trait]
        impl $Server for $Unimpl {
            $(
                async fn $method(
                    &self,
                    _ctx: &$crate::dispatch::CallContext,
                    _req: $Req,
                ) -> $crate::dispatch::OpResult<$Resp> {
                    ::std::result::Result::Err($crate::dispatch::OperationError::NotImplemented.into())
                }
            )+
        }

        #[::async_trait::async_trait]
        impl<H> $Server for $crate::dispatch::Dynamic<H>
        where
            H: $crate::dispatch::DynamicHandler<$Request, $Response>
                + $crate::dispatch::DynamicHandler<$BaseRequest, $BaseResponse>,
        {
            $(
                #[allow(unreachable_patterns)]
                async fn $method(
                    &self,
                    ctx: &$crate::dispatch::CallContext,
                    req: $Req,
                ) -> $crate::dispatch::OpResult<$Resp> {
                    let result = <H as $crate::dispatch::DynamicHandler<$Request, $Response>>::handle(
                        &self.0,
                        ctx,
                        $Request::$Op(req),
                    )
                    .await;
                    match result {
                        ::std::result::Result::Ok($Response::$Op(resp)) => {
                            ::std::result::Result::Ok(resp)
                        }
                        ::std::result::Result::Ok(other) => ::std::result::Result::Err(
                            $crate::dispatch::dynamic::mismatched_response(
                                $opnum,
                                $crate::dispatch::WireMessage::opnum(&other),
                            )
                            .into(),
                        ),
                        ::std::result::Result::Err(fault) => {
                            ::std::result::Result::Err(fault.filter_map(|resp| match resp {
                                $Response::$Op(resp) => ::std::option::Option::Some(resp),
                                _ => ::std::option::Option::None,
                            }))
                        }
                    }
                }
            )+
        }

        // -------------------------------------------------------------------
        // Dispatch and registration
        // -------------------------------------------------------------------

        async fn invoke_operation<S>(
            server: &S,
            ctx: &$crate::dispatch::CallContext,
            request: $Request,
        ) -> $crate::dispatch::OpResult<$Response>
        where
            S: $Server + ?Sized,
        {
            match request {
                $(
                    $Request::$Op(req) => server
                        .$method(ctx, req)
                        .await
                        .map($Response::$Op)
                        .map_err(|fault| fault.map($Response::$Op)),
                )+
            }
        }

        #[doc = concat!(
            "Dispatches one `", $name, "` call. Opnums of the base interface ",
            "are delegated to its dispatcher unchanged."
        )]
        ///
        /// # Errors
        ///
        /// See [`dispatch_local`](crate::dispatch::dispatch_local).
        pub async fn $dispatch<S, C>(
            ctx: &$crate::dispatch::CallContext,
            server: &S,
            codec: &C,
            opnum: u32,
            reader: &mut ::bytes::Bytes,
        ) -> $crate::dispatch::DispatchResult
        where
            S: $Server + ?Sized,
            C: ::dmrp_core::WireCodec,
        {
            match $Def.route(opnum) {
                $crate::dispatch::Route::Base { interface, .. } => {
                    ::tracing::debug!(interface = $name, base = interface, opnum, "delegating to base");
                    $base_dispatch(ctx, server, codec, opnum, reader).await
                }
                $crate::dispatch::Route::Local => {
                    $crate::dispatch::dispatch_local::<$Request, $Response, C, _, _>(
                        &$Def,
                        codec,
                        opnum,
                        reader,
                        |request| invoke_operation(server, ctx, request),
                    )
                    .await
                }
            }
        }

        #[doc = concat!("Erases a `", $name, "` server and codec into a [`ServerHandle`].")]
        ///
        /// [`ServerHandle`]: crate::dispatch::ServerHandle
        pub fn $new_handle<S, C>(
            server: ::std::sync::Arc<S>,
            codec: C,
        ) -> $crate::dispatch::ServerHandle
        where
            S: $Server + ?Sized + 'static,
            C: ::dmrp_core::WireCodec,
        {
            let codec = ::std::sync::Arc::new(codec);
            ::std::sync::Arc::new(
                move |ctx: $crate::dispatch::CallContext, opnum: u32, mut payload: ::bytes::Bytes| {
                    let server = ::std::sync::Arc::clone(&server);
                    let codec = ::std::sync::Arc::clone(&codec);
                    ::futures_util::FutureExt::boxed(async move {
                        $dispatch(&ctx, &*server, &*codec, opnum, &mut payload).await
                    })
                },
            )
        }

        #[doc = concat!("Binds a `", $name, "` server to `router` under its syntax id.")]
        ///
        /// # Errors
        ///
        /// Fails if the syntax is already bound or the table is malformed.
        pub fn $register<S, C>(
            router: &mut $crate::service::InterfaceRouter,
            server: ::std::sync::Arc<S>,
            codec: C,
        ) -> ::std::result::Result<(), $crate::dispatch::RegistrationError>
        where
            S: $Server + ?Sized + 'static,
            C: ::dmrp_core::WireCodec,
        {
            router.register(&$Def, $new_handle(server, codec))
        }
    };
}
