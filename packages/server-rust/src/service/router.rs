//! Call routing: dispatches a `Call` to the server registered for its syntax.

use std::collections::HashMap;
use std::fmt;
use std::task::{Context, Poll};

use bytes::Bytes;
use dmrp_core::SyntaxId;
use futures_util::FutureExt;
use tower::Service;
use tracing::{debug, info};

use super::call::Call;
use super::config::ServerConfig;
use crate::dispatch::{
    BoxFuture, CallFault, DispatchError, DispatchResult, InterfaceDef, RegistrationError,
    ServerHandle,
};

// ---------------------------------------------------------------------------
// InterfaceRouter
// ---------------------------------------------------------------------------

/// Routes `Call` values to the server registered for their syntax id.
///
/// Each entry is a [`ServerHandle`] produced by an interface's `*_handle`
/// constructor. Calls for an unregistered syntax fail with
/// [`DispatchError::UnknownInterface`]. Cloning shares the registered handles.
#[derive(Clone)]
pub struct InterfaceRouter {
    servers: HashMap<SyntaxId, Registered>,
    validate_tables: bool,
}

#[derive(Clone)]
struct Registered {
    def: &'static InterfaceDef,
    handle: ServerHandle,
}

impl InterfaceRouter {
    /// Create a new empty router that validates tables on registration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            servers: HashMap::new(),
            validate_tables: true,
        }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            servers: HashMap::new(),
            validate_tables: config.validate_tables,
        }
    }

    /// Binds `handle` to the syntax of `def`.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::InvalidTable`] if validation is enabled and
    ///   `def` (or any of its bases) is malformed
    /// - [`RegistrationError::AlreadyRegistered`] if the syntax is taken
    pub fn register(
        &mut self,
        def: &'static InterfaceDef,
        handle: ServerHandle,
    ) -> Result<(), RegistrationError> {
        if self.validate_tables {
            def.validate()?;
        }
        if self.servers.contains_key(&def.syntax) {
            return Err(RegistrationError::AlreadyRegistered { syntax: def.syntax });
        }
        info!(interface = def.name, syntax = %def.syntax, "registered interface server");
        self.servers.insert(def.syntax, Registered { def, handle });
        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, syntax: &SyntaxId) -> bool {
        self.servers.contains_key(syntax)
    }

    /// Definition registered under `syntax`, if any.
    #[must_use]
    pub fn interface(&self, syntax: &SyntaxId) -> Option<&'static InterfaceDef> {
        self.servers.get(syntax).map(|entry| entry.def)
    }

    /// Dispatches one call without going through `poll_ready`.
    pub fn dispatch(&self, call: Call) -> BoxFuture<'static, DispatchResult> {
        let Call {
            ctx,
            syntax,
            opnum,
            payload,
        } = call;
        match self.servers.get(&syntax) {
            Some(entry) => (entry.handle)(ctx, opnum, payload),
            None => {
                debug!(syntax = %syntax, opnum, "call for unregistered interface");
                async move { Err(CallFault::from(DispatchError::UnknownInterface { syntax })) }
                    .boxed()
            }
        }
    }
}

impl Default for InterfaceRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InterfaceRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceRouter")
            .field(
                "interfaces",
                &self.servers.values().map(|e| e.def.name).collect::<Vec<_>>(),
            )
            .field("validate_tables", &self.validate_tables)
            .finish()
    }
}

impl Service<Call> for InterfaceRouter {
    type Response = Option<Bytes>;
    type Error = CallFault;
    type Future = BoxFuture<'static, DispatchResult>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Handles are plain callables; they are always ready.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, call: Call) -> Self::Future {
        self.dispatch(call)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
