//! Call routing and execution framework.
//!
//! This module implements the transport-facing call pipeline:
//!
//! 1. **Call** (`call`): syntax id, opnum and request bytes plus context
//! 2. **Middleware** (`middleware`): Tower layers (load shedding, timeout, metrics)
//! 3. **Routing** (`router`): Dispatch to the server registered for the syntax id
//!
//! Everything below the router (composition, opnum lookup, codec, handler
//! invocation) lives in [`crate::dispatch`].

pub mod call;
pub mod config;
pub mod middleware;
pub mod router;

// Re-export key types for convenient access.
pub use call::Call;
pub use config::ServerConfig;
pub use middleware::build_call_pipeline;
pub use router::InterfaceRouter;
