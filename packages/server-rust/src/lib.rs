//! DMRP server: opnum dispatch, interface composition, and the call pipeline.
//!
//! - [`dispatch`]: the generic decode -> handler -> encode path and the
//!   `define_interface!` generator
//! - [`interfaces`]: `IUnknown`, `IVolumeClient`, `IVolumeClient3`,
//!   `IVolumeClient4`, `IDMNotify`
//! - [`service`]: syntax-id routing behind Tower middleware

pub mod dispatch;
pub mod interfaces;
pub mod service;

pub use dispatch::{CallContext, CallFault, DispatchError, DispatchResult, OperationError};
pub use service::{build_call_pipeline, Call, InterfaceRouter, ServerConfig};
