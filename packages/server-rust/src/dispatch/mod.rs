//! Opnum dispatch and interface composition.
//!
//! The dispatch path for one inbound call:
//!
//! 1. **Composition** (`interface`): [`InterfaceDef::route`] sends opnums
//!    below the base boundary to the base interface's dispatcher unchanged
//! 2. **Registry** (`table`): [`OpTable::lookup`] classifies the opnum as a
//!    live operation, a reserved slot, or unknown
//! 3. **Codec adapter** (`adapter`): [`WireMessage`] decodes the typed request
//!    and encodes the typed response for that opnum
//! 4. **Dispatcher** (`dispatcher`): [`dispatch_local`] runs
//!    decode -> handler -> encode and maps failures onto [`DispatchError`]
//!
//! The per-interface data (tables, shapes, handler traits) is generated by
//! [`define_interface!`](crate::define_interface) in `crate::interfaces`.

pub mod adapter;
pub mod context;
pub mod dispatcher;
pub mod dynamic;
pub mod error;
pub mod interface;
mod macros;
pub mod table;

pub use adapter::WireMessage;
pub use context::CallContext;
pub use dispatcher::{dispatch_local, BoxFuture, DispatchResult, ServerHandle};
pub use dynamic::{Dynamic, DynamicHandler};
pub use error::{
    CallFault, DispatchError, Fault, OpResult, OperationError, RegistrationError, TableError,
};
pub use interface::{InterfaceDef, Resolved, Route};
pub use table::{Lookup, OpSlot, OpTable, SlotKind};
