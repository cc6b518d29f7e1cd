//! DMRP Core — message shapes, interface identities, and the wire codec seam
//! for the Disk Management Remote Protocol interfaces.

pub mod hresult;
pub mod messages;
pub mod orpc;
pub mod syntax;
pub mod types;
pub mod wire;

pub use hresult::HResult;
pub use orpc::{InterfacePointer, OrpcThat, OrpcThis};
pub use syntax::SyntaxId;
pub use types::LdmObjectId;
pub use wire::{MsgPackCodec, WireCodec, WireError};
