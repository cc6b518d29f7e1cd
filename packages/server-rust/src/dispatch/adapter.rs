//! Codec adapter: the typed boundary between opnums and wire bytes.

use bytes::Bytes;
use dmrp_core::{WireCodec, WireError};

/// A per-interface sum of request (or response) shapes, one variant per
/// live operation.
///
/// Implemented by `define_interface!` for each interface's request and
/// response enums. This is the only place an opnum is tied to a concrete
/// shape; the dispatcher itself is shape-agnostic.
pub trait WireMessage: Sized + Send + 'static {
    /// Opnum of the operation this value belongs to.
    fn opnum(&self) -> u32;

    /// Decodes the shape declared for `opnum` from the front of `reader`.
    ///
    /// Returns `Ok(None)` when no live operation of this interface has that
    /// opnum.
    ///
    /// # Errors
    ///
    /// Returns the codec's [`WireError`] when the bytes do not hold the
    /// declared shape.
    fn decode<C: WireCodec>(
        codec: &C,
        opnum: u32,
        reader: &mut Bytes,
    ) -> Result<Option<Self>, WireError>;

    /// Encodes the value with the shape of its own opnum.
    ///
    /// # Errors
    ///
    /// Returns the codec's [`WireError`] when encoding fails.
    fn encode<C: WireCodec>(&self, codec: &C) -> Result<Bytes, WireError>;

    /// All-default value of the shape declared for `opnum`.
    fn default_for(opnum: u32) -> Option<Self>;
}
