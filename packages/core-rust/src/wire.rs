//! The wire codec seam.
//!
//! The dispatcher never touches the byte encoding directly: it asks a
//! [`WireCodec`] to materialize one typed value from the front of a request
//! buffer, and to serialize one typed response value. [`MsgPackCodec`] is the
//! shipped implementation and produces named-field `MsgPack` via
//! `rmp_serde::to_vec_named()`.

use bytes::{Buf, Bytes};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Failure inside the wire codec.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("decode failed: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("encode failed: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
}

/// Translates typed request/response values to and from wire bytes.
pub trait WireCodec: Send + Sync + 'static {
    /// Decodes one value from the front of `reader`, advancing it past the
    /// consumed bytes. Trailing bytes are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Decode`] if the bytes do not hold a `T`.
    fn read_value<T: DeserializeOwned>(&self, reader: &mut Bytes) -> Result<T, WireError>;

    /// Encodes `value` into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Encode`] if `value` cannot be represented.
    fn write_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, WireError>;
}

/// Named-field `MsgPack` codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec;

impl WireCodec for MsgPackCodec {
    fn read_value<T: DeserializeOwned>(&self, reader: &mut Bytes) -> Result<T, WireError> {
        let value = rmp_serde::from_read(Buf::reader(&mut *reader))?;
        Ok(value)
    }

    fn write_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, WireError> {
        let buf = rmp_serde::to_vec_named(value)?;
        Ok(Bytes::from(buf))
    }
}
