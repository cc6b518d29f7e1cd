//! Concrete DMRP interfaces.
//!
//! `unknown` is the hand-written root; every other module is a single
//! `define_interface!` block naming `IUnknown` as its base.

pub mod dm_notify;
pub mod unknown;
pub mod volume_client;
pub mod volume_client3;
pub mod volume_client4;

use crate::dispatch::InterfaceDef;

/// Every interface definition in the crate, roots first.
pub static CATALOGUE: [&InterfaceDef; 5] = [
    &unknown::UNKNOWN,
    &volume_client::VOLUME_CLIENT,
    &volume_client3::VOLUME_CLIENT3,
    &volume_client4::VOLUME_CLIENT4,
    &dm_notify::DM_NOTIFY,
];

/// Looks an interface up by name, case-insensitively.
#[must_use]
pub fn find(name: &str) -> Option<&'static InterfaceDef> {
    CATALOGUE
        .iter()
        .copied()
        .find(|def| def.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
pub(crate) mod test_support {
    use bytes::Bytes;
    use dmrp_core::MsgPackCodec;

    use crate::dispatch::{DispatchResult, WireMessage};

    /// Comparable form of a dispatch outcome: payload plus rendered error.
    pub(crate) fn summarize(result: DispatchResult) -> (Option<Bytes>, Option<String>) {
        match result {
            Ok(payload) => (payload, None),
            Err(fault) => (fault.payload, Some(fault.error.to_string())),
        }
    }

    /// Encoded all-default request for `opnum`, or empty bytes when the
    /// message family has no shape for it.
    pub(crate) fn default_payload<M: WireMessage>(opnum: u32) -> Bytes {
        M::default_for(opnum)
            .map(|msg| msg.encode(&MsgPackCodec).expect("encode default request"))
            .unwrap_or_default()
    }
}
