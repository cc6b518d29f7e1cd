//! DCOM object RPC headers carried by every request and response.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// COM protocol version negotiated for the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComVersion {
    pub major: u16,
    pub minor: u16,
}

impl Default for ComVersion {
    /// DCOM 5.7, the version every current peer speaks.
    fn default() -> Self {
        Self { major: 5, minor: 7 }
    }
}

/// Implicit first argument of every DCOM request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrpcThis {
    pub version: ComVersion,
    pub flags: u32,
    /// Causality id linking nested calls made on behalf of one logical call.
    pub cid: Uuid,
}

/// Implicit first result of every DCOM response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrpcThat {
    pub flags: u32,
}

/// A marshaled interface pointer (`MInterfacePointer`), opaque to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfacePointer {
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,
}
