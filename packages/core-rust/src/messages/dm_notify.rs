//! `IDMNotify`: the change-notification callback a client exposes to the server.

use crate::HResult;

operation_messages! {
    /// Delivers a batch of serialized change notifications.
    ObjectsChanged {
        request: ObjectsChangedRequest {
            byte_count: u32,
            #[serde(with = "serde_bytes")]
            byte_stream: Vec<u8>,
        },
        response: ObjectsChangedResponse {} -> HResult
    }
}
