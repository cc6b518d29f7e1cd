//! `IVolumeClient4`: extended refresh and device-name lookup.

use crate::types::LdmObjectId;
use crate::HResult;

operation_messages! {
    /// Refreshes the server's view of all storage objects, waiting for completion.
    RefreshEx {
        request: RefreshExRequest {},
        response: RefreshExResponse {} -> HResult
    }

    /// Returns the NT device path of a volume, e.g. `\Device\HarddiskVolume3`.
    GetVolumeDeviceName {
        request: GetVolumeDeviceNameRequest {
            volume_id: LdmObjectId,
        },
        response: GetVolumeDeviceNameResponse {
            volume_device: String,
        } -> HResult
    }
}
