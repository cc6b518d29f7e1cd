//! `IVolumeClient4`: synchronous refresh and volume device names.

use dmrp_core::messages::volume_client4::{
    GetVolumeDeviceNameRequest, GetVolumeDeviceNameResponse, RefreshExRequest, RefreshExResponse,
};
use dmrp_core::SyntaxId;

use super::unknown::{
    dispatch_unknown, UnimplementedUnknownServer, UnknownRequest, UnknownResponse, UnknownServer,
    UNKNOWN,
};
use crate::delegate_unknown_server;

pub const VOLUME_CLIENT4_SYNTAX_V0_0: SyntaxId =
    SyntaxId::from_u128(0xDEB0_1010_3A37_4D26_99DF_E2BB_6AE3_AC61, 0, 0);

crate::define_interface! {
    /// Server side of `IVolumeClient4`.
    interface "IVolumeClient4" {
        syntax: VOLUME_CLIENT4_SYNTAX_V0_0,
        def: VOLUME_CLIENT4,
        base: {
            def: UNKNOWN,
            server: UnknownServer,
            unimplemented: UnimplementedUnknownServer,
            request: UnknownRequest,
            response: UnknownResponse,
            dispatch: dispatch_unknown,
            delegate: delegate_unknown_server,
        },
        server: VolumeClient4Server,
        unimplemented: UnimplementedVolumeClient4Server,
        request: VolumeClient4Request,
        response: VolumeClient4Response,
        dispatch: dispatch_volume_client4,
        handle: volume_client4_handle,
        register: register_volume_client4_server,
    }
    operations {
        /// Refreshes all storage objects and returns once the refresh completes.
        3 => RefreshEx = "RefreshEx" (RefreshExRequest, RefreshExResponse) refresh_ex;
        4 => GetVolumeDeviceName = "GetVolumeDeviceName"
            (GetVolumeDeviceNameRequest, GetVolumeDeviceNameResponse) get_volume_device_name;
    }
    reserved {}
}
