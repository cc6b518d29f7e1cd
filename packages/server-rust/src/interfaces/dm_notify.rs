//! `IDMNotify`: the client-side callback receiving change notifications.

use dmrp_core::messages::dm_notify::{ObjectsChangedRequest, ObjectsChangedResponse};
use dmrp_core::SyntaxId;

use super::unknown::{
    dispatch_unknown, UnimplementedUnknownServer, UnknownRequest, UnknownResponse, UnknownServer,
    UNKNOWN,
};
use crate::delegate_unknown_server;

pub const DM_NOTIFY_SYNTAX_V0_0: SyntaxId =
    SyntaxId::from_u128(0xD2D7_9DF7_3400_11D0_B40B_00AA_005F_F586, 0, 0);

crate::define_interface! {
    /// Receiver of `IDMNotify` callbacks.
    ///
    /// The server calls this on the object a client passed to
    /// `IVolumeClient::Initialize` whenever disks, volumes or tasks change.
    interface "IDMNotify" {
        syntax: DM_NOTIFY_SYNTAX_V0_0,
        def: DM_NOTIFY,
        base: {
            def: UNKNOWN,
            server: UnknownServer,
            unimplemented: UnimplementedUnknownServer,
            request: UnknownRequest,
            response: UnknownResponse,
            dispatch: dispatch_unknown,
            delegate: delegate_unknown_server,
        },
        server: DmNotifyServer,
        unimplemented: UnimplementedDmNotifyServer,
        request: DmNotifyRequest,
        response: DmNotifyResponse,
        dispatch: dispatch_dm_notify,
        handle: dm_notify_handle,
        register: register_dm_notify_server,
    }
    operations {
        /// Delivers `byte_count` bytes of packed change records.
        3 => ObjectsChanged = "ObjectsChanged" (ObjectsChangedRequest, ObjectsChangedResponse) objects_changed;
    }
    reserved {}
}
