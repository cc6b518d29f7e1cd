//! `IVolumeClient3`: `IVolumeClient` reworked for partition styles, opnums 3..79.
//!
//! Operations that kept their `IVolumeClient` arguments share its message
//! shapes; the style-aware ones (`EnumDisksEx`, `InitializeDiskEx`, ...)
//! come from [`dmrp_core::messages::volume_client3`].

use dmrp_core::SyntaxId;
#[allow(clippy::wildcard_imports)]
use dmrp_core::messages::volume_client::*;
#[allow(clippy::wildcard_imports)]
use dmrp_core::messages::volume_client3::*;

use super::unknown::{
    dispatch_unknown, UnimplementedUnknownServer, UnknownRequest, UnknownResponse, UnknownServer,
    UNKNOWN,
};
use crate::delegate_unknown_server;

pub const VOLUME_CLIENT3_SYNTAX_V0_0: SyntaxId =
    SyntaxId::from_u128(0x1356_98D2_3A37_4D26_99DF_E2BB_6AE3_AC61, 0, 0);

crate::define_interface! {
    /// Server side of `IVolumeClient3`.
    interface "IVolumeClient3" {
        syntax: VOLUME_CLIENT3_SYNTAX_V0_0,
        def: VOLUME_CLIENT3,
        base: {
            def: UNKNOWN,
            server: UnknownServer,
            unimplemented: UnimplementedUnknownServer,
            request: UnknownRequest,
            response: UnknownResponse,
            dispatch: dispatch_unknown,
            delegate: delegate_unknown_server,
        },
        server: VolumeClient3Server,
        unimplemented: UnimplementedVolumeClient3Server,
        request: VolumeClient3Request,
        response: VolumeClient3Response,
        dispatch: dispatch_volume_client3,
        handle: volume_client3_handle,
        register: register_volume_client3_server,
    }
    operations {
        /// Lists every disk with its partition style.
        3 => EnumDisksEx = "EnumDisksEx" (EnumDisksExRequest, EnumDisksExResponse) enum_disks_ex;
        4 => EnumDiskRegionsEx = "EnumDiskRegionsEx" (EnumDiskRegionsExRequest, EnumDiskRegionsExResponse) enum_disk_regions_ex;
        5 => CreatePartition = "CreatePartition" (CreatePartitionRequest, CreatePartitionResponse) create_partition;
        6 => CreatePartitionAssignAndFormat = "CreatePartitionAssignAndFormat" (CreatePartitionAssignAndFormatRequest, CreatePartitionAssignAndFormatResponse) create_partition_assign_and_format;
        7 => CreatePartitionAssignAndFormatEx = "CreatePartitionAssignAndFormatEx" (CreatePartitionAssignAndFormatExRequest, CreatePartitionAssignAndFormatExResponse) create_partition_assign_and_format_ex;
        8 => DeletePartition = "DeletePartition" (DeletePartitionRequest, DeletePartitionResponse) delete_partition;
        9 => InitializeDiskStyle = "InitializeDiskStyle" (InitializeDiskStyleRequest, InitializeDiskStyleResponse) initialize_disk_style;
        10 => MarkActivePartition = "MarkActivePartition" (MarkActivePartitionRequest, MarkActivePartitionResponse) mark_active_partition;
        11 => Eject = "Eject" (EjectRequest, EjectResponse) eject;
        13 => FtEnumVolumes = "FTEnumVolumes" (FtEnumVolumesRequest, FtEnumVolumesResponse) ft_enum_volumes;
        14 => FtEnumLogicalDiskMembers = "FTEnumLogicalDiskMembers" (FtEnumLogicalDiskMembersRequest, FtEnumLogicalDiskMembersResponse) ft_enum_logical_disk_members;
        15 => FtDeleteVolume = "FTDeleteVolume" (FtDeleteVolumeRequest, FtDeleteVolumeResponse) ft_delete_volume;
        16 => FtBreakMirror = "FTBreakMirror" (FtBreakMirrorRequest, FtBreakMirrorResponse) ft_break_mirror;
        17 => FtResyncMirror = "FTResyncMirror" (FtResyncMirrorRequest, FtResyncMirrorResponse) ft_resync_mirror;
        18 => FtRegenerateParityStripe = "FTRegenerateParityStripe" (FtRegenerateParityStripeRequest, FtRegenerateParityStripeResponse) ft_regenerate_parity_stripe;
        19 => FtReplaceMirrorPartition = "FTReplaceMirrorPartition" (FtReplaceMirrorPartitionRequest, FtReplaceMirrorPartitionResponse) ft_replace_mirror_partition;
        20 => FtReplaceParityStripePartition = "FTReplaceParityStripePartition" (FtReplaceParityStripePartitionRequest, FtReplaceParityStripePartitionResponse) ft_replace_parity_stripe_partition;
        21 => EnumDriveLetters = "EnumDriveLetters" (EnumDriveLettersRequest, EnumDriveLettersResponse) enum_drive_letters;
        22 => AssignDriveLetter = "AssignDriveLetter" (AssignDriveLetterRequest, AssignDriveLetterResponse) assign_drive_letter;
        23 => FreeDriveLetter = "FreeDriveLetter" (FreeDriveLetterRequest, FreeDriveLetterResponse) free_drive_letter;
        24 => EnumLocalFileSystems = "EnumLocalFileSystems" (EnumLocalFileSystemsRequest, EnumLocalFileSystemsResponse) enum_local_file_systems;
        25 => GetInstalledFileSystems = "GetInstalledFileSystems" (GetInstalledFileSystemsRequest, GetInstalledFileSystemsResponse) get_installed_file_systems;
        26 => Format = "Format" (FormatRequest, FormatResponse) format;
        27 => EnumVolumes = "EnumVolumes" (EnumVolumesRequest, EnumVolumesResponse) enum_volumes;
        28 => EnumVolumeMembers = "EnumVolumeMembers" (EnumVolumeMembersRequest, EnumVolumeMembersResponse) enum_volume_members;
        29 => CreateVolume = "CreateVolume" (CreateVolumeRequest, CreateVolumeResponse) create_volume;
        30 => CreateVolumeAssignAndFormat = "CreateVolumeAssignAndFormat" (CreateVolumeAssignAndFormatRequest, CreateVolumeAssignAndFormatResponse) create_volume_assign_and_format;
        31 => CreateVolumeAssignAndFormatEx = "CreateVolumeAssignAndFormatEx" (CreateVolumeAssignAndFormatExRequest, CreateVolumeAssignAndFormatExResponse) create_volume_assign_and_format_ex;
        32 => GetVolumeMountName = "GetVolumeMountName" (GetVolumeMountNameRequest, GetVolumeMountNameResponse) get_volume_mount_name;
        33 => GrowVolume = "GrowVolume" (GrowVolumeRequest, GrowVolumeResponse) grow_volume;
        34 => DeleteVolume = "DeleteVolume" (DeleteVolumeRequest, DeleteVolumeResponse) delete_volume;
        35 => CreatePartitionsForVolume = "CreatePartitionsForVolume" (CreatePartitionsForVolumeRequest, CreatePartitionsForVolumeResponse) create_partitions_for_volume;
        36 => DeletePartitionsForVolume = "DeletePartitionsForVolume" (DeletePartitionsForVolumeRequest, DeletePartitionsForVolumeResponse) delete_partitions_for_volume;
        37 => GetMaxAdjustedFreeSpace = "GetMaxAdjustedFreeSpace" (GetMaxAdjustedFreeSpaceRequest, GetMaxAdjustedFreeSpaceResponse) get_max_adjusted_free_space;
        38 => AddMirror = "AddMirror" (AddMirrorRequest, AddMirrorResponse) add_mirror;
        39 => RemoveMirror = "RemoveMirror" (RemoveMirrorRequest, RemoveMirrorResponse) remove_mirror;
        40 => SplitMirror = "SplitMirror" (SplitMirrorRequest, SplitMirrorResponse) split_mirror;
        /// Brings a disk under volume manager control with the requested style.
        41 => InitializeDiskEx = "InitializeDiskEx" (InitializeDiskExRequest, InitializeDiskExResponse) initialize_disk_ex;
        42 => UninitializeDisk = "UninitializeDisk" (UninitializeDiskRequest, UninitializeDiskResponse) uninitialize_disk;
        43 => ReConnectDisk = "ReConnectDisk" (ReConnectDiskRequest, ReConnectDiskResponse) re_connect_disk;
        44 => ImportDiskGroup = "ImportDiskGroup" (ImportDiskGroupRequest, ImportDiskGroupResponse) import_disk_group;
        45 => DiskMergeQuery = "DiskMergeQuery" (DiskMergeQueryRequest, DiskMergeQueryResponse) disk_merge_query;
        46 => DiskMerge = "DiskMerge" (DiskMergeRequest, DiskMergeResponse) disk_merge;
        47 => ReAttachDisk = "ReAttachDisk" (ReAttachDiskRequest, ReAttachDiskResponse) re_attach_disk;
        48 => ReplaceRaid5Column = "ReplaceRaid5Column" (ReplaceRaid5ColumnRequest, ReplaceRaid5ColumnResponse) replace_raid5_column;
        49 => RestartVolume = "RestartVolume" (RestartVolumeRequest, RestartVolumeResponse) restart_volume;
        50 => GetEncapsulateDiskInfoEx = "GetEncapsulateDiskInfoEx" (GetEncapsulateDiskInfoExRequest, GetEncapsulateDiskInfoExResponse) get_encapsulate_disk_info_ex;
        51 => EncapsulateDiskEx = "EncapsulateDiskEx" (EncapsulateDiskExRequest, EncapsulateDiskExResponse) encapsulate_disk_ex;
        52 => QueryChangePartitionNumbers = "QueryChangePartitionNumbers" (QueryChangePartitionNumbersRequest, QueryChangePartitionNumbersResponse) query_change_partition_numbers;
        53 => DeletePartitionNumberInfoFromRegistry = "DeletePartitionNumberInfoFromRegistry" (DeletePartitionNumberInfoFromRegistryRequest, DeletePartitionNumberInfoFromRegistryResponse) delete_partition_number_info_from_registry;
        54 => SetDontShow = "SetDontShow" (SetDontShowRequest, SetDontShowResponse) set_dont_show;
        55 => GetDontShow = "GetDontShow" (GetDontShowRequest, GetDontShowResponse) get_dont_show;
        64 => EnumTasks = "EnumTasks" (EnumTasksRequest, EnumTasksResponse) enum_tasks;
        65 => GetTaskDetail = "GetTaskDetail" (GetTaskDetailRequest, GetTaskDetailResponse) get_task_detail;
        66 => AbortTask = "AbortTask" (AbortTaskRequest, AbortTaskResponse) abort_task;
        67 => HrGetErrorData = "HrGetErrorData" (HrGetErrorDataRequest, HrGetErrorDataResponse) hr_get_error_data;
        68 => Initialize = "Initialize" (InitializeRequest, InitializeResponse) initialize;
        69 => Uninitialize = "Uninitialize" (UninitializeRequest, UninitializeResponse) uninitialize;
        70 => Refresh = "Refresh" (RefreshRequest, RefreshResponse) refresh;
        71 => RescanDisks = "RescanDisks" (RescanDisksRequest, RescanDisksResponse) rescan_disks;
        72 => RefreshFileSys = "RefreshFileSys" (RefreshFileSysRequest, RefreshFileSysResponse) refresh_file_sys;
        73 => SecureSystemPartition = "SecureSystemPartition" (SecureSystemPartitionRequest, SecureSystemPartitionResponse) secure_system_partition;
        74 => ShutDownSystem = "ShutDownSystem" (ShutDownSystemRequest, ShutDownSystemResponse) shut_down_system;
        75 => EnumAccessPath = "EnumAccessPath" (EnumAccessPathRequest, EnumAccessPathResponse) enum_access_path;
        76 => EnumAccessPathForVolume = "EnumAccessPathForVolume" (EnumAccessPathForVolumeRequest, EnumAccessPathForVolumeResponse) enum_access_path_for_volume;
        77 => AddAccessPath = "AddAccessPath" (AddAccessPathRequest, AddAccessPathResponse) add_access_path;
        78 => DeleteAccessPath = "DeleteAccessPath" (DeleteAccessPathRequest, DeleteAccessPathResponse) delete_access_path;
    }
    reserved {
        12 => "Reserved_Opnum12";
        56 => "Reserved0";
        57 => "Reserved1";
        58 => "Reserved2";
        59 => "Reserved3";
        60 => "Reserved4";
        61 => "Reserved5";
        62 => "Reserved6";
        63 => "Reserved7";
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;
    use dmrp_core::types::{DiskInfoEx, DiskStyleInfo, PartitionStyle};
    use dmrp_core::{HResult, MsgPackCodec, WireCodec};
    use parking_lot::Mutex;
    use uuid::Uuid;

    use super::*;
    use crate::dispatch::{
        CallContext, Dynamic, DynamicHandler, Lookup, OpResult, OperationError, WireMessage,
    };
    use crate::interfaces::test_support::default_payload;

    const RESERVED: [u32; 9] = [12, 56, 57, 58, 59, 60, 61, 62, 63];

    /// Reports a single GPT disk and remembers the opnums it served.
    #[derive(Default)]
    struct GptDisks {
        calls: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl DynamicHandler<UnknownRequest, UnknownResponse> for GptDisks {
        async fn handle(
            &self,
            _ctx: &CallContext,
            _request: UnknownRequest,
        ) -> OpResult<UnknownResponse> {
            Err(OperationError::NotImplemented.into())
        }
    }

    #[async_trait]
    impl DynamicHandler<VolumeClient3Request, VolumeClient3Response> for GptDisks {
        async fn handle(
            &self,
            _ctx: &CallContext,
            request: VolumeClient3Request,
        ) -> OpResult<VolumeClient3Response> {
            let opnum = request.opnum();
            self.calls.lock().push(opnum);
            match request {
                VolumeClient3Request::EnumDisksEx(_) => {
                    Ok(VolumeClient3Response::EnumDisksEx(EnumDisksExResponse {
                        disk_count: 1,
                        disk_list: vec![DiskInfoEx {
                            id: 1,
                            partition_style: PartitionStyle::GPT,
                            style_info: Some(DiskStyleInfo::Gpt {
                                disk_id: Uuid::from_u128(0xA1),
                            }),
                            max_partition_count: 128,
                            ..DiskInfoEx::default()
                        }],
                        ..EnumDisksExResponse::default()
                    }))
                }
                VolumeClient3Request::GetMaxAdjustedFreeSpace(req) if req.disk_id != 1 => {
                    Err(OperationError::Status(HResult::LDM_E_OBJECT_NOT_FOUND).into())
                }
                _ => Ok(VolumeClient3Response::default_for(opnum).expect("shape")),
            }
        }
    }

    fn ctx() -> CallContext {
        CallContext::new(1, 30_000)
    }

    #[test]
    fn table_pins_the_reserved_gaps() {
        VOLUME_CLIENT3.validate().expect("IVolumeClient3 table");
        assert_eq!(VOLUME_CLIENT3.base_opnums(), 3);
        assert_eq!(VOLUME_CLIENT3.opnum_end(), 79);
        assert_eq!(VOLUME_CLIENT3.ops.operations().count(), 67);

        let reserved: Vec<u32> = VOLUME_CLIENT3.ops.reserved().map(|s| s.opnum).collect();
        assert_eq!(reserved, RESERVED);
        for opnum in RESERVED {
            assert!(VolumeClient3Request::default_for(opnum).is_none(), "opnum {opnum}");
        }
    }

    #[test]
    fn shifted_opnums_keep_their_names() {
        let name = |opnum| match VOLUME_CLIENT3.ops.lookup(opnum) {
            Lookup::Operation(slot) => Some(slot.name),
            _ => None,
        };
        assert_eq!(name(9), Some("InitializeDiskStyle"));
        assert_eq!(name(27), Some("EnumVolumes"));
        assert_eq!(name(41), Some("InitializeDiskEx"));
        assert_eq!(name(64), Some("EnumTasks"));
        assert_eq!(name(78), Some("DeleteAccessPath"));
    }

    #[tokio::test]
    async fn enum_disks_ex_reports_the_partition_style() {
        let server = Dynamic(GptDisks::default());
        let mut reader = default_payload::<VolumeClient3Request>(3);

        let mut bytes = dispatch_volume_client3(&ctx(), &server, &MsgPackCodec, 3, &mut reader)
            .await
            .expect("dispatch")
            .expect("payload");
        let resp: EnumDisksExResponse = MsgPackCodec.read_value(&mut bytes).expect("decode");
        assert_eq!(resp.disk_list[0].partition_style, PartitionStyle::GPT);
        assert_eq!(
            resp.disk_list[0].style_info,
            Some(DiskStyleInfo::Gpt {
                disk_id: Uuid::from_u128(0xA1)
            })
        );
        assert_eq!(*server.inner().calls.lock(), vec![3]);
    }

    #[tokio::test]
    async fn status_failure_carries_no_payload() {
        let server = Dynamic(GptDisks::default());
        let mut reader = VolumeClient3Request::GetMaxAdjustedFreeSpace(
            GetMaxAdjustedFreeSpaceRequest {
                disk_id: 4,
                ..GetMaxAdjustedFreeSpaceRequest::default()
            },
        )
        .encode(&MsgPackCodec)
        .expect("encode");

        let fault = dispatch_volume_client3(&ctx(), &server, &MsgPackCodec, 37, &mut reader)
            .await
            .unwrap_err();
        assert!(fault.payload.is_none());
        assert_eq!(
            fault.error.operation_error().map(OperationError::hresult),
            Some(HResult::LDM_E_OBJECT_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn default_handler_rejects_every_live_opnum() {
        let handle = volume_client3_handle(
            Arc::new(UnimplementedVolumeClient3Server::default()),
            MsgPackCodec,
        );
        for opnum in 0..=85 {
            let payload = if opnum < 3 {
                default_payload::<UnknownRequest>(opnum)
            } else {
                default_payload::<VolumeClient3Request>(opnum)
            };
            let result = handle(ctx(), opnum, payload).await;

            let live = opnum < 3 || VolumeClient3Request::default_for(opnum).is_some();
            if live {
                let fault = result.unwrap_err();
                assert!(fault.error.is_not_implemented(), "opnum {opnum}");
            } else {
                assert!(matches!(result, Ok(None)), "opnum {opnum}");
            }
        }
    }

    #[tokio::test]
    async fn reserved_opnums_skip_the_handler() {
        let server = Dynamic(GptDisks::default());
        for opnum in RESERVED {
            let mut reader = Bytes::from_static(b"\x90");
            let result =
                dispatch_volume_client3(&ctx(), &server, &MsgPackCodec, opnum, &mut reader).await;
            assert!(matches!(result, Ok(None)), "opnum {opnum}");
        }
        assert!(server.inner().calls.lock().is_empty());
    }
}
