//! `IVolumeClient`: the disk management service, opnums 3..82.

use dmrp_core::SyntaxId;
#[allow(clippy::wildcard_imports)]
use dmrp_core::messages::volume_client::*;

use super::unknown::{
    dispatch_unknown, UnimplementedUnknownServer, UnknownRequest, UnknownResponse, UnknownServer,
    UNKNOWN,
};
use crate::delegate_unknown_server;

pub const VOLUME_CLIENT_SYNTAX_V0_0: SyntaxId =
    SyntaxId::from_u128(0xD2D7_9DF5_3400_11D0_B40B_00AA_005F_F586, 0, 0);

crate::define_interface! {
    /// Server side of `IVolumeClient`.
    ///
    /// Mutating operations return a `TaskInfo`; long-running work continues
    /// after the call returns and is observed through `enum_tasks` and
    /// `get_task_detail`.
    interface "IVolumeClient" {
        syntax: VOLUME_CLIENT_SYNTAX_V0_0,
        def: VOLUME_CLIENT,
        base: {
            def: UNKNOWN,
            server: UnknownServer,
            unimplemented: UnimplementedUnknownServer,
            request: UnknownRequest,
            response: UnknownResponse,
            dispatch: dispatch_unknown,
            delegate: delegate_unknown_server,
        },
        server: VolumeClientServer,
        unimplemented: UnimplementedVolumeClientServer,
        request: VolumeClientRequest,
        response: VolumeClientResponse,
        dispatch: dispatch_volume_client,
        handle: volume_client_handle,
        register: register_volume_client_server,
    }
    operations {
        /// Lists every disk the server manages.
        3 => EnumDisks = "EnumDisks" (EnumDisksRequest, EnumDisksResponse) enum_disks;
        /// Lists the regions (partitions, subdisks, free space) of one disk.
        4 => EnumDiskRegions = "EnumDiskRegions" (EnumDiskRegionsRequest, EnumDiskRegionsResponse) enum_disk_regions;
        5 => CreatePartition = "CreatePartition" (CreatePartitionRequest, CreatePartitionResponse) create_partition;
        6 => CreatePartitionAssignAndFormat = "CreatePartitionAssignAndFormat" (CreatePartitionAssignAndFormatRequest, CreatePartitionAssignAndFormatResponse) create_partition_assign_and_format;
        7 => CreatePartitionAssignAndFormatEx = "CreatePartitionAssignAndFormatEx" (CreatePartitionAssignAndFormatExRequest, CreatePartitionAssignAndFormatExResponse) create_partition_assign_and_format_ex;
        8 => DeletePartition = "DeletePartition" (DeletePartitionRequest, DeletePartitionResponse) delete_partition;
        9 => WriteSignature = "WriteSignature" (WriteSignatureRequest, WriteSignatureResponse) write_signature;
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
        /// Formats a volume or partition with the given file system.
        26 => Format = "Format" (FormatRequest, FormatResponse) format;
        28 => EnumVolumes = "EnumVolumes" (EnumVolumesRequest, EnumVolumesResponse) enum_volumes;
        29 => EnumVolumeMembers = "EnumVolumeMembers" (EnumVolumeMembersRequest, EnumVolumeMembersResponse) enum_volume_members;
        30 => CreateVolume = "CreateVolume" (CreateVolumeRequest, CreateVolumeResponse) create_volume;
        31 => CreateVolumeAssignAndFormat = "CreateVolumeAssignAndFormat" (CreateVolumeAssignAndFormatRequest, CreateVolumeAssignAndFormatResponse) create_volume_assign_and_format;
        32 => CreateVolumeAssignAndFormatEx = "CreateVolumeAssignAndFormatEx" (CreateVolumeAssignAndFormatExRequest, CreateVolumeAssignAndFormatExResponse) create_volume_assign_and_format_ex;
        33 => GetVolumeMountName = "GetVolumeMountName" (GetVolumeMountNameRequest, GetVolumeMountNameResponse) get_volume_mount_name;
        34 => GrowVolume = "GrowVolume" (GrowVolumeRequest, GrowVolumeResponse) grow_volume;
        35 => DeleteVolume = "DeleteVolume" (DeleteVolumeRequest, DeleteVolumeResponse) delete_volume;
        36 => AddMirror = "AddMirror" (AddMirrorRequest, AddMirrorResponse) add_mirror;
        37 => RemoveMirror = "RemoveMirror" (RemoveMirrorRequest, RemoveMirrorResponse) remove_mirror;
        38 => SplitMirror = "SplitMirror" (SplitMirrorRequest, SplitMirrorResponse) split_mirror;
        39 => InitializeDisk = "InitializeDisk" (InitializeDiskRequest, InitializeDiskResponse) initialize_disk;
        40 => UninitializeDisk = "UninitializeDisk" (UninitializeDiskRequest, UninitializeDiskResponse) uninitialize_disk;
        41 => ReConnectDisk = "ReConnectDisk" (ReConnectDiskRequest, ReConnectDiskResponse) re_connect_disk;
        43 => ImportDiskGroup = "ImportDiskGroup" (ImportDiskGroupRequest, ImportDiskGroupResponse) import_disk_group;
        44 => DiskMergeQuery = "DiskMergeQuery" (DiskMergeQueryRequest, DiskMergeQueryResponse) disk_merge_query;
        45 => DiskMerge = "DiskMerge" (DiskMergeRequest, DiskMergeResponse) disk_merge;
        47 => ReAttachDisk = "ReAttachDisk" (ReAttachDiskRequest, ReAttachDiskResponse) re_attach_disk;
        51 => ReplaceRaid5Column = "ReplaceRaid5Column" (ReplaceRaid5ColumnRequest, ReplaceRaid5ColumnResponse) replace_raid5_column;
        52 => RestartVolume = "RestartVolume" (RestartVolumeRequest, RestartVolumeResponse) restart_volume;
        53 => GetEncapsulateDiskInfo = "GetEncapsulateDiskInfo" (GetEncapsulateDiskInfoRequest, GetEncapsulateDiskInfoResponse) get_encapsulate_disk_info;
        54 => EncapsulateDisk = "EncapsulateDisk" (EncapsulateDiskRequest, EncapsulateDiskResponse) encapsulate_disk;
        55 => QueryChangePartitionNumbers = "QueryChangePartitionNumbers" (QueryChangePartitionNumbersRequest, QueryChangePartitionNumbersResponse) query_change_partition_numbers;
        56 => DeletePartitionNumberInfoFromRegistry = "DeletePartitionNumberInfoFromRegistry" (DeletePartitionNumberInfoFromRegistryRequest, DeletePartitionNumberInfoFromRegistryResponse) delete_partition_number_info_from_registry;
        57 => SetDontShow = "SetDontShow" (SetDontShowRequest, SetDontShowResponse) set_dont_show;
        58 => GetDontShow = "GetDontShow" (GetDontShowRequest, GetDontShowResponse) get_dont_show;
        67 => EnumTasks = "EnumTasks" (EnumTasksRequest, EnumTasksResponse) enum_tasks;
        68 => GetTaskDetail = "GetTaskDetail" (GetTaskDetailRequest, GetTaskDetailResponse) get_task_detail;
        /// Requests cancellation of a running task.
        69 => AbortTask = "AbortTask" (AbortTaskRequest, AbortTaskResponse) abort_task;
        70 => HrGetErrorData = "HrGetErrorData" (HrGetErrorDataRequest, HrGetErrorDataResponse) hr_get_error_data;
        /// Opens a management session and registers the client's `IDMNotify` callback.
        71 => Initialize = "Initialize" (InitializeRequest, InitializeResponse) initialize;
        /// Closes the session opened by `initialize`.
        72 => Uninitialize = "Uninitialize" (UninitializeRequest, UninitializeResponse) uninitialize;
        /// Re-reads the configuration of all storage objects.
        73 => Refresh = "Refresh" (RefreshRequest, RefreshResponse) refresh;
        74 => RescanDisks = "RescanDisks" (RescanDisksRequest, RescanDisksResponse) rescan_disks;
        75 => RefreshFileSys = "RefreshFileSys" (RefreshFileSysRequest, RefreshFileSysResponse) refresh_file_sys;
        76 => SecureSystemPartition = "SecureSystemPartition" (SecureSystemPartitionRequest, SecureSystemPartitionResponse) secure_system_partition;
        77 => ShutDownSystem = "ShutDownSystem" (ShutDownSystemRequest, ShutDownSystemResponse) shut_down_system;
        78 => EnumAccessPath = "EnumAccessPath" (EnumAccessPathRequest, EnumAccessPathResponse) enum_access_path;
        79 => EnumAccessPathForVolume = "EnumAccessPathForVolume" (EnumAccessPathForVolumeRequest, EnumAccessPathForVolumeResponse) enum_access_path_for_volume;
        80 => AddAccessPath = "AddAccessPath" (AddAccessPathRequest, AddAccessPathResponse) add_access_path;
        81 => DeleteAccessPath = "DeleteAccessPath" (DeleteAccessPathRequest, DeleteAccessPathResponse) delete_access_path;
    }
    reserved {
        12 => "Reserved_Opnum12";
        27 => "Reserved27";
        42 => "Reserved_Opnum42";
        46 => "Reserved_Opnum46";
        48 => "Reserved_Opnum48";
        49 => "Reserved_Opnum49";
        50 => "Reserved_Opnum50";
        59 => "Reserved0";
        60 => "Reserved1";
        61 => "Reserved2";
        62 => "Reserved3";
        63 => "Reserved4";
        64 => "Reserved5";
        65 => "Reserved6";
        66 => "Reserved7";
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;
    use dmrp_core::messages::unknown::{AddRefRequest, AddRefResponse};
    use dmrp_core::types::DiskInfo;
    use dmrp_core::{HResult, MsgPackCodec, WireCodec};
    use parking_lot::Mutex;
    use proptest::prelude::*;

    use super::*;
    use crate::dispatch::{
        CallContext, DispatchError, Dynamic, DynamicHandler, Fault, OpResult, OperationError,
        WireMessage,
    };
    use crate::interfaces::test_support::{default_payload, summarize};

    const RESERVED: [u32; 15] = [12, 27, 42, 46, 48, 49, 50, 59, 60, 61, 62, 63, 64, 65, 66];

    /// Records every opnum it handles and answers with default responses,
    /// except `EnumDisks` which reports two disks.
    #[derive(Default)]
    struct Spy {
        calls: Mutex<Vec<u32>>,
        mismatch: bool,
    }

    #[async_trait]
    impl DynamicHandler<UnknownRequest, UnknownResponse> for Spy {
        async fn handle(
            &self,
            _ctx: &CallContext,
            request: UnknownRequest,
        ) -> OpResult<UnknownResponse> {
            self.calls.lock().push(request.opnum());
            match request {
                UnknownRequest::AddRef(_) => Ok(UnknownResponse::AddRef(AddRefResponse {
                    return_value: 5,
                    ..AddRefResponse::default()
                })),
                other => Err(Fault::with_response(
                    UnknownResponse::default_for(other.opnum()).expect("shape"),
                    OperationError::Status(HResult::E_NOINTERFACE),
                )),
            }
        }
    }

    #[async_trait]
    impl DynamicHandler<VolumeClientRequest, VolumeClientResponse> for Spy {
        async fn handle(
            &self,
            _ctx: &CallContext,
            request: VolumeClientRequest,
        ) -> OpResult<VolumeClientResponse> {
            let opnum = request.opnum();
            self.calls.lock().push(opnum);
            if self.mismatch {
                return Ok(VolumeClientResponse::Refresh(RefreshResponse::default()));
            }
            match request {
                VolumeClientRequest::EnumDisks(_) => Ok(VolumeClientResponse::EnumDisks(
                    EnumDisksResponse {
                        disk_count: 2,
                        disk_list: vec![disk(1, "Disk 0"), disk(2, "Disk 1")],
                        ..EnumDisksResponse::default()
                    },
                )),
                _ => Ok(VolumeClientResponse::default_for(opnum).expect("shape")),
            }
        }
    }

    fn disk(id: i64, name: &str) -> DiskInfo {
        DiskInfo {
            id,
            name: name.to_owned(),
            bytes_per_sector: 512,
            ..DiskInfo::default()
        }
    }

    fn ctx() -> CallContext {
        CallContext::new(1, 30_000)
    }

    async fn call<S: VolumeClientServer + ?Sized>(
        server: &S,
        opnum: u32,
        mut reader: Bytes,
    ) -> (crate::dispatch::DispatchResult, Bytes) {
        let result = dispatch_volume_client(&ctx(), server, &MsgPackCodec, opnum, &mut reader).await;
        (result, reader)
    }

    // -----------------------------------------------------------------------
    // Table
    // -----------------------------------------------------------------------

    #[test]
    fn table_matches_the_published_layout() {
        VOLUME_CLIENT.validate().expect("IVolumeClient table");
        assert_eq!(VOLUME_CLIENT.base_opnums(), 3);
        assert_eq!(VOLUME_CLIENT.opnum_end(), 82);
        assert_eq!(VOLUME_CLIENT.ops.operations().count(), 64);

        let reserved: Vec<u32> = VOLUME_CLIENT.ops.reserved().map(|s| s.opnum).collect();
        assert_eq!(reserved, RESERVED);
    }

    #[test]
    fn every_live_slot_has_request_and_response_shapes() {
        for slot in VOLUME_CLIENT.ops.operations() {
            let req = VolumeClientRequest::default_for(slot.opnum).expect("request shape");
            let resp = VolumeClientResponse::default_for(slot.opnum).expect("response shape");
            assert_eq!(req.opnum(), slot.opnum);
            assert_eq!(resp.opnum(), slot.opnum);
        }
        for opnum in RESERVED {
            assert!(VolumeClientRequest::default_for(opnum).is_none(), "opnum {opnum}");
        }
    }

    proptest! {
        #[test]
        fn enum_disks_response_survives_the_codec(
            ids in proptest::collection::vec(any::<i64>(), 0..8),
            status in any::<i32>(),
        ) {
            let resp = VolumeClientResponse::EnumDisks(EnumDisksResponse {
                disk_count: u32::try_from(ids.len()).unwrap(),
                disk_list: ids.iter().map(|&id| disk(id, "d")).collect(),
                return_value: HResult(status),
                ..EnumDisksResponse::default()
            });
            let mut bytes = resp.encode(&MsgPackCodec).unwrap();
            let decoded = VolumeClientResponse::decode(&MsgPackCodec, 3, &mut bytes).unwrap();
            prop_assert_eq!(decoded, Some(resp));
        }
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn enum_disks_reports_both_disks() {
        let spy = Dynamic(Spy::default());
        let (result, _) = call(&spy, 3, default_payload::<VolumeClientRequest>(3)).await;

        let mut bytes = result.expect("dispatch").expect("payload");
        let resp: EnumDisksResponse = MsgPackCodec.read_value(&mut bytes).expect("decode");
        assert_eq!(resp.disk_count, 2);
        assert_eq!(resp.disk_list[1].name, "Disk 1");
        assert_eq!(resp.return_value, HResult::S_OK);
        assert_eq!(*spy.inner().calls.lock(), vec![3]);
    }

    #[tokio::test]
    async fn reserved_opnums_never_reach_the_handler() {
        let spy = Dynamic(Spy::default());
        for opnum in RESERVED {
            let (result, _) = call(&spy, opnum, Bytes::from_static(b"\x90")).await;
            assert!(matches!(result, Ok(None)), "opnum {opnum}");
        }
        assert!(spy.inner().calls.lock().is_empty());
    }

    #[tokio::test]
    async fn opnums_past_the_table_are_empty() {
        let spy = Dynamic(Spy::default());
        for opnum in [82, 83, 200, u32::MAX] {
            let (result, _) = call(&spy, opnum, Bytes::new()).await;
            assert!(matches!(result, Ok(None)), "opnum {opnum}");
        }
        assert!(spy.inner().calls.lock().is_empty());
    }

    #[tokio::test]
    async fn base_opnums_match_standalone_iunknown_dispatch() {
        for opnum in 0..3 {
            let payload = default_payload::<UnknownRequest>(opnum);
            let mut trailing = payload.to_vec();
            trailing.extend_from_slice(&[0xC0, 0xC0]);

            let derived = Dynamic(Spy::default());
            let (derived_result, derived_rest) =
                call(&derived, opnum, Bytes::from(trailing.clone())).await;

            let standalone = Dynamic(Spy::default());
            let mut reader = Bytes::from(trailing);
            let standalone_result =
                dispatch_unknown(&ctx(), &standalone, &MsgPackCodec, opnum, &mut reader).await;

            assert_eq!(summarize(derived_result), summarize(standalone_result), "opnum {opnum}");
            assert_eq!(derived_rest, reader, "opnum {opnum}");
            assert_eq!(derived_rest.len(), 2);
            assert_eq!(*derived.inner().calls.lock(), vec![opnum]);
        }
    }

    #[tokio::test]
    async fn default_handler_rejects_every_live_opnum() {
        let server = UnimplementedVolumeClientServer::default();
        for opnum in 0..=90 {
            let payload = if opnum < 3 {
                default_payload::<UnknownRequest>(opnum)
            } else {
                default_payload::<VolumeClientRequest>(opnum)
            };
            let (result, _) = call(&server, opnum, payload).await;

            let live = opnum < 3 || VolumeClientRequest::default_for(opnum).is_some();
            if live {
                let fault = result.unwrap_err();
                assert!(fault.error.is_not_implemented(), "opnum {opnum}");
                assert_eq!(
                    fault.error.operation_error().map(OperationError::hresult),
                    Some(HResult::E_NOTIMPL)
                );
            } else {
                assert!(matches!(result, Ok(None)), "opnum {opnum}");
            }
        }
    }

    #[tokio::test]
    async fn malformed_payload_aborts_the_call() {
        let spy = Dynamic(Spy::default());
        let (result, _) = call(&spy, 35, Bytes::from_static(&[0xC1, 0x00])).await;

        let fault = result.unwrap_err();
        assert!(fault.payload.is_none());
        assert!(matches!(
            fault.error,
            DispatchError::Malformed { interface: "IVolumeClient", opnum: 35, .. }
        ));
        assert!(spy.inner().calls.lock().is_empty());
    }

    #[tokio::test]
    async fn mismatched_dynamic_response_fails_the_call() {
        let spy = Dynamic(Spy {
            mismatch: true,
            ..Spy::default()
        });
        let (result, _) = call(&spy, 68, default_payload::<VolumeClientRequest>(68)).await;

        let fault = result.unwrap_err();
        assert!(fault.payload.is_none());
        assert!(matches!(
            fault.error.operation_error(),
            Some(OperationError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn failed_base_call_still_returns_the_status_payload() {
        let spy = Dynamic(Spy::default());
        let (result, _) = call(&spy, 0, default_payload::<UnknownRequest>(0)).await;

        let fault = result.unwrap_err();
        assert!(fault.payload.is_some());
        assert_eq!(
            fault.error.operation_error().map(OperationError::hresult),
            Some(HResult::E_NOINTERFACE)
        );
    }

    #[tokio::test]
    async fn concurrent_calls_match_sequential_dispatch() {
        let spy = Arc::new(Dynamic(Spy::default()));
        let handle = volume_client_handle(Arc::clone(&spy), MsgPackCodec);
        let opnums: Vec<u32> = (0..82).collect();

        let mut expected = Vec::new();
        for &opnum in &opnums {
            let payload = if opnum < 3 {
                default_payload::<UnknownRequest>(opnum)
            } else {
                default_payload::<VolumeClientRequest>(opnum)
            };
            let (result, _) = call(spy.as_ref(), opnum, payload).await;
            expected.push(summarize(result));
        }

        let tasks: Vec<_> = opnums
            .iter()
            .map(|&opnum| {
                let handle = Arc::clone(&handle);
                let payload = if opnum < 3 {
                    default_payload::<UnknownRequest>(opnum)
                } else {
                    default_payload::<VolumeClientRequest>(opnum)
                };
                tokio::spawn(async move {
                    summarize(handle(CallContext::new(u64::from(opnum), 30_000), opnum, payload).await)
                })
            })
            .collect();

        for (task, expected) in tasks.into_iter().zip(expected) {
            assert_eq!(task.await.expect("join"), expected);
        }
        assert_eq!(spy.inner().calls.lock().len(), 2 * (3 + 64));
    }

    #[tokio::test]
    async fn calls_on_separate_handlers_match_sequential_dispatch() {
        let opnums: Vec<u32> = (0..82).collect();
        let payload = |opnum: u32| {
            if opnum < 3 {
                default_payload::<UnknownRequest>(opnum)
            } else {
                default_payload::<VolumeClientRequest>(opnum)
            }
        };

        let mut expected = Vec::new();
        for &opnum in &opnums {
            let spy = Dynamic(Spy::default());
            let (result, _) = call(&spy, opnum, payload(opnum)).await;
            expected.push(summarize(result));
        }

        let tasks: Vec<_> = opnums
            .iter()
            .map(|&opnum| {
                let spy = Arc::new(Dynamic(Spy::default()));
                let handle = volume_client_handle(Arc::clone(&spy), MsgPackCodec);
                let payload = payload(opnum);
                tokio::spawn(async move {
                    let result =
                        handle(CallContext::new(u64::from(opnum), 30_000), opnum, payload).await;
                    let calls = spy.inner().calls.lock().clone();
                    (summarize(result), calls)
                })
            })
            .collect();

        for ((task, expected), &opnum) in tasks.into_iter().zip(expected).zip(&opnums) {
            let (summary, calls) = task.await.expect("join");
            assert_eq!(summary, expected, "opnum {opnum}");
            let live = opnum < 3 || VolumeClientRequest::default_for(opnum).is_some();
            let want: Vec<u32> = if live { vec![opnum] } else { Vec::new() };
            assert_eq!(calls, want, "opnum {opnum}");
        }
    }

    #[tokio::test]
    async fn add_ref_through_handle_uses_base_server() {
        let handle = volume_client_handle(Arc::new(Dynamic(Spy::default())), MsgPackCodec);
        let payload = UnknownRequest::AddRef(AddRefRequest::default())
            .encode(&MsgPackCodec)
            .expect("encode");

        let mut bytes = handle(ctx(), 1, payload)
            .await
            .expect("dispatch")
            .expect("payload");
        let resp: AddRefResponse = MsgPackCodec.read_value(&mut bytes).expect("decode");
        assert_eq!(resp.return_value, 5);
    }
}
