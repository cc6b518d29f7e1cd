//! `IVolumeClient`: the disk management service interface, opnums 3..82.
//!
//! Most mutating operations take the target object's `last_known_state` so
//! the server can reject a request built from a stale view, and return a
//! [`TaskInfo`] describing the (possibly still running) task.

use crate::orpc::InterfacePointer;
use crate::types::{
    CountedString, DiskInfo, DiskSpec, DriveLetterInfo, FileSystemInfo, InstalledFileSystemInfo,
    LdmObjectId, MergeObjectInfo, RegionInfo, RegionSpec, TaskInfo, VolumeInfo, VolumeSpec,
};
use crate::HResult;

// ---------------------------------------------------------------------------
// Disks and partitions (opnums 3..=11)
// ---------------------------------------------------------------------------

operation_messages! {
    EnumDisks {
        request: EnumDisksRequest {},
        response: EnumDisksResponse {
            disk_count: u32,
            disk_list: Vec<DiskInfo>,
        } -> HResult
    }

    EnumDiskRegions {
        request: EnumDiskRegionsRequest {
            disk_id: LdmObjectId,
        },
        response: EnumDiskRegionsResponse {
            num_regions: u32,
            region_list: Vec<RegionInfo>,
        } -> HResult
    }

    CreatePartition {
        request: CreatePartitionRequest {
            partition_spec: RegionSpec,
        },
        response: CreatePartitionResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    CreatePartitionAssignAndFormat {
        request: CreatePartitionAssignAndFormatRequest {
            partition_spec: RegionSpec,
            letter: u16,
            letter_last_known_state: i64,
            fs_spec: FileSystemInfo,
            quick_format: bool,
        },
        response: CreatePartitionAssignAndFormatResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    CreatePartitionAssignAndFormatEx {
        request: CreatePartitionAssignAndFormatExRequest {
            partition_spec: RegionSpec,
            letter: u16,
            letter_last_known_state: i64,
            access_path: String,
            fs_spec: FileSystemInfo,
            quick_format: bool,
            options: u32,
        },
        response: CreatePartitionAssignAndFormatExResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    DeletePartition {
        request: DeletePartitionRequest {
            partition_id: LdmObjectId,
            partition_last_known_state: i64,
            force: bool,
        },
        response: DeletePartitionResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    WriteSignature {
        request: WriteSignatureRequest {
            disk_id: LdmObjectId,
            disk_last_known_state: i64,
        },
        response: WriteSignatureResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    MarkActivePartition {
        request: MarkActivePartitionRequest {
            region_id: LdmObjectId,
            region_last_known_state: i64,
        },
        response: MarkActivePartitionResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    /// Ejects removable media.
    Eject {
        request: EjectRequest {
            disk_id: LdmObjectId,
            disk_last_known_state: i64,
        },
        response: EjectResponse {
            tinfo: TaskInfo,
        } -> HResult
    }
}

// ---------------------------------------------------------------------------
// Fault-tolerant sets on basic disks (opnums 13..=20)
// ---------------------------------------------------------------------------

operation_messages! {
    FtEnumVolumes {
        request: FtEnumVolumesRequest {},
        response: FtEnumVolumesResponse {
            volume_count: u32,
            ft_volume_list: Vec<VolumeInfo>,
        } -> HResult
    }

    FtEnumLogicalDiskMembers {
        request: FtEnumLogicalDiskMembersRequest {
            volume_id: LdmObjectId,
        },
        response: FtEnumLogicalDiskMembersResponse {
            member_count: u32,
            member_list: Vec<LdmObjectId>,
        } -> HResult
    }

    FtDeleteVolume {
        request: FtDeleteVolumeRequest {
            volume_id: LdmObjectId,
            force: bool,
            volume_last_known_state: i64,
        },
        response: FtDeleteVolumeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    FtBreakMirror {
        request: FtBreakMirrorRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
            force: bool,
        },
        response: FtBreakMirrorResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    FtResyncMirror {
        request: FtResyncMirrorRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
        },
        response: FtResyncMirrorResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    FtRegenerateParityStripe {
        request: FtRegenerateParityStripeRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
        },
        response: FtRegenerateParityStripeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    FtReplaceMirrorPartition {
        request: FtReplaceMirrorPartitionRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
            old_member_id: LdmObjectId,
            old_member_last_known_state: i64,
            new_region_id: LdmObjectId,
            new_region_last_known_state: i64,
            flags: u32,
        },
        response: FtReplaceMirrorPartitionResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    FtReplaceParityStripePartition {
        request: FtReplaceParityStripePartitionRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
            old_member_id: LdmObjectId,
            old_member_last_known_state: i64,
            new_region_id: LdmObjectId,
            new_region_last_known_state: i64,
            flags: u32,
        },
        response: FtReplaceParityStripePartitionResponse {
            tinfo: TaskInfo,
        } -> HResult
    }
}

// ---------------------------------------------------------------------------
// Drive letters and file systems (opnums 21..=26)
// ---------------------------------------------------------------------------

operation_messages! {
    EnumDriveLetters {
        request: EnumDriveLettersRequest {},
        response: EnumDriveLettersResponse {
            drive_letter_count: u32,
            drive_letter_list: Vec<DriveLetterInfo>,
        } -> HResult
    }

    AssignDriveLetter {
        request: AssignDriveLetterRequest {
            letter: u16,
            force_option: u32,
            letter_last_known_state: i64,
            storage_id: LdmObjectId,
            storage_last_known_state: i64,
        },
        response: AssignDriveLetterResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    FreeDriveLetter {
        request: FreeDriveLetterRequest {
            letter: u16,
            letter_last_known_state: i64,
            storage_id: LdmObjectId,
            storage_last_known_state: i64,
            force_option: u32,
        },
        response: FreeDriveLetterResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    EnumLocalFileSystems {
        request: EnumLocalFileSystemsRequest {},
        response: EnumLocalFileSystemsResponse {
            file_system_count: u32,
            file_system_list: Vec<FileSystemInfo>,
        } -> HResult
    }

    GetInstalledFileSystems {
        request: GetInstalledFileSystemsRequest {},
        response: GetInstalledFileSystemsResponse {
            fs_count: u32,
            fs_list: Vec<InstalledFileSystemInfo>,
        } -> HResult
    }

    Format {
        request: FormatRequest {
            storage_id: LdmObjectId,
            fs_spec: FileSystemInfo,
            quick_format: bool,
            force: bool,
            storage_last_known_state: i64,
            letter: u16,
            letter_last_known_state: i64,
        },
        response: FormatResponse {
            tinfo: TaskInfo,
        } -> HResult
    }
}

// ---------------------------------------------------------------------------
// Dynamic volumes (opnums 28..=41)
// ---------------------------------------------------------------------------

operation_messages! {
    EnumVolumes {
        request: EnumVolumesRequest {},
        response: EnumVolumesResponse {
            volume_count: u32,
            volume_list: Vec<VolumeInfo>,
        } -> HResult
    }

    EnumVolumeMembers {
        request: EnumVolumeMembersRequest {
            volume_id: LdmObjectId,
        },
        response: EnumVolumeMembersResponse {
            member_count: u32,
            member_list: Vec<LdmObjectId>,
        } -> HResult
    }

    CreateVolume {
        request: CreateVolumeRequest {
            volume_spec: VolumeSpec,
            disk_count: u32,
            disk_list: Vec<DiskSpec>,
        },
        response: CreateVolumeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    CreateVolumeAssignAndFormat {
        request: CreateVolumeAssignAndFormatRequest {
            volume_spec: VolumeSpec,
            disk_count: u32,
            disk_list: Vec<DiskSpec>,
            letter: u16,
            letter_last_known_state: i64,
            fs_spec: FileSystemInfo,
            quick_format: bool,
        },
        response: CreateVolumeAssignAndFormatResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    CreateVolumeAssignAndFormatEx {
        request: CreateVolumeAssignAndFormatExRequest {
            volume_spec: VolumeSpec,
            disk_count: u32,
            disk_list: Vec<DiskSpec>,
            letter: u16,
            letter_last_known_state: i64,
            access_path: String,
            fs_spec: FileSystemInfo,
            quick_format: bool,
            options: u32,
        },
        response: CreateVolumeAssignAndFormatExResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    GetVolumeMountName {
        request: GetVolumeMountNameRequest {
            volume_id: LdmObjectId,
        },
        response: GetVolumeMountNameResponse {
            mount_name: String,
        } -> HResult
    }

    GrowVolume {
        request: GrowVolumeRequest {
            volume_id: LdmObjectId,
            volume_spec: VolumeSpec,
            disk_count: u32,
            disk_list: Vec<DiskSpec>,
            force: bool,
        },
        response: GrowVolumeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    DeleteVolume {
        request: DeleteVolumeRequest {
            volume_id: LdmObjectId,
            force: bool,
            volume_last_known_state: i64,
        },
        response: DeleteVolumeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    AddMirror {
        request: AddMirrorRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
            disk_spec: DiskSpec,
        },
        response: AddMirrorResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    RemoveMirror {
        request: RemoveMirrorRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
            disk_id: LdmObjectId,
            disk_last_known_state: i64,
        },
        response: RemoveMirrorResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    SplitMirror {
        request: SplitMirrorRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
            disk_id: LdmObjectId,
            disk_last_known_state: i64,
            letter: u16,
            letter_last_known_state: i64,
        },
        response: SplitMirrorResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    /// Converts a basic disk to a dynamic disk.
    InitializeDisk {
        request: InitializeDiskRequest {
            disk_id: LdmObjectId,
            disk_last_known_state: i64,
        },
        response: InitializeDiskResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    /// Converts a dynamic disk back to a basic disk.
    UninitializeDisk {
        request: UninitializeDiskRequest {
            disk_id: LdmObjectId,
            disk_last_known_state: i64,
        },
        response: UninitializeDiskResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    ReConnectDisk {
        request: ReConnectDiskRequest {
            disk_id: LdmObjectId,
        },
        response: ReConnectDiskResponse {
            tinfo: TaskInfo,
        } -> HResult
    }
}

// ---------------------------------------------------------------------------
// Disk groups and encapsulation (opnums 43..=58)
// ---------------------------------------------------------------------------

operation_messages! {
    ImportDiskGroup {
        request: ImportDiskGroupRequest {
            #[serde(rename = "dgid", with = "serde_bytes")]
            disk_group_id: Vec<u8>,
        },
        response: ImportDiskGroupResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    /// Reports which objects a merge of a foreign disk group would affect.
    DiskMergeQuery {
        request: DiskMergeQueryRequest {
            #[serde(rename = "dgid", with = "serde_bytes")]
            disk_group_id: Vec<u8>,
            num_disks: u32,
            disk_list: Vec<LdmObjectId>,
        },
        response: DiskMergeQueryResponse {
            merge_dg_id: LdmObjectId,
            merge_config_tid: i64,
            num_objects: u32,
            merge_objects: Vec<MergeObjectInfo>,
            flags: u32,
        } -> HResult
    }

    DiskMerge {
        request: DiskMergeRequest {
            #[serde(rename = "dgid", with = "serde_bytes")]
            disk_group_id: Vec<u8>,
            num_disks: u32,
            disk_list: Vec<LdmObjectId>,
            merge_dg_id: LdmObjectId,
            merge_config_tid: i64,
        },
        response: DiskMergeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    ReAttachDisk {
        request: ReAttachDiskRequest {
            disk_id: LdmObjectId,
            disk_last_known_state: i64,
        },
        response: ReAttachDiskResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    ReplaceRaid5Column {
        request: ReplaceRaid5ColumnRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
            new_disk_id: LdmObjectId,
            disk_last_known_state: i64,
        },
        response: ReplaceRaid5ColumnResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    RestartVolume {
        request: RestartVolumeRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
        },
        response: RestartVolumeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    /// Describes what converting the listed disks to dynamic would touch.
    GetEncapsulateDiskInfo {
        request: GetEncapsulateDiskInfoRequest {
            disk_count: u32,
            disk_spec_list: Vec<DiskSpec>,
        },
        response: GetEncapsulateDiskInfoResponse {
            encap_info_flags: u32,
            affected_disk_count: u32,
            affected_disk_list: Vec<DiskInfo>,
            affected_disk_flags: Vec<u32>,
            affected_volume_count: u32,
            affected_volume_list: Vec<VolumeInfo>,
            affected_region_count: u32,
            affected_region_list: Vec<RegionInfo>,
            tinfo: TaskInfo,
        } -> HResult
    }

    EncapsulateDisk {
        request: EncapsulateDiskRequest {
            affected_disk_count: u32,
            affected_disk_list: Vec<DiskInfo>,
            affected_volume_count: u32,
            affected_volume_list: Vec<VolumeInfo>,
            affected_region_count: u32,
            affected_region_list: Vec<RegionInfo>,
        },
        response: EncapsulateDiskResponse {
            encap_info_flags: u32,
            tinfo: TaskInfo,
        } -> HResult
    }

    QueryChangePartitionNumbers {
        request: QueryChangePartitionNumbersRequest {},
        response: QueryChangePartitionNumbersResponse {
            old_partition_number: i32,
            new_partition_number: i32,
        } -> HResult
    }

    DeletePartitionNumberInfoFromRegistry {
        request: DeletePartitionNumberInfoFromRegistryRequest {},
        response: DeletePartitionNumberInfoFromRegistryResponse {} -> HResult
    }

    SetDontShow {
        request: SetDontShowRequest {
            set_no_show: bool,
        },
        response: SetDontShowResponse {} -> HResult
    }

    GetDontShow {
        request: GetDontShowRequest {},
        response: GetDontShowResponse {
            get_no_show: bool,
        } -> HResult
    }
}

// ---------------------------------------------------------------------------
// Tasks, session and access paths (opnums 67..=81)
// ---------------------------------------------------------------------------

operation_messages! {
    EnumTasks {
        request: EnumTasksRequest {},
        response: EnumTasksResponse {
            task_count: u32,
            task_list: Vec<TaskInfo>,
        } -> HResult
    }

    GetTaskDetail {
        request: GetTaskDetailRequest {
            id: LdmObjectId,
        },
        response: GetTaskDetailResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    AbortTask {
        request: AbortTaskRequest {
            id: LdmObjectId,
        },
        response: AbortTaskResponse {} -> HResult
    }

    /// Fetches the insertion strings stored for a failed task's error code.
    HrGetErrorData {
        request: HrGetErrorDataRequest {
            hr_error: HResult,
            flags: u32,
        },
        response: HrGetErrorDataResponse {
            stored_flags: u32,
            string_count: i32,
            strings: Vec<String>,
        } -> HResult
    }

    /// Opens a session and registers the client's notification callback.
    Initialize {
        request: InitializeRequest {
            notify_interface: Option<InterfacePointer>,
        },
        response: InitializeResponse {
            idl_version: u32,
            flags: u32,
            client_id: LdmObjectId,
        } -> HResult
    }

    Uninitialize {
        request: UninitializeRequest {},
        response: UninitializeResponse {} -> HResult
    }

    Refresh {
        request: RefreshRequest {},
        response: RefreshResponse {} -> HResult
    }

    RescanDisks {
        request: RescanDisksRequest {},
        response: RescanDisksResponse {} -> HResult
    }

    RefreshFileSys {
        request: RefreshFileSysRequest {},
        response: RefreshFileSysResponse {} -> HResult
    }

    SecureSystemPartition {
        request: SecureSystemPartitionRequest {},
        response: SecureSystemPartitionResponse {} -> HResult
    }

    ShutDownSystem {
        request: ShutDownSystemRequest {},
        response: ShutDownSystemResponse {} -> HResult
    }

    EnumAccessPath {
        request: EnumAccessPathRequest {
            storage_id: LdmObjectId,
        },
        response: EnumAccessPathResponse {
            count: i32,
            paths: Vec<CountedString>,
        } -> HResult
    }

    EnumAccessPathForVolume {
        request: EnumAccessPathForVolumeRequest {
            volume_id: LdmObjectId,
        },
        response: EnumAccessPathForVolumeResponse {
            count: i32,
            paths: Vec<CountedString>,
        } -> HResult
    }

    AddAccessPath {
        request: AddAccessPathRequest {
            path: String,
            target_id: LdmObjectId,
        },
        response: AddAccessPathResponse {} -> HResult
    }

    DeleteAccessPath {
        request: DeleteAccessPathRequest {
            volume_id: LdmObjectId,
            path: String,
        },
        response: DeleteAccessPathResponse {} -> HResult
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RegionType, VolumeLayout};

    #[test]
    fn response_status_is_named_return() {
        let resp = AbortTaskResponse {
            return_value: HResult::LDM_E_OBJECT_NOT_FOUND,
            ..AbortTaskResponse::default()
        };
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["return"], HResult::LDM_E_OBJECT_NOT_FOUND.0);
        assert!(json.get("returnValue").is_none());
    }

    #[test]
    fn create_volume_request_msgpack_roundtrip() {
        let req = CreateVolumeRequest {
            volume_spec: VolumeSpec {
                layout: VolumeLayout::MIRROR,
                partition_type: RegionType::SUBDISK,
                length: 1 << 30,
                ..VolumeSpec::default()
            },
            disk_count: 2,
            disk_list: vec![
                DiskSpec {
                    disk_id: 11,
                    length: 1 << 30,
                    ..DiskSpec::default()
                },
                DiskSpec {
                    disk_id: 12,
                    length: 1 << 30,
                    need_contiguous: true,
                    ..DiskSpec::default()
                },
            ],
            ..CreateVolumeRequest::default()
        };
        let bytes = rmp_serde::to_vec_named(&req).expect("serialize");
        let decoded: CreateVolumeRequest = rmp_serde::from_slice(&bytes).expect("deserialize");
        assert_eq!(decoded, req);
    }

    #[test]
    fn disk_group_id_is_binary() {
        let req = ImportDiskGroupRequest {
            disk_group_id: vec![0xDE, 0xAD, 0xBE, 0xEF],
            ..ImportDiskGroupRequest::default()
        };
        let bytes = rmp_serde::to_vec_named(&req).expect("serialize");
        // bin8 marker followed by the length byte.
        let needle = [0xC4, 0x04, 0xDE, 0xAD, 0xBE, 0xEF];
        assert!(bytes.windows(needle.len()).any(|w| w == needle));
    }
}
