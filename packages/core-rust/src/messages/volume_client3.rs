//! `IVolumeClient3`: the partition-style aware revision of `IVolumeClient`,
//! opnums 3..79.
//!
//! Only the operations whose arguments differ from `IVolumeClient` are
//! declared here. The rest reuse the shapes in
//! [`volume_client`](super::volume_client).

use crate::types::{
    DiskInfoEx, DiskSpec, LdmObjectId, PartitionStyle, RegionInfoEx, TaskInfo, VolumeInfo,
};
use crate::HResult;

// ---------------------------------------------------------------------------
// Disks and partitions
// ---------------------------------------------------------------------------

operation_messages! {
    EnumDisksEx {
        request: EnumDisksExRequest {},
        response: EnumDisksExResponse {
            disk_count: u32,
            disk_list: Vec<DiskInfoEx>,
        } -> HResult
    }

    EnumDiskRegionsEx {
        request: EnumDiskRegionsExRequest {
            disk_id: LdmObjectId,
            num_regions: u32,
        },
        response: EnumDiskRegionsExResponse {
            num_regions: u32,
            region_list: Vec<RegionInfoEx>,
        } -> HResult
    }

    /// Sets a disk's partition style and writes a fresh signature.
    InitializeDiskStyle {
        request: InitializeDiskStyleRequest {
            disk_id: LdmObjectId,
            style: PartitionStyle,
            disk_last_known_state: i64,
        },
        response: InitializeDiskStyleResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    CreatePartitionsForVolume {
        request: CreatePartitionsForVolumeRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
        },
        response: CreatePartitionsForVolumeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    DeletePartitionsForVolume {
        request: DeletePartitionsForVolumeRequest {
            volume_id: LdmObjectId,
            volume_last_known_state: i64,
        },
        response: DeletePartitionsForVolumeResponse {
            tinfo: TaskInfo,
        } -> HResult
    }

    /// Largest free extent on a disk after alignment adjustments, in bytes.
    GetMaxAdjustedFreeSpace {
        request: GetMaxAdjustedFreeSpaceRequest {
            disk_id: LdmObjectId,
        },
        response: GetMaxAdjustedFreeSpaceResponse {
            max_adjusted_free_space: i64,
        } -> HResult
    }

    InitializeDiskEx {
        request: InitializeDiskExRequest {
            disk_id: LdmObjectId,
            style: PartitionStyle,
            disk_last_known_state: i64,
        },
        response: InitializeDiskExResponse {
            tinfo: TaskInfo,
        } -> HResult
    }
}

// ---------------------------------------------------------------------------
// Encapsulation
// ---------------------------------------------------------------------------

operation_messages! {
    GetEncapsulateDiskInfoEx {
        request: GetEncapsulateDiskInfoExRequest {
            disk_count: u32,
            disk_spec_list: Vec<DiskSpec>,
        },
        response: GetEncapsulateDiskInfoExResponse {
            encap_info_flags: u32,
            affected_disk_count: u32,
            affected_disk_list: Vec<DiskInfoEx>,
            affected_disk_flags: Vec<u32>,
            affected_volume_count: u32,
            affected_volume_list: Vec<VolumeInfo>,
            affected_region_count: u32,
            affected_region_list: Vec<RegionInfoEx>,
            tinfo: TaskInfo,
        } -> HResult
    }

    /// Converts the listed basic disks to dynamic disks.
    EncapsulateDiskEx {
        request: EncapsulateDiskExRequest {
            affected_disk_count: u32,
            affected_disk_list: Vec<DiskInfoEx>,
            affected_volume_count: u32,
            affected_volume_list: Vec<VolumeInfo>,
            affected_region_count: u32,
            affected_region_list: Vec<RegionInfoEx>,
        },
        response: EncapsulateDiskExResponse {
            encap_info_flags: u32,
            tinfo: TaskInfo,
        } -> HResult
    }
}
