//! Disk management domain descriptors.
//!
//! These are the records carried inside request and response payloads. The
//! dispatcher treats them as opaque; they exist so handlers work with typed
//! values. All structs use `#[serde(rename_all = "camelCase")]` so the
//! `MsgPack` field names match the protocol's structure member names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned identifier of a disk, region, volume, drive letter,
/// file system or task.
pub type LdmObjectId = i64;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Declares an open `u16` enumeration: a transparent newtype with named
/// constants. Values outside the named set are preserved, not rejected.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )* }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u16);

        impl $name {
            $( $(#[$vmeta])* pub const $variant: Self = Self($value); )*

            /// Constant name for a known value.
            #[must_use]
            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $( $value => Some(stringify!($variant)), )*
                    _ => None,
                }
            }
        }
    };
}

open_enum! {
    /// `REGIONTYPE`: what occupies a contiguous run of sectors on a disk.
    RegionType {
        UNKNOWN = 0,
        FREE = 1,
        EXTENDED_FREE = 2,
        PRIMARY = 3,
        LOGICAL = 4,
        EXTENDED = 5,
        SUBDISK = 6,
        CDROM = 7,
        REMOVABLE = 8,
    }
}

open_enum! {
    /// `VOLUMETYPE`
    VolumeType {
        UNKNOWN = 0,
        PRIMARY_PARTITION = 1,
        LOGICAL_DRIVE = 2,
        /// Fault-tolerant volume built from basic disk partitions.
        FT = 3,
        /// Dynamic-disk volume.
        VM = 4,
        CDROM = 5,
        REMOVABLE = 6,
    }
}

open_enum! {
    /// `VOLUMELAYOUT`
    VolumeLayout {
        UNKNOWN = 0,
        PARTITION = 1,
        SIMPLE = 2,
        SPANNED = 3,
        MIRROR = 4,
        STRIPE = 5,
        STRIPE_SET_WITH_PARITY = 6,
    }
}

open_enum! {
    /// `REQUEST_STATUS`: lifecycle of a long-running task.
    RequestStatus {
        UNKNOWN = 0,
        STARTED = 1,
        IN_PROGRESS = 2,
        COMPLETED = 3,
        ABORTED = 4,
        FAILED = 5,
    }
}

open_enum! {
    /// `REGIONSTATUS`
    RegionStatus {
        UNKNOWN = 0,
        OK = 1,
        FAILED = 2,
        FAILING = 3,
        REGENERATING = 4,
        NEEDS_RESYNC = 5,
    }
}

open_enum! {
    /// `VOLUMESTATUS`
    VolumeStatus {
        UNKNOWN = 0,
        HEALTHY = 1,
        FAILED = 2,
        FAILED_REDUNDANCY = 3,
        FAILING = 4,
        FAILING_REDUNDANCY = 5,
        FAILED_REDUNDANCY_FAILING = 6,
        SYNCHING = 7,
        REGENERATING = 8,
        INITIALIZING = 9,
        FORMATTING = 10,
    }
}

open_enum! {
    /// `PROGRESS_TYPE`
    ProgressType {
        UNKNOWN = 0,
        FORMAT = 1,
        SYNCHING = 2,
    }
}

open_enum! {
    /// `PARTITIONSTYLE`: how a disk's partition table is laid out.
    PartitionStyle {
        UNKNOWN = 0,
        MBR = 1,
        GPT = 2,
    }
}

// ---------------------------------------------------------------------------
// Specs (inputs)
// ---------------------------------------------------------------------------

/// `VOLUME_SPEC`: a volume to create.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSpec {
    #[serde(rename = "type")]
    pub volume_type: VolumeType,
    pub layout: VolumeLayout,
    pub partition_type: RegionType,
    /// Bytes; always a multiple of the sector size.
    pub length: i64,
    pub last_known_state: i64,
}

/// `DISK_SPEC`: space to take from one disk when creating or growing a volume.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskSpec {
    pub disk_id: LdmObjectId,
    pub length: i64,
    pub need_contiguous: bool,
    pub last_known_state: i64,
}

/// `REGION_SPEC`: a partition to create.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSpec {
    pub region_id: LdmObjectId,
    pub region_type: RegionType,
    pub disk_id: LdmObjectId,
    pub start: i64,
    pub length: i64,
    pub last_known_state: i64,
}

// ---------------------------------------------------------------------------
// Infos (outputs)
// ---------------------------------------------------------------------------

/// `DISK_INFO`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskInfo {
    pub id: LdmObjectId,
    pub length: i64,
    pub free_bytes: i64,
    pub bytes_per_track: u32,
    pub bytes_per_cylinder: u32,
    pub bytes_per_sector: u32,
    pub region_count: u32,
    #[serde(rename = "dflags")]
    pub disk_flags: u32,
    pub device_type: u32,
    pub device_state: u32,
    pub bus_type: u32,
    pub attributes: u32,
    pub is_upgradeable: bool,
    pub port_number: i32,
    pub target_number: i32,
    pub lun_number: i32,
    pub last_known_state: i64,
    pub task_id: LdmObjectId,
    pub name: String,
    pub vendor: String,
    #[serde(rename = "dgid", with = "serde_bytes")]
    pub disk_group_id: Vec<u8>,
    pub adapter_name: String,
    #[serde(rename = "dgName")]
    pub disk_group_name: String,
}

/// `REGION_INFO`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfo {
    pub id: LdmObjectId,
    pub disk_id: LdmObjectId,
    /// Volume the region belongs to, or 0.
    pub vol_id: LdmObjectId,
    /// File system on the region, or 0.
    pub fs_id: LdmObjectId,
    pub start: i64,
    pub length: i64,
    pub region_type: RegionType,
    pub partition_type: u32,
    pub is_active: bool,
    pub status: RegionStatus,
    pub last_known_state: i64,
    pub task_id: LdmObjectId,
    #[serde(rename = "rflags")]
    pub region_flags: u32,
    pub current_partition_number: u32,
}

/// Style-specific half of `DISK_INFO_EX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiskStyleInfo {
    Mbr { signature: u32 },
    #[serde(rename_all = "camelCase")]
    Gpt { disk_id: Uuid },
}

/// `DISK_INFO_EX`: [`DiskInfo`] extended with partition style data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskInfoEx {
    pub id: LdmObjectId,
    pub length: i64,
    pub free_bytes: i64,
    pub bytes_per_track: u32,
    pub bytes_per_cylinder: u32,
    pub bytes_per_sector: u32,
    pub region_count: u32,
    #[serde(rename = "dflags")]
    pub disk_flags: u32,
    pub device_type: u32,
    pub device_state: u32,
    pub bus_type: u32,
    pub attributes: u32,
    pub max_partition_count: u32,
    pub is_upgradeable: bool,
    pub may_switch_style: bool,
    pub partition_style: PartitionStyle,
    /// Absent when `partition_style` is `UNKNOWN`.
    pub style_info: Option<DiskStyleInfo>,
    pub port_number: i32,
    pub target_number: i32,
    pub lun_number: i32,
    pub last_known_state: i64,
    pub task_id: LdmObjectId,
    pub name: String,
    pub vendor: String,
    #[serde(rename = "dgid", with = "serde_bytes")]
    pub disk_group_id: Vec<u8>,
    pub adapter_name: String,
    #[serde(rename = "dgName")]
    pub disk_group_name: String,
    pub dev_inst_id: String,
}

/// Style-specific half of `REGION_INFO_EX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionStyleInfo {
    #[serde(rename_all = "camelCase")]
    Mbr { partition_type: u32, is_active: bool },
    #[serde(rename_all = "camelCase")]
    Gpt {
        partition_type: Uuid,
        partition_id: Uuid,
        attributes: u64,
    },
}

/// `REGION_INFO_EX`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfoEx {
    pub id: LdmObjectId,
    pub disk_id: LdmObjectId,
    pub vol_id: LdmObjectId,
    pub fs_id: LdmObjectId,
    pub start: i64,
    pub length: i64,
    pub region_type: RegionType,
    pub partition_style: PartitionStyle,
    pub style_info: Option<RegionStyleInfo>,
    pub status: RegionStatus,
    pub last_known_state: i64,
    pub task_id: LdmObjectId,
    #[serde(rename = "rflags")]
    pub region_flags: u32,
    pub current_partition_number: u32,
    pub name: String,
}

/// `VOLUME_INFO`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub id: LdmObjectId,
    #[serde(rename = "type")]
    pub volume_type: VolumeType,
    pub layout: VolumeLayout,
    pub length: i64,
    pub fs_id: LdmObjectId,
    pub member_count: u32,
    pub status: VolumeStatus,
    pub last_known_state: i64,
    pub task_id: LdmObjectId,
    #[serde(rename = "vflags")]
    pub volume_flags: u32,
}

/// `DRIVE_LETTER_INFO`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveLetterInfo {
    /// UTF-16 code unit of the letter, e.g. `'E' as u16`.
    pub letter: u16,
    /// Volume or partition the letter is assigned to, or 0 when free.
    pub storage_id: LdmObjectId,
    pub is_used: bool,
    pub last_known_state: i64,
    pub task_id: LdmObjectId,
    #[serde(rename = "dlflags")]
    pub drive_letter_flags: u32,
}

/// `FILE_SYSTEM_INFO`: also used as the format specification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemInfo {
    pub id: LdmObjectId,
    pub storage_id: LdmObjectId,
    pub total_allocation_units: i64,
    pub available_allocation_units: i64,
    pub allocation_unit_size: u32,
    pub fsflags: u32,
    pub last_known_state: i64,
    pub task_id: LdmObjectId,
    pub fs_type: i32,
    pub label: String,
}

/// `IFILE_SYSTEM_INFO`: a file system the server is able to format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledFileSystemInfo {
    pub fs_type: i32,
    pub fs_name: String,
    pub fs_flags: u32,
    pub fs_compression_flags: u32,
    pub label_limit: i32,
    /// Characters permitted in a volume label.
    pub label_char_set: String,
}

/// `TASK_INFO`: progress of a long-running operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub id: LdmObjectId,
    pub storage_id: LdmObjectId,
    pub create_time: i64,
    pub client_id: LdmObjectId,
    pub percent_complete: u32,
    pub status: RequestStatus,
    #[serde(rename = "type")]
    pub progress_type: ProgressType,
    pub error: i32,
    #[serde(rename = "tflag")]
    pub task_flag: u32,
}

/// `COUNTED_STRING`: an access path between two storage objects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountedString {
    pub source_id: LdmObjectId,
    pub target_id: LdmObjectId,
    #[serde(rename = "sstring")]
    pub string: String,
}

/// `MERGE_OBJECT_INFO`: an object affected by merging a foreign disk group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeObjectInfo {
    #[serde(rename = "type")]
    pub object_type: u32,
    pub flags: u32,
    pub layout: VolumeLayout,
    pub length: i64,
}
