//! File record and classification types.

use std::collections::BTreeSet;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::chain::LinkChain;

/// Mask selecting the file-type bits of a raw mode word.
pub const FORMAT_MASK: u32 = 0o170_000;
/// Mask selecting the permission bits of a raw mode word.
pub const PERMISSION_MASK: u32 = 0o7777;

const FMT_FIFO: u32 = 0o010_000;
const FMT_CHAR: u32 = 0o020_000;
const FMT_DIR: u32 = 0o040_000;
const FMT_BLOCK: u32 = 0o060_000;
const FMT_REGULAR: u32 = 0o100_000;
const FMT_SYMLINK: u32 = 0o120_000;
const FMT_SOCKET: u32 = 0o140_000;
const FMT_DOOR: u32 = 0o150_000;
// Solaris event ports and BSD whiteouts share this value on disjoint
// platforms.
const FMT_PORT_OR_WHITEOUT: u32 = 0o160_000;

/// Extract the file-type bits from a raw mode word.
pub fn format_bits(mode: u32) -> u32 {
    mode & FORMAT_MASK
}

/// Extract the permission bits from a raw mode word.
pub fn permission_bits(mode: u32) -> u32 {
    mode & PERMISSION_MASK
}

/// Check whether a raw mode word describes a symbolic link.
pub fn is_symlink_mode(mode: u32) -> bool {
    format_bits(mode) == FMT_SYMLINK
}

/// Unique identifier for a filesystem object, stable across the paths
/// and hard links that reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileIdentity {
    /// Device ID.
    pub device: u64,
    /// Inode number.
    pub inode: u64,
}

impl FileIdentity {
    /// Create a new identity from a device/inode pair.
    pub fn new(device: u64, inode: u64) -> Self {
        Self { device, inode }
    }
}

/// Classification facet of a filesystem entry.
///
/// An entry can carry several tags at once (a symlink to a directory is
/// both `lnk` and `slnk`); the tags are orthogonal facets, not a single
/// discriminated union.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FormatTag {
    /// Directory.
    #[serde(rename = "dir")]
    Directory,
    /// Character device.
    #[serde(rename = "chr")]
    CharDevice,
    /// Block device.
    #[serde(rename = "blk")]
    BlockDevice,
    /// Regular file.
    #[serde(rename = "reg")]
    Regular,
    /// FIFO (named pipe).
    #[serde(rename = "fifo")]
    Fifo,
    /// Socket.
    #[serde(rename = "sock")]
    Socket,
    /// Door (Solaris).
    #[serde(rename = "door")]
    Door,
    /// Event port (Solaris).
    #[serde(rename = "port")]
    Port,
    /// Whiteout (BSD).
    #[serde(rename = "wht")]
    Whiteout,
    /// Link of any kind.
    #[serde(rename = "lnk")]
    Link,
    /// Symbolic link.
    #[serde(rename = "slnk")]
    Symlink,
    /// Hard-link-like entry (best-effort, platform-dependent).
    #[serde(rename = "hlnk")]
    Hardlink,
    /// Entry that could not be inspected.
    #[serde(rename = "unknown")]
    Unknown,
}

/// Set of classification tags for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatSet(BTreeSet<FormatTag>);

impl FormatSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the tag set from the file-type bits of a raw mode word.
    ///
    /// Symbolic links carry no base tag here; link tags are assigned by
    /// the inspector from link-chain classification.
    pub fn from_file_mode(mode: u32) -> Self {
        let mut tags = Self::new();
        let tag = match format_bits(mode) {
            FMT_DIR => Some(FormatTag::Directory),
            FMT_CHAR => Some(FormatTag::CharDevice),
            FMT_BLOCK => Some(FormatTag::BlockDevice),
            FMT_REGULAR => Some(FormatTag::Regular),
            FMT_FIFO => Some(FormatTag::Fifo),
            FMT_SOCKET => Some(FormatTag::Socket),
            FMT_DOOR => Some(FormatTag::Door),
            FMT_PORT_OR_WHITEOUT => {
                if cfg!(any(target_os = "solaris", target_os = "illumos")) {
                    Some(FormatTag::Port)
                } else {
                    Some(FormatTag::Whiteout)
                }
            }
            _ => None,
        };
        if let Some(tag) = tag {
            tags.insert(tag);
        }
        tags
    }

    /// Insert a tag. Returns `true` if it was not already present.
    pub fn insert(&mut self, tag: FormatTag) -> bool {
        self.0.insert(tag)
    }

    /// Check whether a tag is present.
    pub fn contains(&self, tag: FormatTag) -> bool {
        self.0.contains(&tag)
    }

    /// Number of tags in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the tags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = FormatTag> + '_ {
        self.0.iter().copied()
    }
}

/// Per-record flag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RecordFlag {
    /// A followed link was cut short because it points at a directory
    /// already on the active traversal path.
    #[serde(rename = "recur")]
    Recur,
}

/// Filesystem identity attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsInfo {
    /// Device/inode pair.
    pub identity: FileIdentity,
    /// Number of hard links.
    pub nlink: u64,
}

/// Ownership attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    /// Owning user ID.
    pub uid: u32,
    /// Owning group ID.
    pub gid: u32,
}

/// One timestamp, split into whole seconds and a nanosecond part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpec {
    /// Seconds since the epoch.
    pub secs: i64,
    /// Nanosecond component.
    pub nanos: i64,
}

impl TimeSpec {
    /// Create a new timestamp.
    pub fn new(secs: i64, nanos: i64) -> Self {
        Self { secs, nanos }
    }
}

/// Access/modify/change timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// Last access time.
    pub accessed: TimeSpec,
    /// Last modification time.
    pub modified: TimeSpec,
    /// Last status-change time.
    pub changed: TimeSpec,
}

/// A single classified entry in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Entry name (final path component, not the full path).
    pub name: CompactString,

    /// Raw file-type bits of the mode word.
    pub format: u32,

    /// Classification tag set.
    pub tags: FormatSet,

    /// Per-record flags.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub flags: BTreeSet<RecordFlag>,

    /// Size in bytes, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Permission bits, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,

    /// Inode/device/link-count, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<FsInfo>,

    /// Ownership, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Ownership>,

    /// Timestamps, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Timestamps>,

    /// Resolved link chain, when requested and the entry is a link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkChain>,

    /// Children, present only for directories (or link-resolved
    /// directories) that were actually descended into. Insertion order
    /// is the listing/traversal order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileRecord>>,
}

impl FileRecord {
    /// Create a new record with the given classification.
    pub fn new(name: impl Into<CompactString>, format: u32, tags: FormatSet) -> Self {
        Self {
            name: name.into(),
            format,
            tags,
            flags: BTreeSet::new(),
            size: None,
            mode: None,
            fs: None,
            owner: None,
            times: None,
            link: None,
            children: None,
        }
    }

    /// Create a placeholder record for an entry that could not be
    /// inspected.
    pub fn unknown(name: impl Into<CompactString>) -> Self {
        let mut tags = FormatSet::new();
        tags.insert(FormatTag::Unknown);
        Self::new(name, 0, tags)
    }

    /// Check if this record is a directory.
    pub fn is_dir(&self) -> bool {
        self.tags.contains(FormatTag::Directory)
    }

    /// Check if this record is a link of any kind.
    pub fn is_link(&self) -> bool {
        self.tags.contains(FormatTag::Link)
    }

    /// Check if this record is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.tags.contains(FormatTag::Symlink)
    }

    /// Check if the record carries the recursion cut-off flag.
    pub fn is_recur(&self) -> bool {
        self.flags.contains(&RecordFlag::Recur)
    }

    /// Get the number of direct children (0 when not descended into).
    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }
}
