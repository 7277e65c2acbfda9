//! Cross-platform metadata accessors.

use std::fs::Metadata;

use lntree_core::{TimeSpec, Timestamps};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Get the device ID from metadata.
#[cfg(unix)]
pub(crate) fn device(meta: &Metadata) -> u64 {
    meta.dev()
}

#[cfg(not(unix))]
pub(crate) fn device(_meta: &Metadata) -> u64 {
    0
}

/// Get the inode number from metadata.
#[cfg(unix)]
pub(crate) fn inode(meta: &Metadata) -> u64 {
    meta.ino()
}

#[cfg(not(unix))]
pub(crate) fn inode(_meta: &Metadata) -> u64 {
    0
}

/// Get the raw mode word from metadata.
#[cfg(unix)]
pub(crate) fn mode(meta: &Metadata) -> u32 {
    meta.mode()
}

/// Synthesize file-type bits from the portable file type.
#[cfg(not(unix))]
pub(crate) fn mode(meta: &Metadata) -> u32 {
    let file_type = meta.file_type();
    if file_type.is_dir() {
        0o040_000
    } else if file_type.is_symlink() {
        0o120_000
    } else {
        0o100_000
    }
}

/// Get the number of hard links from metadata.
#[cfg(unix)]
pub(crate) fn nlink(meta: &Metadata) -> u64 {
    meta.nlink()
}

#[cfg(not(unix))]
pub(crate) fn nlink(_meta: &Metadata) -> u64 {
    1
}

/// Get the owning user ID from metadata.
#[cfg(unix)]
pub(crate) fn uid(meta: &Metadata) -> u32 {
    meta.uid()
}

#[cfg(not(unix))]
pub(crate) fn uid(_meta: &Metadata) -> u32 {
    0
}

/// Get the owning group ID from metadata.
#[cfg(unix)]
pub(crate) fn gid(meta: &Metadata) -> u32 {
    meta.gid()
}

#[cfg(not(unix))]
pub(crate) fn gid(_meta: &Metadata) -> u32 {
    0
}

/// Get access/modify/change timestamps from metadata.
#[cfg(unix)]
pub(crate) fn timestamps(meta: &Metadata) -> Timestamps {
    Timestamps {
        accessed: TimeSpec::new(meta.atime(), meta.atime_nsec()),
        modified: TimeSpec::new(meta.mtime(), meta.mtime_nsec()),
        changed: TimeSpec::new(meta.ctime(), meta.ctime_nsec()),
    }
}

/// Approximate timestamps from the portable accessors; status-change
/// time falls back to the modification time.
#[cfg(not(unix))]
pub(crate) fn timestamps(meta: &Metadata) -> Timestamps {
    fn spec(time: std::io::Result<std::time::SystemTime>) -> TimeSpec {
        match time
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        {
            Some(d) => TimeSpec::new(d.as_secs() as i64, d.subsec_nanos() as i64),
            None => TimeSpec::new(0, 0),
        }
    }

    Timestamps {
        accessed: spec(meta.accessed()),
        modified: spec(meta.modified()),
        changed: spec(meta.modified()),
    }
}
