//! Filesystem identity resolution and loop-detection tracking.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use lntree_core::{FileIdentity, WalkError};

use crate::meta;

/// Resolve a path to its device/inode pair.
///
/// With `follow_symlinks` the identity of the final target is returned,
/// otherwise the entry itself (a symlink included) is identified. Fails
/// when the path does not exist or is inaccessible; the error is never
/// retried.
pub fn resolve_identity(
    path: impl AsRef<Path>,
    follow_symlinks: bool,
) -> Result<FileIdentity, WalkError> {
    let path = path.as_ref();
    let stat = if follow_symlinks {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    }
    .map_err(|e| WalkError::stat(path, e))?;

    Ok(FileIdentity::new(meta::device(&stat), meta::inode(&stat)))
}

/// Identities already visited during one chain resolution.
///
/// Scoped to a single `track_link` call; nothing is shared across
/// resolutions.
#[derive(Debug, Default)]
pub struct IdentitySet {
    seen: HashSet<FileIdentity>,
}

impl IdentitySet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an identity. Returns `true` if this is the first time
    /// seeing it.
    pub fn track(&mut self, identity: FileIdentity) -> bool {
        self.seen.insert(identity)
    }

    /// Check if an identity has been seen (without tracking).
    pub fn has_seen(&self, identity: &FileIdentity) -> bool {
        self.seen.contains(identity)
    }

    /// Get the number of unique identities tracked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if no identities have been tracked.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
