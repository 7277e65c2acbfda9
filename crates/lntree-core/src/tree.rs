//! Walked tree container and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::config::WalkConfig;
use crate::error::WalkWarning;
use crate::record::FileRecord;

/// Summary statistics for a walked tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Number of non-directory, non-link records.
    pub total_files: u64,
    /// Number of directory records (links to directories excluded).
    pub total_dirs: u64,
    /// Number of records classified as links of any kind.
    pub total_links: u64,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with one completed record.
    pub fn record(&mut self, record: &FileRecord) {
        if record.is_link() {
            self.total_links += 1;
        } else if record.is_dir() {
            self.total_dirs += 1;
        } else {
            self.total_files += 1;
        }
    }

    /// Total number of records seen.
    pub fn total_entries(&self) -> u64 {
        self.total_files + self.total_dirs + self.total_links
    }
}

/// Complete walked tree with metadata.
///
/// The root itself is an implicit container: `children` holds its
/// entries, and no record for the root exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTree {
    /// The root directory's entries, in traversal order.
    pub children: Vec<FileRecord>,

    /// Root path that was walked.
    pub root_path: PathBuf,

    /// When this walk was performed.
    pub walked_at: SystemTime,

    /// Duration of the walk.
    pub walk_duration: Duration,

    /// Walk configuration used.
    pub config: WalkConfig,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Non-fatal conditions encountered during the walk.
    pub warnings: Vec<WalkWarning>,
}

impl FileTree {
    /// Create a new file tree.
    pub fn new(
        children: Vec<FileRecord>,
        root_path: PathBuf,
        config: WalkConfig,
        stats: TreeStats,
        walk_duration: Duration,
        warnings: Vec<WalkWarning>,
    ) -> Self {
        Self {
            children,
            root_path,
            walked_at: SystemTime::now(),
            walk_duration,
            config,
            stats,
            warnings,
        }
    }

    /// Get the total number of file records.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Get the total number of directory records.
    pub fn total_dirs(&self) -> u64 {
        self.stats.total_dirs
    }

    /// Get the total number of link records.
    pub fn total_links(&self) -> u64 {
        self.stats.total_links
    }

    /// Check if there were any warnings during the walk.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
