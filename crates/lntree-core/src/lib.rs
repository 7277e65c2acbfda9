//! Core types for lntree.
//!
//! This crate provides the fundamental data structures shared by the
//! lntree ecosystem: classified file records, link chains, walk
//! configuration, and the walked-tree container.

mod chain;
mod config;
mod error;
mod record;
mod tree;

pub use chain::{LinkChain, LinkStatus};
pub use config::{AttrSelection, FollowLinks, SortOrder, WalkConfig, WalkConfigBuilder};
pub use error::{WalkError, WalkWarning, WarningKind};
pub use record::{
    FORMAT_MASK, FileIdentity, FileRecord, FormatSet, FormatTag, FsInfo, Ownership,
    PERMISSION_MASK, RecordFlag, TimeSpec, Timestamps, format_bits, is_symlink_mode,
    permission_bits,
};
pub use tree::{FileTree, TreeStats};
