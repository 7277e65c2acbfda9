//! Link-aware traversal engine for lntree.
//!
//! This crate builds an in-memory, classified representation of a
//! filesystem subtree. Key pieces:
//!
//! - **Identity resolution** — device/inode pairs for loop detection
//! - **Link tracking** — iterative chain resolution with broken/loop
//!   detection
//! - **Inspection** — per-path classification with opt-in attributes
//! - **Walking** — an iterative tree walker that can follow links into
//!   directories without ever recursing through one back onto the
//!   active path
//!
//! Everything is synchronous and single-threaded; directory listing,
//! stat, and link-target reads are the only blocking points.
//!
//! # Example
//!
//! ```rust,no_run
//! use lntree_walk::{FollowLinks, SortOrder, WalkConfig, Walker};
//!
//! let config = WalkConfig::builder()
//!     .root("/path/to/walk")
//!     .follow(FollowLinks::symbolic())
//!     .sort(SortOrder::Ascending)
//!     .build()
//!     .unwrap();
//!
//! let tree = Walker::new().walk(&config).unwrap();
//! println!("{} entries", tree.stats.total_entries());
//! ```
//!
//! # Standalone inspection
//!
//! The walker's building blocks are usable on their own:
//!
//! ```rust,no_run
//! use lntree_walk::{AttrSelection, get_file, track_link};
//!
//! let record = get_file("/etc/hostname", &AttrSelection::all()).unwrap();
//! let chain = track_link("/etc/localtime").unwrap();
//! println!("{:?} resolves in {} hops", record.tags, chain.hops());
//! ```

mod identity;
mod inspect;
mod link;
mod meta;
mod paths;
mod walker;

pub use identity::{IdentitySet, resolve_identity};
pub use inspect::get_file;
pub use link::track_link;
pub use walker::Walker;

// Re-export core types for convenience
pub use lntree_core::{
    AttrSelection, FileIdentity, FileRecord, FileTree, FollowLinks, FormatSet, FormatTag,
    LinkChain, LinkStatus, RecordFlag, SortOrder, TreeStats, WalkConfig, WalkError,
    WalkWarning, WarningKind,
};
