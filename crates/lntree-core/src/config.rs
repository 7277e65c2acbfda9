//! Walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Which optional attributes the inspector should attach to each
/// record. Every field is decided once at call time, never per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrSelection {
    /// Expose byte length.
    #[serde(default)]
    pub size: bool,

    /// Expose permission bits.
    #[serde(default)]
    pub mode: bool,

    /// Expose inode/device/link-count.
    #[serde(default)]
    pub fs: bool,

    /// Expose uid/gid.
    #[serde(default)]
    pub owner: bool,

    /// Expose access/modify/change times.
    #[serde(default)]
    pub times: bool,

    /// Resolve link chains and retain them on link records.
    #[serde(default)]
    pub link: bool,
}

impl AttrSelection {
    /// No attributes (classification only).
    pub fn none() -> Self {
        Self::default()
    }

    /// Every attribute.
    pub fn all() -> Self {
        Self {
            size: true,
            mode: true,
            fs: true,
            owner: true,
            times: true,
            link: true,
        }
    }

    /// The same selection with link resolution forced on.
    pub fn with_link(self) -> Self {
        Self { link: true, ..self }
    }
}

/// Which link kinds the walker follows into directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowLinks {
    /// Follow symbolic links.
    #[serde(default)]
    pub symbolic: bool,

    /// Follow hard-link-like entries (platform-dependent).
    #[serde(default)]
    pub hard: bool,
}

impl FollowLinks {
    /// Follow nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Follow symbolic links only.
    pub fn symbolic() -> Self {
        Self {
            symbolic: true,
            hard: false,
        }
    }

    /// Follow both kinds.
    pub fn all() -> Self {
        Self {
            symbolic: true,
            hard: true,
        }
    }

    /// Whether any kind is followed.
    pub fn any(&self) -> bool {
        self.symbolic || self.hard
    }
}

/// Ordering applied to each directory listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending by name.
    Ascending,
    /// Descending by name.
    Descending,
    /// Whatever order the directory listing returns.
    #[default]
    Unsorted,
}

/// Configuration for a tree walk.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Regular expression matched (unanchored) against the normalized
    /// full path of every entry; matches are skipped entirely.
    #[builder(default)]
    #[serde(default)]
    pub ignore: Option<String>,

    /// Link kinds to follow into directories.
    #[builder(default)]
    #[serde(default)]
    pub follow: FollowLinks,

    /// Directory listing order.
    #[builder(default)]
    #[serde(default)]
    pub sort: SortOrder,

    /// Attributes to attach to each record.
    #[builder(default)]
    #[serde(default)]
    pub attrs: AttrSelection,
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a simple config for walking a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: None,
            follow: FollowLinks::none(),
            sort: SortOrder::Unsorted,
            attrs: AttrSelection::none(),
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = WalkConfig::builder()
            .root("/home/user")
            .follow(FollowLinks::symbolic())
            .sort(SortOrder::Ascending)
            .ignore("node_modules".to_string())
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(config.follow.symbolic);
        assert!(!config.follow.hard);
        assert_eq!(config.sort, SortOrder::Ascending);
        assert_eq!(config.ignore.as_deref(), Some("node_modules"));
    }

    #[test]
    fn test_config_simple() {
        let config = WalkConfig::new("/home/user");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(config.ignore.is_none());
        assert!(!config.follow.any());
        assert_eq!(config.sort, SortOrder::Unsorted);
        assert_eq!(config.attrs, AttrSelection::none());
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(WalkConfig::builder().build().is_err());
        assert!(WalkConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_attr_selection() {
        let all = AttrSelection::all();
        assert!(all.size && all.mode && all.fs && all.owner && all.times && all.link);

        let none = AttrSelection::none();
        assert!(!none.size && !none.link);

        let forced = none.with_link();
        assert!(forced.link);
        assert!(!forced.size);
    }

    #[test]
    fn test_follow_links() {
        assert!(!FollowLinks::none().any());
        assert!(FollowLinks::symbolic().any());
        assert!(FollowLinks::all().hard);
    }
}
