//! Iterative link-aware tree walker.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use regex::Regex;

use lntree_core::{
    AttrSelection, FileRecord, FileTree, FormatTag, LinkStatus, RecordFlag, SortOrder,
    TreeStats, WalkConfig, WalkError, WalkWarning, WarningKind,
};

use crate::inspect::get_file;
use crate::paths::{absolutize, normalize};

/// Link-aware directory walker.
///
/// Traversal is iterative over an explicit work list, so arbitrarily
/// deep trees never exhaust the call stack. Sibling directories are
/// processed in last-in-first-out order; within one directory the
/// listing order (optionally sorted) is preserved.
#[derive(Debug, Default)]
pub struct Walker;

/// One pending directory: the child list to fill (addressed by its
/// index path from the tree root) and the directory's lexical path.
struct WorkItem {
    slot: Vec<usize>,
    path: PathBuf,
    abs: PathBuf,
}

/// Immutable per-walk inputs.
struct WalkContext<'a> {
    config: &'a WalkConfig,
    need: AttrSelection,
    ignore: Option<Regex>,
}

/// Accumulated walk output other than the tree itself.
struct WalkLog {
    stats: TreeStats,
    warnings: Vec<WalkWarning>,
}

enum Descent {
    /// Allocate a child list and queue the directory.
    Into,
    /// Followed link pointing back at the active path: flag and stop.
    Recur,
    /// Nothing to descend into.
    Leaf,
}

impl Walker {
    /// Create a new walker.
    pub fn new() -> Self {
        Self
    }

    /// Walk the configured root and assemble the classified tree.
    ///
    /// The root itself is an implicit container: it is never matched
    /// against the ignore pattern and never appears as a record. A stat
    /// or listing failure on the root is fatal; the same failures on
    /// entries further down are recorded as warnings (with an `unknown`
    /// placeholder record for stat failures) and the walk continues.
    pub fn walk(&self, config: &WalkConfig) -> Result<FileTree, WalkError> {
        let start = Instant::now();

        let ignore = config
            .ignore
            .as_ref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| WalkError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .transpose()?;

        let root = normalize(&config.root);
        let root_stat = fs::metadata(&root).map_err(|e| WalkError::stat(&root, e))?;
        if !root_stat.is_dir() {
            return Err(WalkError::NotADirectory { path: root });
        }
        let root_abs = absolutize(&root).map_err(|e| WalkError::stat(&root, e))?;

        tracing::debug!(root = %root.display(), "starting walk");

        let ctx = WalkContext {
            config,
            need: config.attrs.with_link(),
            ignore,
        };
        let mut log = WalkLog {
            stats: TreeStats::new(),
            warnings: Vec::new(),
        };
        let mut children: Vec<FileRecord> = Vec::new();
        let mut work = vec![WorkItem {
            slot: Vec::new(),
            path: root.clone(),
            abs: root_abs,
        }];

        while let Some(item) = work.pop() {
            let names = match list_names(&item.path, config.sort) {
                Ok(names) => names,
                Err(err) => {
                    if item.slot.is_empty() {
                        return Err(WalkError::list(&item.path, err));
                    }
                    tracing::warn!(
                        path = %item.path.display(),
                        error = %err,
                        "directory listing failed, continuing"
                    );
                    log.warnings.push(WalkWarning::list(&item.path, &err));
                    continue;
                }
            };

            let siblings = child_list(&mut children, &item.slot);
            for name in names {
                if let Some(next) = self.visit_entry(&ctx, &item, &name, siblings, &mut log) {
                    work.push(next);
                }
            }
        }

        let tree = FileTree::new(
            children,
            root,
            config.clone(),
            log.stats,
            start.elapsed(),
            log.warnings,
        );
        tracing::debug!(
            entries = tree.stats.total_entries(),
            warnings = tree.warnings.len(),
            "walk finished"
        );
        Ok(tree)
    }

    /// Classify one directory entry, append its record, and return the
    /// work item for its children when it is descended into.
    fn visit_entry(
        &self,
        ctx: &WalkContext<'_>,
        item: &WorkItem,
        name: &OsStr,
        siblings: &mut Vec<FileRecord>,
        log: &mut WalkLog,
    ) -> Option<WorkItem> {
        let path = item.path.join(name);
        if let Some(ignore) = &ctx.ignore {
            if ignore.is_match(&normalize(&path).to_string_lossy()) {
                return None;
            }
        }

        let mut record = match get_file(&path, &ctx.need) {
            Ok(record) => record,
            Err(err) => {
                // The entry was listed but cannot be inspected (deleted
                // in between, or unreadable): record and move on.
                tracing::warn!(path = %path.display(), error = %err, "entry stat failed, continuing");
                log.warnings
                    .push(WalkWarning::new(&path, err.to_string(), WarningKind::Stat));
                let record = FileRecord::unknown(name.to_string_lossy().as_ref());
                log.stats.record(&record);
                siblings.push(record);
                return None;
            }
        };

        let descend = match self.decide_descent(ctx.config, &record, &item.abs) {
            Descent::Into => {
                record.children = Some(Vec::new());
                true
            }
            Descent::Recur => {
                record.flags.insert(RecordFlag::Recur);
                false
            }
            Descent::Leaf => false,
        };

        if !ctx.config.attrs.link {
            record.link = None;
        }

        log.stats.record(&record);
        let index = siblings.len();
        siblings.push(record);

        descend.then(|| {
            let mut slot = item.slot.clone();
            slot.push(index);
            WorkItem {
                slot,
                path,
                abs: item.abs.join(name),
            }
        })
    }

    /// Decide whether to walk into an entry.
    fn decide_descent(
        &self,
        config: &WalkConfig,
        record: &FileRecord,
        parent_abs: &Path,
    ) -> Descent {
        let followed_kind = (record.tags.contains(FormatTag::Symlink) && config.follow.symbolic)
            || (record.tags.contains(FormatTag::Hardlink) && config.follow.hard);

        if followed_kind {
            if let Some(chain) = &record.link {
                if chain.status == LinkStatus::Success {
                    let target = normalize(chain.final_abs());
                    let target_is_dir = record.is_dir()
                        || fs::metadata(&target).map(|m| m.is_dir()).unwrap_or(false);
                    if target_is_dir {
                        // The sole cycle-breaking rule: never follow a
                        // link back into a directory on the active path.
                        return if parent_abs.starts_with(&target) {
                            Descent::Recur
                        } else {
                            Descent::Into
                        };
                    }
                }
            }
            Descent::Leaf
        } else if record.is_dir() && !record.is_link() {
            Descent::Into
        } else {
            Descent::Leaf
        }
    }
}

/// List a directory's entry names in the configured order.
fn list_names(dir: &Path, sort: SortOrder) -> std::io::Result<Vec<std::ffi::OsString>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name());
    }
    match sort {
        SortOrder::Ascending => names.sort(),
        SortOrder::Descending => {
            names.sort();
            names.reverse();
        }
        SortOrder::Unsorted => {}
    }
    Ok(names)
}

/// Navigate an index path to the child list it denotes.
fn child_list<'a>(roots: &'a mut Vec<FileRecord>, slot: &[usize]) -> &'a mut Vec<FileRecord> {
    let mut list = roots;
    for &index in slot {
        list = list[index]
            .children
            .as_mut()
            .expect("work items only reference records that were given a child list");
    }
    list
}
