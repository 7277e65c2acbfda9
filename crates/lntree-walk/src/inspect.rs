//! Single-path inspection.

use std::fs;
use std::path::Path;

use compact_str::CompactString;

use lntree_core::{
    AttrSelection, FileIdentity, FileRecord, FormatSet, FormatTag, FsInfo, Ownership,
    WalkError, format_bits, is_symlink_mode, permission_bits,
};

use crate::link::track_link;
use crate::meta;
use crate::paths::normalize;

/// Inspect a single path without following its final link.
///
/// The record's tag set is derived from the raw mode bits; the optional
/// attribute fields are attached only when selected in `attrs`. When
/// `attrs.link` is set the full link chain is resolved and retained on
/// link records; otherwise a cheap `read_link` probe classifies links
/// without resolving the chain.
pub fn get_file(path: impl AsRef<Path>, attrs: &AttrSelection) -> Result<FileRecord, WalkError> {
    let path = path.as_ref();
    let stat = fs::symlink_metadata(path).map_err(|e| WalkError::stat(path, e))?;
    let mode = meta::mode(&stat);

    let normalized = normalize(path);
    let name = normalized
        .file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(normalized.to_string_lossy()));

    let mut record = FileRecord::new(name, format_bits(mode), FormatSet::from_file_mode(mode));

    if attrs.size {
        record.size = Some(stat.len());
    }
    if attrs.mode {
        record.mode = Some(permission_bits(mode));
    }
    if attrs.fs {
        record.fs = Some(FsInfo {
            identity: FileIdentity::new(meta::device(&stat), meta::inode(&stat)),
            nlink: meta::nlink(&stat),
        });
    }
    if attrs.owner {
        record.owner = Some(Ownership {
            uid: meta::uid(&stat),
            gid: meta::gid(&stat),
        });
    }
    if attrs.times {
        record.times = Some(meta::timestamps(&stat));
    }

    if attrs.link {
        let chain = track_link(path)?;
        if chain.is_link() {
            record.tags.insert(FormatTag::Link);
            record.tags.insert(link_kind(mode));
            record.link = Some(chain);
        }
    } else if fs::read_link(path).is_ok() {
        // Cheap classification: the target read succeeding is enough to
        // know this is a link, without resolving the chain.
        record.tags.insert(FormatTag::Link);
        record.tags.insert(link_kind(mode));
    }

    Ok(record)
}

/// Symbolic links are recognized by the mode bit; anything else that
/// exposes a readable link target is reported as hard-link-like. This
/// is a best-effort facet, not a guarantee.
fn link_kind(mode: u32) -> FormatTag {
    if is_symlink_mode(mode) {
        FormatTag::Symlink
    } else {
        FormatTag::Hardlink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lntree_core::LinkStatus;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_regular_file_classification() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "hello").unwrap();

        let record = get_file(&file, &AttrSelection::none()).unwrap();
        assert_eq!(record.name.as_str(), "plain.txt");
        assert!(record.tags.contains(FormatTag::Regular));
        assert_eq!(record.tags.len(), 1);
        assert!(record.size.is_none());
        assert!(record.link.is_none());
    }

    #[test]
    fn test_directory_classification() {
        let temp = TempDir::new().unwrap();
        let record = get_file(temp.path(), &AttrSelection::none()).unwrap();
        assert!(record.is_dir());
        assert!(!record.is_link());
        assert!(record.children.is_none());
    }

    #[test]
    fn test_attributes_attached_only_when_requested() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("data.bin");
        fs::write(&file, [0u8; 100]).unwrap();

        let bare = get_file(&file, &AttrSelection::none()).unwrap();
        assert!(bare.size.is_none());
        assert!(bare.mode.is_none());
        assert!(bare.fs.is_none());
        assert!(bare.owner.is_none());
        assert!(bare.times.is_none());

        let full = get_file(&file, &AttrSelection::all()).unwrap();
        assert_eq!(full.size, Some(100));
        assert!(full.mode.is_some());
        let fs_info = full.fs.unwrap();
        assert!(fs_info.nlink >= 1);
        assert!(full.owner.is_some());
        assert!(full.times.unwrap().modified.secs > 0);
    }

    #[test]
    fn test_missing_path_propagates_stat_error() {
        let temp = TempDir::new().unwrap();
        let err = get_file(temp.path().join("ghost"), &AttrSelection::none()).unwrap_err();
        assert!(matches!(err, WalkError::NotFound { .. }));
    }

    #[cfg(unix)]
    mod symlinks {
        use super::*;
        use std::os::unix::fs::symlink;

        #[test]
        fn test_symlink_with_link_attr_carries_chain() {
            let temp = TempDir::new().unwrap();
            let target = temp.path().join("target.txt");
            let link = temp.path().join("link");
            File::create(&target).unwrap();
            symlink("target.txt", &link).unwrap();

            let attrs = AttrSelection::none().with_link();
            let record = get_file(&link, &attrs).unwrap();
            assert!(record.tags.contains(FormatTag::Link));
            assert!(record.tags.contains(FormatTag::Symlink));
            let chain = record.link.unwrap();
            assert_eq!(chain.status, LinkStatus::Success);
            assert_eq!(chain.final_abs(), target);
        }

        #[test]
        fn test_symlink_without_link_attr_uses_cheap_probe() {
            let temp = TempDir::new().unwrap();
            let link = temp.path().join("link");
            symlink("anywhere", &link).unwrap();

            let record = get_file(&link, &AttrSelection::none()).unwrap();
            assert!(record.tags.contains(FormatTag::Link));
            assert!(record.tags.contains(FormatTag::Symlink));
            assert!(record.link.is_none());
        }

        #[test]
        fn test_broken_symlink_still_classifies() {
            let temp = TempDir::new().unwrap();
            let link = temp.path().join("dangling");
            symlink("no-such-file", &link).unwrap();

            let attrs = AttrSelection::none().with_link();
            let record = get_file(&link, &attrs).unwrap();
            assert!(record.tags.contains(FormatTag::Symlink));
            assert_eq!(record.link.unwrap().status, LinkStatus::Broken);
        }

        #[test]
        fn test_hard_link_is_not_classified_as_link() {
            // True hard links expose no readable target; both names
            // look like plain files.
            let temp = TempDir::new().unwrap();
            let original = temp.path().join("a.txt");
            let alias = temp.path().join("b.txt");
            File::create(&original).unwrap();
            fs::hard_link(&original, &alias).unwrap();

            let attrs = AttrSelection::none().with_link();
            let record = get_file(&alias, &attrs).unwrap();
            assert!(record.tags.contains(FormatTag::Regular));
            assert!(!record.is_link());
            assert!(record.link.is_none());
        }

        #[test]
        fn test_symlink_to_directory_keeps_link_tags_only() {
            let temp = TempDir::new().unwrap();
            fs::create_dir(temp.path().join("d")).unwrap();
            let link = temp.path().join("dlink");
            symlink("d", &link).unwrap();

            let attrs = AttrSelection::none().with_link();
            let record = get_file(&link, &attrs).unwrap();
            // lstat sees the link, not the directory behind it.
            assert!(!record.is_dir());
            assert!(record.tags.contains(FormatTag::Link));
            assert!(record.tags.contains(FormatTag::Symlink));
        }
    }
}
