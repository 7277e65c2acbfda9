use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use lntree_core::{
    AttrSelection, FileRecord, FileTree, FollowLinks, FormatSet, FormatTag, LinkChain,
    LinkStatus, RecordFlag, SortOrder, TreeStats, WalkConfig, WalkWarning, WarningKind,
    format_bits, permission_bits,
};

#[test]
fn test_mode_split_helpers() {
    let mode = 0o120_777;
    assert_eq!(format_bits(mode), 0o120_000);
    assert_eq!(permission_bits(mode), 0o777);
}

#[test]
fn test_every_base_format_is_exclusive() {
    // Each stat'able non-link entry carries exactly one base tag.
    let modes = [
        0o040_755, 0o020_660, 0o060_660, 0o100_644, 0o010_644, 0o140_755, 0o150_755,
        0o160_000,
    ];
    for mode in modes {
        let tags = FormatSet::from_file_mode(mode);
        assert_eq!(tags.len(), 1, "mode {mode:o} should carry one tag");
    }
}

#[test]
fn test_chain_classification() {
    // Non-link: single entry, success.
    let plain = LinkChain::new(PathBuf::from("f"), PathBuf::from("/t/f"));
    assert!(!plain.is_link());

    // One successful hop.
    let mut hopped = LinkChain::new(PathBuf::from("ln"), PathBuf::from("/t/ln"));
    hopped.push_hop(PathBuf::from("f"), PathBuf::from("/t/f"));
    assert!(hopped.is_link());

    // Broken and loop chains are links regardless of length.
    let mut broken = LinkChain::new(PathBuf::from("ln"), PathBuf::from("/t/ln"));
    broken.push_hop(PathBuf::from("gone"), PathBuf::from("/t/gone"));
    broken.status = LinkStatus::Broken;
    assert!(broken.is_link());
}

#[test]
fn test_record_tree_assembly() {
    let mut dir = FileRecord::new("sub", 0o040_000, FormatSet::from_file_mode(0o040_755));
    dir.children = Some(vec![FileRecord::new(
        "inner.txt",
        0o100_000,
        FormatSet::from_file_mode(0o100_644),
    )]);
    assert!(dir.is_dir());
    assert_eq!(dir.child_count(), 1);

    let leaf = FileRecord::new("a.txt", 0o100_000, FormatSet::from_file_mode(0o100_644));
    assert_eq!(leaf.child_count(), 0);
    assert!(leaf.children.is_none());
}

#[test]
fn test_config_round_trips_through_serde() {
    let config = WalkConfig::builder()
        .root("/srv/data")
        .ignore(r"\.git".to_string())
        .follow(FollowLinks::all())
        .sort(SortOrder::Descending)
        .attrs(AttrSelection::all())
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let back: WalkConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.root, config.root);
    assert_eq!(back.ignore, config.ignore);
    assert_eq!(back.follow, config.follow);
    assert_eq!(back.sort, config.sort);
    assert_eq!(back.attrs, config.attrs);
}

#[test]
fn test_file_tree_serialization() {
    let mut link_tags = FormatSet::new();
    link_tags.insert(FormatTag::Link);
    link_tags.insert(FormatTag::Symlink);
    let mut link = FileRecord::new("self", 0o120_000, link_tags);
    link.flags.insert(RecordFlag::Recur);

    let mut stats = TreeStats::new();
    stats.record(&link);

    let tree = FileTree::new(
        vec![link],
        PathBuf::from("/srv/data"),
        WalkConfig::new("/srv/data"),
        stats,
        Duration::from_millis(3),
        vec![WalkWarning::new("/srv/data/ghost", "Stat failed", WarningKind::Stat)],
    );

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["children"][0]["name"], "self");
    assert_eq!(json["children"][0]["tags"][0], "lnk");
    assert_eq!(json["children"][0]["flags"][0], "recur");
    // Unrequested attributes are absent, not null.
    assert!(json["children"][0].get("size").is_none());
    assert_eq!(json["stats"]["total_links"], 1);

    let back: FileTree = serde_json::from_value(json).unwrap();
    assert_eq!(back.children.len(), 1);
    assert!(back.children[0].is_recur());
    assert!(back.has_warnings());
}

#[test]
fn test_unknown_record_for_failed_entries() {
    let record = FileRecord::unknown("vanished");
    let mut stats = TreeStats::new();
    stats.record(&record);
    // Unknown records are neither dirs nor links.
    assert_eq!(stats.total_files, 1);
    assert!(record.flags.is_empty());
    assert_eq!(record.flags, BTreeSet::new());
}
