//! Iterative link-chain resolution.

use std::fs;
use std::path::{Path, PathBuf};

use lntree_core::{LinkChain, LinkStatus, WalkError};

use crate::identity::{IdentitySet, resolve_identity};
use crate::paths::{absolutize, normalize};

/// Resolve the chain of link targets starting at `path`.
///
/// The starting path is normalized and seeds the chain; each hop joins
/// the link target against the directory containing the current path,
/// so both relative and absolute targets resolve the way the kernel
/// sees them. Joined hops are deliberately not re-normalized: a `..`
/// that crosses a symlink is resolved by the filesystem, not lexically.
///
/// A `read_link` failure of any kind is the normal "this is not a link"
/// signal and terminates the chain with [`LinkStatus::Success`]. Only
/// the initial stat of the starting path can fail. Hard links are
/// invisible to this resolution; they carry no target to read.
pub fn track_link(path: impl AsRef<Path>) -> Result<LinkChain, WalkError> {
    let path = path.as_ref();
    let mut rel = normalize(path);
    let mut abs = absolutize(path).map_err(|e| WalkError::stat(path, e))?;

    let mut visited = IdentitySet::new();
    visited.track(resolve_identity(&abs, false)?);

    let mut chain = LinkChain::new(rel.clone(), abs.clone());

    loop {
        let target = match fs::read_link(&abs) {
            Ok(target) => target,
            Err(_) => break,
        };

        rel = join_target(&rel, &target);
        abs = join_target(&abs, &target);
        chain.push_hop(rel.clone(), abs.clone());

        match resolve_identity(&abs, false) {
            Err(_) => {
                chain.status = LinkStatus::Broken;
                break;
            }
            Ok(identity) => {
                if !visited.track(identity) {
                    chain.status = LinkStatus::Loop;
                    break;
                }
            }
        }
    }

    Ok(chain)
}

/// Join a link target against the directory containing the link. An
/// absolute target replaces the path wholesale.
fn join_target(current: &Path, target: &Path) -> PathBuf {
    current.parent().unwrap_or_else(|| Path::new("")).join(target)
}
