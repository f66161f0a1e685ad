// file: src/utils/paths.rs
// version: 1.0.0
// guid: 0c7e2b9d-4f1a-4e83-9d6b-2a5c8f1e3d70

//! Root-confined path resolution
//!
//! Configuration is written into a mounted target filesystem. Any component of
//! a task path may be a symlink created by the installed OS, and its target is
//! meaningful relative to the target root, not the installer host. Paths are
//! therefore walked component by component and every link is re-rooted under
//! the target before it is followed.

use crate::error::NetworkingError;
use crate::Result;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Maximum number of symlinks followed while resolving a single path
pub const MAX_RESOLVE_DEPTH: usize = 10;

#[derive(Debug)]
enum Part {
    Parent,
    Name(OsString),
}

fn parts(path: &Path) -> impl Iterator<Item = Part> + '_ {
    path.components().filter_map(|c| match c {
        Component::ParentDir => Some(Part::Parent),
        Component::Normal(name) => Some(Part::Name(name.to_os_string())),
        Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
    })
}

/// Resolve `path` under `root` using [`MAX_RESOLVE_DEPTH`]
pub fn resolve_path(root: &Path, path: &Path) -> Result<PathBuf> {
    resolve_path_with_limit(root, path, MAX_RESOLVE_DEPTH)
}

/// Resolve `path` under `root`, following at most `max_depth` symlinks
///
/// `path` may be relative or already prefixed with `root`. `..` never climbs
/// above `root`, and absolute link targets are interpreted as if `root` were
/// `/`.
pub fn resolve_path_with_limit(root: &Path, path: &Path, max_depth: usize) -> Result<PathBuf> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut pending: VecDeque<Part> = parts(relative).collect();
    let mut resolved: Vec<OsString> = Vec::new();
    let mut followed = 0;

    while let Some(part) = pending.pop_front() {
        let name = match part {
            Part::Parent => {
                resolved.pop();
                continue;
            }
            Part::Name(name) => name,
        };

        let mut candidate = root.to_path_buf();
        candidate.extend(&resolved);
        candidate.push(&name);

        let is_link = fs::symlink_metadata(&candidate)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link {
            resolved.push(name);
            continue;
        }

        if followed >= max_depth {
            return Err(NetworkingError::SymlinkDepth {
                path: candidate,
                depth: max_depth,
            });
        }
        followed += 1;

        let target = fs::read_link(&candidate).map_err(|e| NetworkingError::filesystem(&candidate, e))?;
        if target.has_root() {
            resolved.clear();
        }
        for part in parts(&target).collect::<Vec<_>>().into_iter().rev() {
            pending.push_front(part);
        }
    }

    let mut result = root.to_path_buf();
    result.extend(resolved);
    Ok(result)
}
