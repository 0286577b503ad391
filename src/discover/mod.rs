// src/discover/mod.rs

//! Finding the directories a command should run in.
//!
//! Everything here runs once, on the coordinator, before any task is
//! dispatched. The result is an ordered list of absolute paths.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use tracing::{debug, warn};

use crate::errors::{GlocError, Result};
use crate::fs::FileSystem;
use crate::types::DiscoveryMode;

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` and `~/...` are expanded; `~user` is left alone.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path != "~" && !path.starts_with("~/") {
        return Ok(PathBuf::from(path));
    }

    let home = dirs::home_dir().ok_or_else(|| GlocError::HomeDirUnavailable(path.to_string()))?;
    match path.strip_prefix("~/") {
        Some(rest) => Ok(home.join(rest)),
        None => Ok(home),
    }
}

/// Discover task directories under `root`.
///
/// `excludes` is matched against directory *names* and only matters for
/// [`DiscoveryMode::Recursive`]. The returned paths are absolute and sorted.
pub fn discover(
    fs: &dyn FileSystem,
    root: &Path,
    mode: DiscoveryMode,
    excludes: &GlobSet,
) -> Result<Vec<PathBuf>> {
    let root = fs.canonicalize(root).map_err(|e| discovery_error(root, e))?;
    if !fs.is_dir(&root) {
        return Err(GlocError::Discovery {
            path: root,
            message: "not a directory".to_string(),
        });
    }

    let mut found = match mode {
        DiscoveryMode::GitChildren => child_dirs(fs, &root)?
            .into_iter()
            .filter(|dir| is_git_repo(fs, dir))
            .collect(),
        DiscoveryMode::AllDirs => child_dirs(fs, &root)?,
        DiscoveryMode::Recursive => walk_for_repos(fs, &root, excludes)?,
    };

    found.sort();
    debug!(root = %root.display(), ?mode, count = found.len(), "discovered task directories");
    Ok(found)
}

fn is_git_repo(fs: &dyn FileSystem, dir: &Path) -> bool {
    fs.exists(&dir.join(".git"))
}

fn child_dirs(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs.read_dir(dir).map_err(|e| discovery_error(dir, e))?;
    Ok(entries.into_iter().filter(|p| fs.is_dir(p)).collect())
}

/// Depth-first walk below `root`. Every directory holding a `.git` entry is
/// reported; directories whose name is excluded are never entered. The root
/// itself is not a candidate.
fn walk_for_repos(fs: &dyn FileSystem, root: &Path, excludes: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    visited.insert(root.to_path_buf());

    // The root must be readable; deeper failures only skip that subtree.
    let mut stack = child_dirs(fs, root)?;

    while let Some(dir) = stack.pop() {
        if is_excluded(&dir, excludes) {
            debug!(dir = %dir.display(), "pruned excluded directory");
            continue;
        }

        // Symlinked directories can point back up the tree.
        let canonical = fs.canonicalize(&dir).unwrap_or_else(|_| dir.clone());
        if !visited.insert(canonical) {
            continue;
        }

        if is_git_repo(fs, &dir) {
            found.push(dir.clone());
        }

        match child_dirs(fs, &dir) {
            Ok(children) => stack.extend(children),
            Err(err) => warn!(dir = %dir.display(), error = %err, "skipping unreadable directory"),
        }
    }

    Ok(found)
}

fn is_excluded(dir: &Path, excludes: &GlobSet) -> bool {
    dir.file_name()
        .map(|name| excludes.is_match(Path::new(name)))
        .unwrap_or(false)
}

fn discovery_error(path: &Path, err: anyhow::Error) -> GlocError {
    GlocError::Discovery {
        path: path.to_path_buf(),
        message: format!("{err:#}"),
    }
}
