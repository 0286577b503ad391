#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Builds a throwaway directory tree of fake repository checkouts.
///
/// A "repo" is just a directory with an empty `.git` directory inside; that
/// is all discovery looks for.
pub struct RepoTreeBuilder {
    root: TempDir,
}

impl RepoTreeBuilder {
    pub fn new() -> Result<Self> {
        let root = tempfile::tempdir().context("creating temp dir")?;
        Ok(Self { root })
    }

    /// `rel` relative to the root, e.g. `"alpha"` or `"group/beta"`.
    pub fn repo(self, rel: &str) -> Result<Self> {
        let git = self.root.path().join(rel).join(".git");
        fs::create_dir_all(&git).with_context(|| format!("creating {:?}", git))?;
        Ok(self)
    }

    pub fn dir(self, rel: &str) -> Result<Self> {
        let dir = self.root.path().join(rel);
        fs::create_dir_all(&dir).with_context(|| format!("creating {:?}", dir))?;
        Ok(self)
    }

    pub fn file(self, rel: &str, contents: &str) -> Result<Self> {
        let path = self.root.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {:?}", path))?;
        Ok(self)
    }

    pub fn build(self) -> RepoTree {
        RepoTree { root: self.root }
    }
}

/// A built tree; deleted when dropped.
pub struct RepoTree {
    root: TempDir,
}

impl RepoTree {
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Canonical absolute path of `rel`, matching what discovery returns.
    pub fn canonical(&self, rel: &str) -> PathBuf {
        fs::canonicalize(self.root.path().join(rel)).expect("canonicalize test path")
    }
}
