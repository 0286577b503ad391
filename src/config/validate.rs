// src/config/validate.rs

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{GlocError, Result};

/// Directory names never descended into by a recursive search.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git"];

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = GlocError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_workers(cfg)?;
    build_exclude_set(&cfg.exclude)?;
    Ok(())
}

fn validate_workers(cfg: &RawConfigFile) -> Result<()> {
    if cfg.workers == Some(0) {
        return Err(GlocError::ConfigError(
            "workers must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

/// Compile the default exclusions plus `extra` into one matcher over
/// directory names.
pub fn build_exclude_set(extra: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_EXCLUDES
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str))
    {
        let glob = Glob::new(pattern).map_err(|e| {
            GlocError::ConfigError(format!("invalid exclude pattern '{pattern}': {e}"))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| GlocError::ConfigError(format!("building exclude set: {e}")))
}
