// src/config/model.rs

use serde::Deserialize;

use crate::cli::CliArgs;
use crate::exec::pool::DEFAULT_WORKERS;
use crate::types::OutputPolicy;

/// Config file as read from TOML, before validation.
///
/// ```toml
/// workers = 16
/// output = true
/// ignore_empty = true
/// ignore_errors = false
/// exclude = ["target", "vendor*"]
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Default concurrency bound.
    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default)]
    pub output: bool,

    #[serde(default)]
    pub ignore_empty: bool,

    #[serde(default)]
    pub ignore_errors: bool,

    /// Extra directory-name globs pruned by `--recurse-into`.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Validated config file. Construct via `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub workers: Option<usize>,
    pub output: bool,
    pub ignore_empty: bool,
    pub ignore_errors: bool,
    pub exclude: Vec<String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            workers: raw.workers,
            output: raw.output,
            ignore_empty: raw.ignore_empty,
            ignore_errors: raw.ignore_errors,
            exclude: raw.exclude,
        }
    }
}

/// Effective settings for one run after merging CLI flags over the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub workers: usize,
    pub policy: OutputPolicy,
    pub exclude: Vec<String>,
}

impl RunConfig {
    /// CLI booleans are OR'ed with the file, `--workers` overrides the file,
    /// and exclusion lists are concatenated (file first).
    pub fn resolve(args: &CliArgs, file: &ConfigFile) -> Self {
        let workers = args
            .workers
            // Out-of-range values are rejected by `WorkerPool::new`.
            .map(|w| usize::try_from(w).unwrap_or(usize::MAX))
            .or(file.workers)
            .unwrap_or(DEFAULT_WORKERS);

        let policy = OutputPolicy {
            show_output: args.output || file.output,
            ignore_empty: args.ignore_empty || file.ignore_empty,
            ignore_errors: args.ignore_errors || file.ignore_errors,
        };

        let mut exclude = file.exclude.clone();
        exclude.extend(args.exclude.iter().cloned());

        Self {
            workers,
            policy,
            exclude,
        }
    }
}
