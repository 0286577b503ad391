use std::fmt;

use crate::errors::{GlocError, Result};

/// How the command is handed to the operating system.
///
/// - `Shell`: the whole string goes verbatim to `sh -c` (or `cmd /C` on
///   Windows), so quoting and pipes behave as they would in a terminal.
/// - `Argv`: a pre-split program + arguments, executed without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    Shell(String),
    Argv(Vec<String>),
}

impl CommandSpec {
    /// Build a shell command. Blank strings are rejected.
    pub fn shell(cmd: impl Into<String>) -> Result<Self> {
        let cmd = cmd.into();
        if cmd.trim().is_empty() {
            return Err(GlocError::EmptyCommand);
        }
        Ok(CommandSpec::Shell(cmd))
    }

    /// Build an argv command from already-split parts.
    pub fn argv<I, S>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        match parts.first() {
            Some(program) if !program.is_empty() => Ok(CommandSpec::Argv(parts)),
            _ => Err(GlocError::EmptyCommand),
        }
    }

    /// Legacy tokenization: split on literal spaces.
    ///
    /// Quoted arguments and embedded spaces are NOT handled; `"git commit -m
    /// 'a b'"` becomes five arguments. Only used behind `--split`.
    pub fn split_on_spaces(cmd: &str) -> Result<Self> {
        Self::argv(cmd.split(' ').filter(|part| !part.is_empty()))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSpec::Shell(cmd) => write!(f, "{cmd}"),
            CommandSpec::Argv(parts) => write!(f, "{}", parts.join(" ")),
        }
    }
}

/// Which captured output gets printed under a task's record line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputPolicy {
    /// `--output`: print captured text at all.
    pub show_output: bool,
    /// `--ignore-empty`: skip the text when it is blank.
    pub ignore_empty: bool,
    /// `--ignore-errors`: skip the text of failed tasks.
    pub ignore_errors: bool,
}

impl OutputPolicy {
    pub fn should_show(&self, succeeded: bool, output: &str) -> bool {
        if !self.show_output {
            return false;
        }
        if self.ignore_empty && output.trim().is_empty() {
            return false;
        }
        if !succeeded && self.ignore_errors {
            return false;
        }
        true
    }
}

/// How task directories are found under the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryMode {
    /// Immediate children of the root that contain a `.git` entry.
    #[default]
    GitChildren,
    /// Every immediate child directory; no git detection.
    AllDirs,
    /// Any directory below the root that contains `.git`, pruning excluded
    /// directory names from descent.
    Recursive,
}

impl DiscoveryMode {
    /// `--all-dirs` wins over `--recurse-into` when both are given.
    pub fn from_flags(all_dirs: bool, recurse_into: bool) -> Self {
        match (all_dirs, recurse_into) {
            (true, _) => DiscoveryMode::AllDirs,
            (false, true) => DiscoveryMode::Recursive,
            (false, false) => DiscoveryMode::GitChildren,
        }
    }
}
