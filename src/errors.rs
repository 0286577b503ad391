// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Only fatal, environment-level problems are represented here. A command
//! that exits non-zero (or cannot be spawned) is a failed `CompletionEvent`,
//! never a `GlocError`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlocError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Discovery error in {path:?}: {message}")]
    Discovery { path: PathBuf, message: String },

    #[error("could not resolve the home directory while expanding '{0}'")]
    HomeDirUnavailable(String),

    #[error("no command provided")]
    EmptyCommand,

    #[error("event stream closed with {remaining} task(s) still pending")]
    EventStreamClosed { remaining: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GlocError>;
