// src/config/mod.rs

//! Optional TOML config file with default settings.
//!
//! - [`model`] holds the serde structs and the resolved [`RunConfig`].
//! - [`loader`] reads files and locates the default config path.
//! - [`validate`] turns a [`RawConfigFile`] into a checked [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_optional};
pub use model::{ConfigFile, RawConfigFile, RunConfig};
pub use validate::build_exclude_set;
