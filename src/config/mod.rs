//! Configuration resolution
//!
//! Builds the candidate config-file search path from environment-driven
//! locations, then layers existing files over a mandatory defaults baseline
//! with first-path-wins precedence.

pub mod loader;
pub mod paths;

pub use loader::{load, load_builtin, ConfigError, ResolvedConfig};
pub use paths::{discover_config_files, list_config_paths, ConfigEnv};
