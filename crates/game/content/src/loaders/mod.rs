//! Content loaders for reading tables and tunables from files.
//!
//! Tables are read from RON, the tactics configuration from TOML.

pub mod config;
pub mod tables;

pub use config::ConfigLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
