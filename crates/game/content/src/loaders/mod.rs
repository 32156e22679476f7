//! Loaders for RON/TOML content files.

mod skills;
mod tables;

pub use skills::SkillLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Result type shared by all loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a content file with path context on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
