//! Content loaders for reading catalogs from files.
//!
//! Loaders convert RON files into the catalog types defined in this crate,
//! so games can ship custom buff/upgrade sets without recompiling.

pub mod catalog;

pub use catalog::{
    buff_catalog_from_str, load_buff_catalog, load_upgrade_catalog, upgrade_catalog_from_str,
};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
