//! Buff and upgrade catalog loaders.

use std::path::Path;

use crate::buffs::BuffCatalog;
use crate::loaders::{LoadResult, read_file};
use crate::upgrades::UpgradeCatalog;

/// Parses a buff catalog from RON text.
///
/// Example:
/// ```ron
/// (
///     buffs: [
///         (
///             id: 10,
///             name: "Overclock",
///             description: "Briefly boosts movement speed.",
///             effects: [
///                 (target: Sheet, stat: "move_speed", kind: PercentAdd, value: 0.25, duration: 8.0),
///             ],
///         ),
///     ],
/// )
/// ```
pub fn buff_catalog_from_str(content: &str) -> LoadResult<BuffCatalog> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse buff catalog RON: {}", e))
}

/// Loads a buff catalog from a RON file.
pub fn load_buff_catalog(path: &Path) -> LoadResult<BuffCatalog> {
    let content = read_file(path)?;
    buff_catalog_from_str(&content)
}

/// Parses an upgrade catalog from RON text.
pub fn upgrade_catalog_from_str(content: &str) -> LoadResult<UpgradeCatalog> {
    ron::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse upgrade catalog RON: {}", e))
}

/// Loads an upgrade catalog from a RON file.
pub fn load_upgrade_catalog(path: &Path) -> LoadResult<UpgradeCatalog> {
    let content = read_file(path)?;
    upgrade_catalog_from_str(&content)
}
