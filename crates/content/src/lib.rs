//! Buff and upgrade catalogs for the stat engine.
//!
//! `stats-content` holds the data describing *what* a given effect does:
//! which stat it touches, by how much, and for how long. The engine core
//! (`stats-core`) never depends on this crate; content only exercises the
//! core's "construct a modifier and attach it" capability. Built-in
//! catalogs cover the stock buffs and upgrades; the optional `loaders`
//! feature adds RON file loading for custom catalogs.

pub mod buffs;
pub mod error;
pub mod stats;
pub mod upgrades;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use buffs::{Buff, BuffCatalog, BuffEffect, EffectTarget};
pub use error::ApplyError;
pub use upgrades::{UpgradeBlueprint, UpgradeCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{load_buff_catalog, load_upgrade_catalog};
