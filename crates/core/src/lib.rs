//! Deterministic stat/modifier engine for a frame-driven gameplay loop.
//!
//! `stats-core` derives the effective value of named quantities ("stats")
//! from a base plus a mutable set of additive and multiplicative
//! adjustments ("modifiers") granted by buffs, upgrades, and world
//! effects. Stats live on per-entity [`StatSheet`]s or in the
//! process-scoped [`GlobalStats`] registry; timed modifiers are expired by
//! the [`ModifierScheduler`] against an explicitly supplied monotonic
//! clock. Everything is single-threaded and synchronous; the surrounding
//! game loop serializes all access and drives [`StatContext::tick`] once
//! per frame.
pub mod context;
pub mod modifier;
pub mod registry;
pub mod scheduler;
pub mod sheet;
pub mod stat;

pub use context::StatContext;
pub use modifier::{Modifier, ModifierId, ModifierIds, ModifierKind, ModifierSource, Seconds};
pub use registry::GlobalStats;
pub use scheduler::ModifierScheduler;
pub use sheet::StatSheet;
pub use stat::{Stat, StatHandle, WeakStatHandle};
