//! GlobalStats: stats owned by no single entity.
//!
//! Quantities like a world-wide fall-speed multiplier live here rather than
//! on any entity's sheet. The registry exposes the same define/lookup
//! contract as [`StatSheet`], scoped to the whole process: the embedder
//! constructs it once (typically inside [`crate::context::StatContext`])
//! and passes it down instead of reaching for a hidden singleton.

use crate::modifier::ModifierSource;
use crate::sheet::StatSheet;
use crate::stat::StatHandle;

/// Process-scoped stat registry.
#[derive(Debug, Default)]
pub struct GlobalStats {
    sheet: StatSheet,
}

impl GlobalStats {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a global stat. Duplicate names are logged and ignored,
    /// exactly as on a sheet.
    pub fn define_stat(&mut self, name: impl Into<String>, base: f64) {
        self.sheet.define_stat(name, base);
    }

    /// Looks up a global stat by name.
    pub fn stat(&self, name: &str) -> Option<StatHandle> {
        self.sheet.stat(name)
    }

    /// True if a stat with this name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.sheet.contains(name)
    }

    /// Removes every modifier granted by `source` across all global stats.
    pub fn remove_source(&self, source: &ModifierSource) -> bool {
        self.sheet.remove_source(source)
    }

    /// Number of defined global stats.
    pub fn len(&self) -> usize {
        self.sheet.len()
    }

    /// True if no global stats are defined.
    pub fn is_empty(&self) -> bool {
        self.sheet.is_empty()
    }
}
