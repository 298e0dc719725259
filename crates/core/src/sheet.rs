//! StatSheet: the named stats of a single entity.
//!
//! A sheet maps stat names to [`StatHandle`]s. Names are unique within one
//! sheet. The sheet is owned exclusively by its entity and dropped with it,
//! at which point any scheduler entries pointing into it go stale and are
//! skipped on the next sweep.

use std::collections::HashMap;

use crate::modifier::ModifierSource;
use crate::stat::StatHandle;

/// Mapping from stat name to stat for one entity.
#[derive(Debug, Default)]
pub struct StatSheet {
    stats: HashMap<String, StatHandle>,
}

impl StatSheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a stat with the given base value.
    ///
    /// Redefining an existing name is a definition conflict: the original
    /// stat is retained and the call is logged and ignored.
    pub fn define_stat(&mut self, name: impl Into<String>, base: f64) {
        let name = name.into();
        if self.stats.contains_key(&name) {
            tracing::warn!(stat = %name, "stat already defined, keeping original");
            return;
        }
        self.stats.insert(name, StatHandle::new(base));
    }

    /// Looks up a stat by name.
    ///
    /// Returns `None` for undefined names; a sheet never auto-creates.
    pub fn stat(&self, name: &str) -> Option<StatHandle> {
        self.stats.get(name).cloned()
    }

    /// True if a stat with this name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.stats.contains_key(name)
    }

    /// Removes every modifier granted by `source` from every stat on the
    /// sheet. Returns whether anything was removed anywhere.
    ///
    /// This is the bulk-retraction path used when a contributor (an upgrade
    /// being reset, a despawning entity) must withdraw all its effects in
    /// one call.
    pub fn remove_source(&self, source: &ModifierSource) -> bool {
        let mut removed = false;
        for stat in self.stats.values() {
            removed |= stat.remove_source(source);
        }
        removed
    }

    /// Number of defined stats.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// True if no stats are defined.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Iterates over `(name, stat)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatHandle)> {
        self.stats.iter().map(|(name, stat)| (name.as_str(), stat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{Modifier, ModifierIds, ModifierSource};

    #[test]
    fn define_then_lookup() {
        let mut sheet = StatSheet::new();
        sheet.define_stat("move_speed", 300.0);

        let stat = sheet.stat("move_speed").expect("defined stat");
        assert_eq!(stat.base(), 300.0);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn lookup_miss_is_none() {
        let sheet = StatSheet::new();
        assert!(sheet.stat("luck").is_none());
        assert!(!sheet.contains("luck"));
    }

    #[test]
    fn duplicate_definition_keeps_original() {
        let mut sheet = StatSheet::new();
        sheet.define_stat("move_speed", 300.0);
        sheet.define_stat("move_speed", 9999.0);

        let stat = sheet.stat("move_speed").expect("defined stat");
        assert_eq!(stat.base(), 300.0);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn source_removal_spans_all_stats() {
        let mut ids = ModifierIds::new();
        let mut sheet = StatSheet::new();
        sheet.define_stat("move_speed", 100.0);
        sheet.define_stat("board_width", 1.0);

        let upgrade = ModifierSource::Upgrade(7);
        let other = ModifierSource::Buff(1);

        let speed = sheet.stat("move_speed").unwrap();
        let width = sheet.stat("board_width").unwrap();
        speed.add_modifier(Modifier::flat(&mut ids, 50.0, upgrade));
        width.add_modifier(Modifier::percent_add(&mut ids, 0.1, upgrade));
        speed.add_modifier(Modifier::flat(&mut ids, 5.0, other));

        assert!(sheet.remove_source(&upgrade));
        assert_eq!(speed.value(), 105.0);
        assert_eq!(width.value(), 1.0);

        // Second sweep finds nothing.
        assert!(!sheet.remove_source(&upgrade));
    }
}
