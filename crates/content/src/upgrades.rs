//! Permanent upgrade blueprints.
//!
//! Upgrades are bought with currency between runs and persist at a level
//! from 0 to `max_level`. Each blueprint scales one stat linearly with its
//! level. Applying a level first retracts the blueprint's previous
//! modifiers via its source handle, so re-application (after a load, or
//! after buying the next level) never stacks.

use stats_core::{Modifier, ModifierIds, ModifierKind, ModifierSource, StatSheet};

use crate::error::ApplyError;

/// Id of the built-in *Base Speed* upgrade (+5% move speed per level).
pub const BASE_MOVE_SPEED: u32 = 1;

/// A purchasable permanent upgrade.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeBlueprint {
    pub id: u32,
    pub name: String,
    pub description: String,

    /// Highest purchasable level.
    pub max_level: u32,

    /// Name of the stat this upgrade scales.
    pub stat: String,

    pub kind: ModifierKind,

    /// Magnitude contributed per level (level `n` attaches one modifier of
    /// `n * value_per_level`).
    pub value_per_level: f64,

    /// Cost formula parameters: `cost(level) = base_cost + level² * cost_scale`.
    pub base_cost: u64,
    pub cost_scale: u64,
}

impl UpgradeBlueprint {
    /// The source handle stamped on this blueprint's modifiers.
    pub fn source(&self) -> ModifierSource {
        ModifierSource::Upgrade(self.id)
    }

    /// Currency cost of buying `level` (the level being purchased).
    pub fn cost(&self, level: u32) -> u64 {
        self.base_cost + u64::from(level) * u64::from(level) * self.cost_scale
    }

    /// Applies this upgrade at `level` to `sheet`.
    ///
    /// Any modifiers from a previous application are retracted first;
    /// level 0 therefore just resets the upgrade. Levels above `max_level`
    /// are rejected before anything is touched.
    pub fn apply(
        &self,
        sheet: &StatSheet,
        ids: &mut ModifierIds,
        level: u32,
    ) -> Result<(), ApplyError> {
        if level > self.max_level {
            return Err(ApplyError::LevelOutOfRange {
                level,
                max_level: self.max_level,
            });
        }
        let stat = sheet.stat(&self.stat).ok_or_else(|| ApplyError::StatNotFound {
            name: self.stat.clone(),
        })?;

        stat.remove_source(&self.source());
        if level > 0 {
            let modifier = Modifier::new(
                ids,
                f64::from(level) * self.value_per_level,
                self.kind,
                self.source(),
            );
            stat.add_modifier(modifier);
        }
        Ok(())
    }
}

/// The set of upgrades the game sells.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeCatalog {
    upgrades: Vec<UpgradeBlueprint>,
}

impl UpgradeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from an explicit blueprint list.
    pub fn from_blueprints(upgrades: Vec<UpgradeBlueprint>) -> Self {
        Self { upgrades }
    }

    /// The built-in catalog.
    pub fn standard() -> Self {
        Self::from_blueprints(vec![UpgradeBlueprint {
            id: BASE_MOVE_SPEED,
            name: "Base Speed".into(),
            description: "Permanently increases the board's base movement speed by 5% per level."
                .into(),
            max_level: 10,
            stat: crate::stats::MOVE_SPEED.into(),
            kind: ModifierKind::PercentAdd,
            value_per_level: 0.05,
            base_cost: 100,
            cost_scale: 50,
        }])
    }

    /// Looks up a blueprint by id.
    pub fn get(&self, id: u32) -> Option<&UpgradeBlueprint> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    /// Iterates over all blueprints.
    pub fn iter(&self) -> impl Iterator<Item = &UpgradeBlueprint> {
        self.upgrades.iter()
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn setup() -> (StatSheet, ModifierIds) {
        let mut sheet = StatSheet::new();
        stats::define_board_stats(&mut sheet);
        (sheet, ModifierIds::new())
    }

    #[test]
    fn level_scales_linearly() {
        let (sheet, mut ids) = setup();
        let upgrade = UpgradeCatalog::standard();
        let base_speed = upgrade.get(BASE_MOVE_SPEED).unwrap();

        base_speed.apply(&sheet, &mut ids, 3).unwrap();
        // 300 * (1 + 3 * 0.05)
        assert_close(sheet.stat(stats::MOVE_SPEED).unwrap().value(), 345.0);
    }

    #[test]
    fn reapplication_does_not_stack() {
        let (sheet, mut ids) = setup();
        let catalog = UpgradeCatalog::standard();
        let base_speed = catalog.get(BASE_MOVE_SPEED).unwrap();

        base_speed.apply(&sheet, &mut ids, 2).unwrap();
        base_speed.apply(&sheet, &mut ids, 5).unwrap();

        let speed = sheet.stat(stats::MOVE_SPEED).unwrap();
        assert_close(speed.value(), 375.0);
        assert_eq!(speed.modifier_count(), 1);
    }

    #[test]
    fn level_zero_resets() {
        let (sheet, mut ids) = setup();
        let catalog = UpgradeCatalog::standard();
        let base_speed = catalog.get(BASE_MOVE_SPEED).unwrap();

        base_speed.apply(&sheet, &mut ids, 4).unwrap();
        base_speed.apply(&sheet, &mut ids, 0).unwrap();
        assert_close(sheet.stat(stats::MOVE_SPEED).unwrap().value(), 300.0);
    }

    #[test]
    fn over_max_level_is_rejected_untouched() {
        let (sheet, mut ids) = setup();
        let catalog = UpgradeCatalog::standard();
        let base_speed = catalog.get(BASE_MOVE_SPEED).unwrap();

        base_speed.apply(&sheet, &mut ids, 2).unwrap();
        let err = base_speed.apply(&sheet, &mut ids, 11).unwrap_err();
        assert_eq!(
            err,
            ApplyError::LevelOutOfRange {
                level: 11,
                max_level: 10
            }
        );
        // Previous level still in place.
        assert_close(sheet.stat(stats::MOVE_SPEED).unwrap().value(), 330.0);
    }

    #[test]
    fn cost_follows_the_formula() {
        let catalog = UpgradeCatalog::standard();
        let base_speed = catalog.get(BASE_MOVE_SPEED).unwrap();
        assert_eq!(base_speed.cost(0), 100);
        assert_eq!(base_speed.cost(1), 150);
        assert_eq!(base_speed.cost(4), 900);
    }
}
