//! Buff catalog: data describing what a chosen buff does.
//!
//! A buff is a named bundle of effects; each effect targets one stat
//! (entity-owned or global) with a modifier kind, a magnitude, and an
//! optional duration. Applying a buff turns the effects into modifiers
//! sourced [`ModifierSource::Buff`] and hands them to the scheduler, so
//! timed buffs expire on their own and the whole buff can later be
//! retracted in one `remove_source` call.
//!
//! The engine core never sees this catalog; it only receives modifiers.

use stats_core::{Modifier, ModifierKind, ModifierSource, Seconds, StatContext, StatHandle, StatSheet};

use crate::error::ApplyError;

/// Id of the built-in *Swift Moves* buff (+10% move speed).
pub const SWIFT_MOVES: u32 = 1;
/// Id of the built-in *Wider Net* buff (+10% board width).
pub const WIDER_NET: u32 = 2;
/// Id of the built-in *Time Warp* buff (items fall 5% slower, world-wide).
pub const TIME_WARP: u32 = 3;

/// Which mapping owns an effect's target stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    /// A stat on the sheet the buff is applied to.
    Sheet,

    /// A stat in the global registry.
    Global,
}

/// One stat adjustment within a buff.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffEffect {
    pub target: EffectTarget,

    /// Name of the stat to adjust.
    pub stat: String,

    pub kind: ModifierKind,

    /// Modifier magnitude (e.g. `0.1` for +10%).
    pub value: f64,

    /// Seconds until the effect wears off; zero means it lasts until
    /// retracted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Seconds,
}

/// A selectable buff.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub effects: Vec<BuffEffect>,
}

impl Buff {
    /// The source handle stamped on every modifier this buff attaches.
    pub fn source(&self) -> ModifierSource {
        ModifierSource::Buff(self.id)
    }

    /// Applies every effect of this buff to `sheet` (and, for global
    /// effects, to `ctx.globals`).
    ///
    /// Targets are resolved up front: if any named stat is missing, no
    /// modifier is attached at all and the missing name is reported.
    pub fn apply(
        &self,
        sheet: &StatSheet,
        ctx: &mut StatContext,
        now: Seconds,
    ) -> Result<(), ApplyError> {
        let mut resolved: Vec<(StatHandle, &BuffEffect)> = Vec::with_capacity(self.effects.len());
        for effect in &self.effects {
            let stat = match effect.target {
                EffectTarget::Sheet => sheet.stat(&effect.stat),
                EffectTarget::Global => ctx.globals.stat(&effect.stat),
            }
            .ok_or_else(|| ApplyError::StatNotFound {
                name: effect.stat.clone(),
            })?;
            resolved.push((stat, effect));
        }

        for (stat, effect) in resolved {
            let modifier = Modifier::timed(
                &mut ctx.ids,
                effect.value,
                effect.kind,
                self.source(),
                effect.duration,
            );
            ctx.scheduler.add_timed(&stat, modifier, now);
        }
        Ok(())
    }

    /// Retracts every modifier this buff attached to `sheet` and the
    /// globals. Returns whether anything was removed.
    pub fn retract(&self, sheet: &StatSheet, ctx: &StatContext) -> bool {
        let source = self.source();
        let from_sheet = sheet.remove_source(&source);
        let from_globals = ctx.globals.remove_source(&source);
        from_sheet || from_globals
    }
}

/// The set of buffs the game can offer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffCatalog {
    buffs: Vec<Buff>,
}

impl BuffCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from an explicit buff list.
    pub fn from_buffs(buffs: Vec<Buff>) -> Self {
        Self { buffs }
    }

    /// The built-in catalog.
    pub fn standard() -> Self {
        Self::from_buffs(vec![
            Buff {
                id: SWIFT_MOVES,
                name: "Swift Moves".into(),
                description: "Increases board movement speed by 10%.".into(),
                effects: vec![BuffEffect {
                    target: EffectTarget::Sheet,
                    stat: crate::stats::MOVE_SPEED.into(),
                    kind: ModifierKind::PercentAdd,
                    value: 0.1,
                    duration: 0.0,
                }],
            },
            Buff {
                id: WIDER_NET,
                name: "Wider Net".into(),
                description: "Increases board width by 10%.".into(),
                effects: vec![BuffEffect {
                    target: EffectTarget::Sheet,
                    stat: crate::stats::BOARD_WIDTH.into(),
                    kind: ModifierKind::PercentAdd,
                    value: 0.1,
                    duration: 0.0,
                }],
            },
            Buff {
                id: TIME_WARP,
                name: "Time Warp".into(),
                description: "Items fall 5% slower.".into(),
                effects: vec![BuffEffect {
                    target: EffectTarget::Global,
                    stat: crate::stats::ITEM_FALL_SPEED.into(),
                    kind: ModifierKind::PercentMult,
                    value: -0.05,
                    duration: 0.0,
                }],
            },
        ])
    }

    /// Looks up a buff by id.
    pub fn get(&self, id: u32) -> Option<&Buff> {
        self.buffs.iter().find(|b| b.id == id)
    }

    /// Iterates over all buffs.
    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }
}
