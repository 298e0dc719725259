//! StatContext: the explicitly constructed engine context.
//!
//! The pieces that would otherwise be process singletons (the global stat
//! registry, the modifier id counter) live here together with the
//! scheduler, so the embedding game loop owns exactly one value and tests
//! can spin up as many independent engines as they like.

use crate::modifier::{ModifierIds, Seconds};
use crate::registry::GlobalStats;
use crate::scheduler::ModifierScheduler;

/// Everything the gameplay loop needs to drive the stat engine.
#[derive(Debug, Default)]
pub struct StatContext {
    /// Stats with no single owner (world-level multipliers).
    pub globals: GlobalStats,

    /// Modifier id allocator shared by all contributors.
    pub ids: ModifierIds,

    /// Expiry tracking for timed modifiers.
    pub scheduler: ModifierScheduler,
}

impl StatContext {
    /// Creates a fresh context: empty registry, ids from 0, idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the scheduler to `now`, expiring due modifiers.
    ///
    /// Call once per frame from the game loop.
    pub fn tick(&mut self, now: Seconds) {
        self.scheduler.tick(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{Modifier, ModifierKind, ModifierSource};

    #[test]
    fn contexts_are_independent() {
        let mut a = StatContext::new();
        let mut b = StatContext::new();

        a.globals.define_stat("item_fall_speed", 1.0);
        a.ids.next();
        a.ids.next();

        assert!(b.globals.stat("item_fall_speed").is_none());
        assert_eq!(b.ids.next().raw(), 0);
    }

    #[test]
    fn tick_expires_global_modifiers() {
        let mut ctx = StatContext::new();
        ctx.globals.define_stat("item_fall_speed", 1.0);

        let stat = ctx.globals.stat("item_fall_speed").unwrap();
        let slow = Modifier::timed(
            &mut ctx.ids,
            -0.05,
            ModifierKind::PercentMult,
            ModifierSource::World,
            30.0,
        );
        ctx.scheduler.add_timed(&stat, slow, 0.0);

        ctx.tick(29.0);
        assert!((stat.value() - 0.95).abs() < 1e-9);

        ctx.tick(30.0);
        assert!((stat.value() - 1.0).abs() < 1e-9);
    }
}
