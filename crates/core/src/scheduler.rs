//! ModifierScheduler: tracks timed modifiers and expires them.
//!
//! The scheduler is the only actor that removes timed modifiers. It holds
//! non-owning entries: a weak stat handle, the modifier id, and the
//! absolute expiry time stamped at attachment. It never owns a modifier
//! and never depends on sheets or the global registry, so it works the
//! same for entity-owned and global stats.
//!
//! A timed modifier has exactly one transition:
//! attached-and-tracked → (tick with `now >= expires_at`) → detached-and-untracked.
//! Nothing re-arms a modifier or extends its expiry; stacking the same
//! effect again means attaching a fresh modifier with its own id.

use crate::modifier::{Modifier, ModifierId, Seconds};
use crate::stat::{StatHandle, WeakStatHandle};

/// One tracked `(stat, modifier)` pair awaiting expiry.
#[derive(Debug)]
struct TimedEntry {
    stat: WeakStatHandle,
    modifier: ModifierId,
    expires_at: Seconds,
}

/// Expires time-bounded modifiers against a supplied monotonic clock.
#[derive(Debug, Default)]
pub struct ModifierScheduler {
    tracked: Vec<TimedEntry>,
}

impl ModifierScheduler {
    /// Creates a scheduler tracking nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `modifier` to `stat`, tracking it for expiry if it has a
    /// positive duration.
    ///
    /// Permanent modifiers (duration <= 0) are attached and never tracked.
    /// For timed ones, `expires_at` is stamped as `now + duration` before
    /// attachment so the stat's copy carries its own expiry.
    pub fn add_timed(&mut self, stat: &StatHandle, mut modifier: Modifier, now: Seconds) {
        if modifier.is_permanent() {
            stat.add_modifier(modifier);
            return;
        }

        let expires_at = now + modifier.duration;
        modifier.expires_at = Some(expires_at);
        let id = modifier.id;
        stat.add_modifier(modifier);
        self.tracked.push(TimedEntry {
            stat: stat.downgrade(),
            modifier: id,
            expires_at,
        });
    }

    /// Sweeps tracked entries against `now`, removing expired modifiers
    /// from their stats.
    ///
    /// Entries whose stat has been destroyed are dropped without fault, and
    /// a modifier already removed by direct cancellation is a no-op here:
    /// `remove_modifier` is idempotent. Cost is O(tracked entries), with a
    /// fast path when nothing is tracked.
    pub fn tick(&mut self, now: Seconds) {
        if self.tracked.is_empty() {
            return;
        }

        self.tracked.retain(|entry| {
            let Some(stat) = entry.stat.upgrade() else {
                // Owning stat is gone; nothing left to expire.
                return false;
            };
            if entry.expires_at > now {
                return true;
            }
            let removed = stat.remove_modifier(entry.modifier);
            tracing::debug!(modifier = %entry.modifier, removed, "timed modifier expired");
            false
        });
    }

    /// Number of entries currently awaiting expiry.
    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }
}
