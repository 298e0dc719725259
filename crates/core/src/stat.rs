//! Stat: a base value plus an ordered modifier stack, with a cached
//! effective value.
//!
//! # Accumulation order
//!
//! The effective value is derived in three passes:
//!
//! ```text
//! result = base
//! result += Σ Flat
//! result *= 1 + Σ PercentAdd
//! for each PercentMult, in attachment order: result *= 1 + value
//! ```
//!
//! `PercentMult` modifiers are deliberately applied one at a time in
//! attachment order instead of being summed like `PercentAdd`. Sequential
//! stacking is an observable, tested behavior of the engine, not an
//! approximation to be collapsed.
//!
//! # Caching
//!
//! Recomputation is deferred: mutations mark the stat dirty, and the next
//! `value()` read recomputes and caches. The cache lives in `Cell`s so a
//! read only needs a shared reference.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::modifier::{Modifier, ModifierId, ModifierKind, ModifierSource};

/// A named numeric attribute: immutable base plus active modifiers.
#[derive(Debug)]
pub struct Stat {
    base: f64,
    modifiers: Vec<Modifier>,
    cached: Cell<f64>,
    dirty: Cell<bool>,
}

impl Stat {
    /// Creates a stat with the given base and no modifiers.
    pub fn new(base: f64) -> Self {
        Self {
            base,
            modifiers: Vec::new(),
            cached: Cell::new(base),
            dirty: Cell::new(true),
        }
    }

    /// The base value, fixed at definition time.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Returns the effective value, recomputing only if a mutation occurred
    /// since the last read.
    pub fn value(&self) -> f64 {
        if self.dirty.get() {
            self.cached.set(self.calculate());
            self.dirty.set(false);
        }
        self.cached.get()
    }

    /// Attaches a modifier. Any magnitude is accepted; no validation.
    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
        self.dirty.set(true);
    }

    /// Removes the modifier with the given id.
    ///
    /// Returns whether a removal occurred; removing an unknown id is not an
    /// error, merely a `false`.
    pub fn remove_modifier(&mut self, id: ModifierId) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.id != id);
        let removed = self.modifiers.len() < before;
        if removed {
            self.dirty.set(true);
        }
        removed
    }

    /// Removes every modifier whose source compares equal to `source`.
    ///
    /// Returns whether anything was removed. Unrelated modifiers are
    /// untouched and keep their relative order.
    pub fn remove_source(&mut self, source: &ModifierSource) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.source != *source);
        let removed = self.modifiers.len() < before;
        if removed {
            self.dirty.set(true);
        }
        removed
    }

    /// Number of attached modifiers.
    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// True if a modifier with this id is attached.
    pub fn has_modifier(&self, id: ModifierId) -> bool {
        self.modifiers.iter().any(|m| m.id == id)
    }

    /// Iterates over attached modifiers in attachment order.
    pub fn modifiers(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }

    fn calculate(&self) -> f64 {
        let mut result = self.base;

        // Pass 1: flat modifiers (commutative).
        for m in &self.modifiers {
            if m.kind == ModifierKind::Flat {
                result += m.value;
            }
        }

        // Pass 2: additive percentages, summed then applied once.
        let add_sum: f64 = self
            .modifiers
            .iter()
            .filter(|m| m.kind == ModifierKind::PercentAdd)
            .map(|m| m.value)
            .sum();
        result *= 1.0 + add_sum;

        // Pass 3: multiplicative percentages, sequentially in attachment order.
        for m in &self.modifiers {
            if m.kind == ModifierKind::PercentMult {
                result *= 1.0 + m.value;
            }
        }

        result
    }
}

/// Shared ownership handle to a [`Stat`].
///
/// A stat is owned by its sheet (or the global registry) and shared by
/// reference with readers; the engine is single-threaded, so `Rc<RefCell>`
/// encodes the access model directly. The scheduler holds only
/// [`WeakStatHandle`]s and must tolerate the stat disappearing.
#[derive(Clone, Debug)]
pub struct StatHandle {
    inner: Rc<RefCell<Stat>>,
}

impl StatHandle {
    /// Creates a new stat with the given base and wraps it in a handle.
    pub fn new(base: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Stat::new(base))),
        }
    }

    /// The base value.
    pub fn base(&self) -> f64 {
        self.inner.borrow().base()
    }

    /// The effective value. See [`Stat::value`].
    pub fn value(&self) -> f64 {
        self.inner.borrow().value()
    }

    /// Attaches a modifier. See [`Stat::add_modifier`].
    pub fn add_modifier(&self, modifier: Modifier) {
        self.inner.borrow_mut().add_modifier(modifier);
    }

    /// Removes a modifier by id. See [`Stat::remove_modifier`].
    pub fn remove_modifier(&self, id: ModifierId) -> bool {
        self.inner.borrow_mut().remove_modifier(id)
    }

    /// Removes all modifiers from a source. See [`Stat::remove_source`].
    pub fn remove_source(&self, source: &ModifierSource) -> bool {
        self.inner.borrow_mut().remove_source(source)
    }

    /// Number of attached modifiers.
    pub fn modifier_count(&self) -> usize {
        self.inner.borrow().modifier_count()
    }

    /// True if a modifier with this id is attached.
    pub fn has_modifier(&self, id: ModifierId) -> bool {
        self.inner.borrow().has_modifier(id)
    }

    /// Creates a non-owning handle for the scheduler.
    pub fn downgrade(&self) -> WeakStatHandle {
        WeakStatHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning counterpart of [`StatHandle`].
///
/// Upgrading fails once the owning sheet has dropped the stat, which is the
/// "stale reference" case the scheduler silently skips.
#[derive(Clone, Debug)]
pub struct WeakStatHandle {
    inner: Weak<RefCell<Stat>>,
}

impl WeakStatHandle {
    /// Attempts to recover a strong handle.
    pub fn upgrade(&self) -> Option<StatHandle> {
        self.inner.upgrade().map(|inner| StatHandle { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierIds;

    const SOURCE: ModifierSource = ModifierSource::World;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn bare_stat_returns_base() {
        let stat = Stat::new(100.0);
        assert_close(stat.value(), 100.0);

        let negative = Stat::new(-3.5);
        assert_close(negative.value(), -3.5);
    }

    #[test]
    fn flat_modifiers_are_order_independent() {
        let mut ids = ModifierIds::new();

        let mut a = Stat::new(10.0);
        a.add_modifier(Modifier::flat(&mut ids, 5.0, SOURCE));
        a.add_modifier(Modifier::flat(&mut ids, 3.0, SOURCE));

        let mut b = Stat::new(10.0);
        b.add_modifier(Modifier::flat(&mut ids, 3.0, SOURCE));
        b.add_modifier(Modifier::flat(&mut ids, 5.0, SOURCE));

        assert_close(a.value(), 18.0);
        assert_close(b.value(), 18.0);
    }

    #[test]
    fn flat_then_percent_add() {
        // (100 + 10) * (1 + 0.1 + 0.2) = 143
        let mut ids = ModifierIds::new();
        let mut stat = Stat::new(100.0);
        stat.add_modifier(Modifier::flat(&mut ids, 10.0, SOURCE));
        stat.add_modifier(Modifier::percent_add(&mut ids, 0.1, SOURCE));
        stat.add_modifier(Modifier::percent_add(&mut ids, 0.2, SOURCE));
        assert_close(stat.value(), 143.0);
    }

    #[test]
    fn percent_mult_stacks_sequentially() {
        // 100 * 1.1 * 1.2 = 132, whichever order they were attached in.
        let mut ids = ModifierIds::new();

        let mut a = Stat::new(100.0);
        a.add_modifier(Modifier::percent_mult(&mut ids, 0.1, SOURCE));
        a.add_modifier(Modifier::percent_mult(&mut ids, 0.2, SOURCE));
        assert_close(a.value(), 132.0);

        let mut b = Stat::new(100.0);
        b.add_modifier(Modifier::percent_mult(&mut ids, 0.2, SOURCE));
        b.add_modifier(Modifier::percent_mult(&mut ids, 0.1, SOURCE));
        assert_close(b.value(), 132.0);
    }

    #[test]
    fn percent_mult_is_deterministic_per_attachment_order() {
        // The per-order product must be bit-for-bit reproducible.
        let magnitudes = [0.3, -0.65, 1.7, 0.001];
        let mut ids = ModifierIds::new();

        let build = |ids: &mut ModifierIds, order: &[f64]| {
            let mut stat = Stat::new(7.0);
            for &v in order {
                stat.add_modifier(Modifier::percent_mult(ids, v, SOURCE));
            }
            stat.value()
        };

        let forward_once = build(&mut ids, &magnitudes);
        let forward_again = build(&mut ids, &magnitudes);
        assert_eq!(forward_once.to_bits(), forward_again.to_bits());
    }

    #[test]
    fn all_kinds_combine_in_pass_order() {
        // (50 + 10) * (1 + 0.5) * (1 - 0.1) = 81
        let mut ids = ModifierIds::new();
        let mut stat = Stat::new(50.0);
        stat.add_modifier(Modifier::percent_mult(&mut ids, -0.1, SOURCE));
        stat.add_modifier(Modifier::flat(&mut ids, 10.0, SOURCE));
        stat.add_modifier(Modifier::percent_add(&mut ids, 0.5, SOURCE));
        assert_close(stat.value(), 81.0);
    }

    #[test]
    fn reads_reflect_each_mutation_exactly_once() {
        let mut ids = ModifierIds::new();
        let mut stat = Stat::new(100.0);

        let m = Modifier::flat(&mut ids, 25.0, SOURCE);
        let id = m.id;
        stat.add_modifier(m);
        assert_close(stat.value(), 125.0);
        assert_close(stat.value(), 125.0);

        assert!(stat.remove_modifier(id));
        assert_close(stat.value(), 100.0);
        assert_close(stat.value(), 100.0);
    }

    #[test]
    fn removal_is_idempotent() {
        let mut ids = ModifierIds::new();
        let mut stat = Stat::new(100.0);

        let m = Modifier::flat(&mut ids, 25.0, SOURCE);
        let id = m.id;
        stat.add_modifier(m);

        assert!(stat.remove_modifier(id));
        assert!(!stat.remove_modifier(id));
        assert_close(stat.value(), 100.0);
    }

    #[test]
    fn source_removal_is_selective() {
        let mut ids = ModifierIds::new();
        let mut stat = Stat::new(100.0);
        stat.add_modifier(Modifier::flat(&mut ids, 10.0, ModifierSource::Buff(1)));
        stat.add_modifier(Modifier::flat(&mut ids, 20.0, ModifierSource::Buff(2)));

        assert!(stat.remove_source(&ModifierSource::Buff(1)));
        assert_close(stat.value(), 120.0);

        // Nothing left from that source.
        assert!(!stat.remove_source(&ModifierSource::Buff(1)));
        assert_close(stat.value(), 120.0);
    }

    #[test]
    fn any_magnitude_is_accepted() {
        let mut ids = ModifierIds::new();
        let mut stat = Stat::new(10.0);
        stat.add_modifier(Modifier::percent_add(&mut ids, -2.0, SOURCE));
        // 10 * (1 - 2.0) = -10; no clamping, no rounding.
        assert_close(stat.value(), -10.0);
    }

    #[test]
    fn handle_reads_through_shared_reference() {
        let mut ids = ModifierIds::new();
        let handle = StatHandle::new(100.0);
        let reader = handle.clone();

        handle.add_modifier(Modifier::flat(&mut ids, 11.0, SOURCE));
        assert_close(reader.value(), 111.0);
    }

    #[test]
    fn weak_handle_dies_with_its_stat() {
        let handle = StatHandle::new(1.0);
        let weak = handle.downgrade();
        assert!(weak.upgrade().is_some());

        drop(handle);
        assert!(weak.upgrade().is_none());
    }
}
