//! Modifier value objects and id allocation.
//!
//! A [`Modifier`] is an immutable-after-construction description of one
//! adjustment to a stat: a signed magnitude, a combination kind, an opaque
//! source handle, and an optional duration. All behavior (accumulation,
//! expiry) lives in [`crate::stat::Stat`] and [`crate::scheduler::ModifierScheduler`];
//! this module is pure data.

/// Monotonic game time in seconds, as supplied by the surrounding game loop.
///
/// The core never reads an ambient clock; every time-dependent operation
/// takes the current time explicitly so the engine stays deterministic.
pub type Seconds = f64;

/// Identity of a modifier, used for targeted removal.
///
/// Ids are allocated by [`ModifierIds`] and are unique within one allocator:
/// never reused, never reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierId(u64);

impl ModifierId {
    /// Returns the raw numeric id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ModifierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic [`ModifierId`] allocator.
///
/// Held in an explicitly constructed context (see
/// [`crate::context::StatContext`]) rather than a process-wide static, so
/// tests can create independent instances instead of sharing hidden
/// process state.
#[derive(Clone, Debug, Default)]
pub struct ModifierIds {
    next: u64,
}

impl ModifierIds {
    /// Creates an allocator starting at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id.
    pub fn next(&mut self) -> ModifierId {
        let id = ModifierId(self.next);
        self.next += 1;
        id
    }
}

/// How a modifier combines with a stat's base value.
///
/// See [`crate::stat::Stat`] for the exact accumulation order. Note that
/// `PercentMult` modifiers apply sequentially in attachment order rather
/// than as a single summed percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierKind {
    /// Added directly to the base value.
    Flat,

    /// Additive percentage: all `PercentAdd` values are summed, then the
    /// running total is multiplied by `1 + sum` once.
    PercentAdd,

    /// Multiplicative percentage: each value multiplies the running total
    /// by `1 + value`, one modifier at a time.
    PercentMult,
}

/// Opaque handle identifying whatever granted a modifier.
///
/// The core only ever compares sources for equality; it never inspects the
/// payload. Bulk retraction (`remove_source`) uses this to pull every
/// modifier a single contributor attached, across one stat or a whole sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    /// A buff instance from the buff catalog.
    Buff(u32),

    /// A permanent upgrade blueprint.
    Upgrade(u32),

    /// A spawned entity (used when its effects must die with it).
    Entity(u32),

    /// A world-level effect with no single owner.
    World,
}

/// One adjustment to a stat.
///
/// Modifiers are value objects: construct one, attach it to a stat, and
/// refer to it afterwards only by [`Modifier::id`] or by its source. The
/// single post-construction mutation is `expires_at`, stamped by the
/// scheduler when a timed modifier is attached.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    /// Identity key for targeted removal.
    pub id: ModifierId,

    /// Signed magnitude. No range validation is applied anywhere.
    pub value: f64,

    /// Combination kind.
    pub kind: ModifierKind,

    /// Contributor handle, compared only for equality.
    pub source: ModifierSource,

    /// Duration in seconds. Zero or negative means permanent.
    pub duration: Seconds,

    /// Absolute expiry time, set at attachment (`now + duration`) for timed
    /// modifiers only.
    pub expires_at: Option<Seconds>,
}

impl Modifier {
    /// Creates a permanent modifier, assigning the next unique id.
    pub fn new(ids: &mut ModifierIds, value: f64, kind: ModifierKind, source: ModifierSource) -> Self {
        Self {
            id: ids.next(),
            value,
            kind,
            source,
            duration: 0.0,
            expires_at: None,
        }
    }

    /// Creates a time-bounded modifier.
    ///
    /// The expiry timestamp is not computed here; the scheduler stamps it
    /// when the modifier is attached.
    pub fn timed(
        ids: &mut ModifierIds,
        value: f64,
        kind: ModifierKind,
        source: ModifierSource,
        duration: Seconds,
    ) -> Self {
        Self {
            duration,
            ..Self::new(ids, value, kind, source)
        }
    }

    /// Shorthand for a permanent [`ModifierKind::Flat`] modifier.
    pub fn flat(ids: &mut ModifierIds, value: f64, source: ModifierSource) -> Self {
        Self::new(ids, value, ModifierKind::Flat, source)
    }

    /// Shorthand for a permanent [`ModifierKind::PercentAdd`] modifier.
    pub fn percent_add(ids: &mut ModifierIds, value: f64, source: ModifierSource) -> Self {
        Self::new(ids, value, ModifierKind::PercentAdd, source)
    }

    /// Shorthand for a permanent [`ModifierKind::PercentMult`] modifier.
    pub fn percent_mult(ids: &mut ModifierIds, value: f64, source: ModifierSource) -> Self {
        Self::new(ids, value, ModifierKind::PercentMult, source)
    }

    /// True when this modifier never expires.
    pub fn is_permanent(&self) -> bool {
        self.duration <= 0.0
    }
}
