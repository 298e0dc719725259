//! Errors for applying catalog entries to live stats.
//!
//! The engine core itself has no error type: misuse there is signalled by
//! `bool`/`Option` return values. Applying *content* can fail in ways the
//! caller must hear about (a catalog entry naming a stat the target never
//! defined), so the content crate reports those with a proper error enum.

/// Failure to apply a buff or upgrade to a target.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// The catalog entry names a stat the target does not define.
    #[error("stat \"{name}\" is not defined on the target")]
    StatNotFound { name: String },

    /// An upgrade was applied beyond its maximum level.
    #[error("upgrade level {level} exceeds max level {max_level}")]
    LevelOutOfRange { level: u32, max_level: u32 },
}
