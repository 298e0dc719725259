//! Well-known stat names and spawn-time definitions.
//!
//! The engine core is name-agnostic; this module pins down the names and
//! default bases the rest of the content refers to, and defines them on a
//! fresh sheet or registry during entity spawn / process setup.

use stats_core::{GlobalStats, StatSheet};

/// Board movement speed, in world units per second.
pub const MOVE_SPEED: &str = "move_speed";

/// Board width as a scale factor relative to the prefab size.
pub const BOARD_WIDTH: &str = "board_width";

/// World-wide multiplier on how fast spawned items fall.
pub const ITEM_FALL_SPEED: &str = "item_fall_speed";

pub const DEFAULT_MOVE_SPEED: f64 = 300.0;
pub const DEFAULT_BOARD_WIDTH: f64 = 1.0;
pub const DEFAULT_ITEM_FALL_SPEED: f64 = 1.0;

/// Defines the board's stats on a freshly spawned entity's sheet.
pub fn define_board_stats(sheet: &mut StatSheet) {
    sheet.define_stat(MOVE_SPEED, DEFAULT_MOVE_SPEED);
    sheet.define_stat(BOARD_WIDTH, DEFAULT_BOARD_WIDTH);
}

/// Defines the world-level stats on the global registry at setup.
pub fn define_global_stats(globals: &mut GlobalStats) {
    globals.define_stat(ITEM_FALL_SPEED, DEFAULT_ITEM_FALL_SPEED);
}
