//! Progression module - level curve and fall speed
//!
//! Levels are a pure function of lifetime cleared chain rounds; fall speed
//! is a pure function of level. Keeping both derivable makes snapshots and
//! replays trivially consistent.

use crate::types::{BASE_FALL_MS, FALL_FLOOR_MS, FALL_STEP_MS, ROUNDS_PER_LEVEL};

/// Gravity interval for a level, in milliseconds. Starts at 500ms and
/// shrinks 80ms per level down to a 50ms floor.
pub fn fall_interval_ms(level: u32) -> u32 {
    BASE_FALL_MS
        .saturating_sub(level.saturating_sub(1) * FALL_STEP_MS)
        .max(FALL_FLOOR_MS)
}

/// Tracks lifetime chain rounds and the level derived from them
#[derive(Debug, Clone, Default)]
pub struct ProgressionTracker {
    cleared_rounds: u32,
}

impl ProgressionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` finished chain rounds; returns true if the level
    /// changed as a result
    pub fn record_rounds(&mut self, count: u32) -> bool {
        let before = self.current_level();
        self.cleared_rounds += count;
        self.current_level() != before
    }

    /// Level 1 at the start, +1 per ten cleared rounds, unbounded
    pub fn current_level(&self) -> u32 {
        1 + self.cleared_rounds / ROUNDS_PER_LEVEL
    }

    pub fn cleared_rounds(&self) -> u32 {
        self.cleared_rounds
    }

    /// Gravity interval for the current level
    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(self.current_level())
    }
}
