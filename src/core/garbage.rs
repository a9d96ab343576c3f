//! Garbage module - timed garbage pressure
//!
//! Every 30 seconds of play time, `level` garbage blocks join a pending
//! pool. The pool drains onto the grid between pieces, at most one block
//! per column per drain; whatever does not fit carries over.

use crate::core::grid::Grid;
use crate::core::rng::SimpleRng;
use crate::types::{GARBAGE_INTERVAL_MS, GRID_WIDTH};

#[derive(Debug, Clone, Default)]
pub struct GarbageScheduler {
    timer_ms: u32,
    pending: u32,
}

impl GarbageScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the timer; when it crosses the interval, `level` blocks are
    /// added to the pending pool and the timer restarts from zero. At most
    /// one trigger per call, matching a frame-scale `elapsed_ms`.
    pub fn accumulate(&mut self, elapsed_ms: u32, level: u32) {
        self.timer_ms += elapsed_ms;
        if self.timer_ms >= GARBAGE_INTERVAL_MS {
            self.timer_ms = 0;
            self.pending += level;
        }
    }

    /// Drop up to one grid-width of pending garbage onto the grid, then
    /// settle it. Returns how many blocks were released; the remainder
    /// stays pending for the next drain.
    pub fn drain(&mut self, grid: &mut Grid, rng: &mut SimpleRng) -> u32 {
        if self.pending == 0 {
            return 0;
        }
        let releasing = self.pending.min(GRID_WIDTH as u32);
        grid.drop_garbage(releasing, rng);
        grid.compact_columns();
        self.pending -= releasing;
        releasing
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }
}
