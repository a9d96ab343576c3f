//! Snapshot module - read-only view of a session
//!
//! A snapshot copies everything a renderer or analyzer needs into plain
//! data, decoupled from the live session. `snapshot_into` refreshes an
//! existing value so a per-frame caller allocates nothing.

use crate::types::{Cell, PuyoColor, Rotation, GRID_HEIGHT, GRID_WIDTH};

/// Active pair as plain data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSnapshot {
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
    pub pivot_color: PuyoColor,
    pub satellite_color: PuyoColor,
}

/// Full game state as plain data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Settled cells, indexed `[y][x]`; the active pair is not drawn in
    pub grid: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    /// Falling pair, absent once the game is over
    pub active: Option<PairSnapshot>,
    /// Colors of the upcoming pair (pivot, satellite)
    pub next_pair: (PuyoColor, PuyoColor),
    pub score: u32,
    pub level: u32,
    pub max_chain: u32,
    pub pending_garbage: u32,
    pub play_time_ms: u64,
    pub game_over: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            next_pair: (PuyoColor::Red, PuyoColor::Red),
            score: 0,
            level: 1,
            max_chain: 0,
            pending_garbage: 0,
            play_time_ms: 0,
            game_over: false,
        }
    }
}
