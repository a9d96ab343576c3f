//! Core types shared across the engine
//! This module contains pure data types and tuning constants

use thiserror::Error;

/// Grid dimensions
pub const GRID_WIDTH: u8 = 6;
pub const GRID_HEIGHT: u8 = 12;

/// Minimum connected-group size that clears
pub const MATCH_GROUP_MIN: usize = 4;

/// Game timing constants (in milliseconds)
pub const BASE_FALL_MS: u32 = 500;
pub const FALL_STEP_MS: u32 = 80;
pub const FALL_FLOOR_MS: u32 = 50;
pub const GARBAGE_INTERVAL_MS: u32 = 30_000;

/// Scoring constants
pub const CELL_SCORE: u32 = 10;
pub const CHAIN_BONUS: u32 = 50;

/// Cleared rounds required per level step
pub const ROUNDS_PER_LEVEL: u32 = 10;

/// Block colors. `Garbage` never matches; it is only removed as a side
/// effect of an adjacent clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuyoColor {
    Red,
    Blue,
    Green,
    Yellow,
    Garbage,
}

impl PuyoColor {
    /// The colors a falling pair may carry (everything except Garbage).
    pub const PLAYABLE: [PuyoColor; 4] = [
        PuyoColor::Red,
        PuyoColor::Blue,
        PuyoColor::Green,
        PuyoColor::Yellow,
    ];

    pub fn is_garbage(&self) -> bool {
        matches!(self, PuyoColor::Garbage)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PuyoColor::Red => "red",
            PuyoColor::Blue => "blue",
            PuyoColor::Green => "green",
            PuyoColor::Yellow => "yellow",
            PuyoColor::Garbage => "garbage",
        }
    }
}

/// Cell on the grid (None = empty, Some = filled with a color)
pub type Cell = Option<PuyoColor>;

/// Rotation states for the falling pair. The satellite sits at the offset
/// for the current state; Up is the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Up,
    Right,
    Down,
    Left,
}

impl Rotation {
    /// Satellite offset relative to the pivot
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Rotation::Up => (0, -1),
            Rotation::Right => (1, 0),
            Rotation::Down => (0, 1),
            Rotation::Left => (-1, 0),
        }
    }

    /// Next state clockwise ((rotation + 1) mod 4)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::Up => Rotation::Right,
            Rotation::Right => Rotation::Down,
            Rotation::Down => Rotation::Left,
            Rotation::Left => Rotation::Up,
        }
    }

    pub const ALL: [Rotation; 4] = [
        Rotation::Up,
        Rotation::Right,
        Rotation::Down,
        Rotation::Left,
    ];
}

/// Gameplay intents accepted while a pair is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameIntent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Engine errors.
///
/// `OutOfBounds` is a programming error on the caller's side; the engine
/// itself only addresses cells it has bounds-checked. `SpawnBlocked` is the
/// expected terminal condition, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("cell ({x}, {y}) is outside the {GRID_WIDTH}x{GRID_HEIGHT} grid")]
    OutOfBounds { x: i8, y: i8 },
    #[error("no legal placement for a new pair at the spawn position")]
    SpawnBlocked,
}
