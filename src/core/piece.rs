//! Piece module - the active falling pair
//!
//! A pair is a pivot cell plus a satellite at the current rotation's
//! offset. Movement and rotation validate against the grid; rotation falls
//! back to a horizontal wall-kick search. Once committed the two cells are
//! independent grid contents and the pair identity is gone.

use crate::core::grid::Grid;
use crate::types::{CoreError, PuyoColor, Rotation, GRID_WIDTH};

/// Spawn position for new pairs (pivot x, pivot y)
pub const SPAWN_POSITION: (i8, i8) = (GRID_WIDTH as i8 / 2 - 1, 0);

/// Horizontal kick offsets tried in order when an in-place rotation is
/// blocked. Right is preferred; the order is part of the rules.
const KICK_OFFSETS: [i8; 4] = [1, -1, 2, -2];

/// Active falling pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuyoPair {
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
    pub pivot_color: PuyoColor,
    pub satellite_color: PuyoColor,
}

impl PuyoPair {
    /// Create a pair at the spawn position without checking the grid.
    /// Used for the very first pair of a session (empty grid).
    pub fn at_spawn(pivot_color: PuyoColor, satellite_color: PuyoColor) -> Self {
        Self {
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
            rotation: Rotation::Up,
            pivot_color,
            satellite_color,
        }
    }

    /// Spawn a new pair, failing with `SpawnBlocked` only if the spawn
    /// position is invalid at every rotation. The pair itself always starts
    /// at rotation Up; at spawn the satellite sits above the top row, which
    /// is tolerated until the pair moves.
    pub fn spawn(
        grid: &Grid,
        pivot_color: PuyoColor,
        satellite_color: PuyoColor,
    ) -> Result<Self, CoreError> {
        if !Self::spawn_feasible(grid) {
            return Err(CoreError::SpawnBlocked);
        }
        Ok(Self::at_spawn(pivot_color, satellite_color))
    }

    /// Whether any rotation of a new pair fits at the spawn position.
    /// Models "no legal placement anywhere for the new piece".
    pub fn spawn_feasible(grid: &Grid) -> bool {
        let (x, y) = SPAWN_POSITION;
        Rotation::ALL
            .iter()
            .any(|rot| Self::is_valid(grid, x, y, *rot))
    }

    /// True iff both the pivot (x, y) and the satellite at the rotation's
    /// offset are within bounds and empty.
    pub fn is_valid(grid: &Grid, x: i8, y: i8, rotation: Rotation) -> bool {
        let (dx, dy) = rotation.offset();
        grid.is_empty(x, y) && grid.is_empty(x + dx, y + dy)
    }

    /// Satellite position for the current rotation
    pub fn satellite(&self) -> (i8, i8) {
        let (dx, dy) = self.rotation.offset();
        (self.x + dx, self.y + dy)
    }

    /// Try to move by (dx, dy); a rejected move is a normal `false`
    pub fn try_move(&mut self, grid: &Grid, dx: i8, dy: i8) -> bool {
        let nx = self.x + dx;
        let ny = self.y + dy;
        if Self::is_valid(grid, nx, ny, self.rotation) {
            self.x = nx;
            self.y = ny;
            return true;
        }
        false
    }

    /// Try to rotate clockwise, kicking horizontally when blocked in place.
    /// Kicks are tested at the new rotation in the fixed order [+1, -1,
    /// +2, -2]; the first valid offset shifts the pivot and commits.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let new_rotation = self.rotation.rotate_cw();

        if Self::is_valid(grid, self.x, self.y, new_rotation) {
            self.rotation = new_rotation;
            return true;
        }

        for offset in KICK_OFFSETS {
            if Self::is_valid(grid, self.x + offset, self.y, new_rotation) {
                self.x += offset;
                self.rotation = new_rotation;
                return true;
            }
        }

        false
    }

    /// Write both colors into the grid. The caller must have confirmed the
    /// pair cannot move further down. A satellite still above the top row
    /// is dropped silently; every other cell is in bounds by construction.
    pub fn commit(&self, grid: &mut Grid) {
        let _ = grid.set(self.x, self.y, Some(self.pivot_color));
        let (sx, sy) = self.satellite();
        let _ = grid.set(sx, sy, Some(self.satellite_color));
    }
}
