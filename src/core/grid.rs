//! Grid module - manages the game grid
//!
//! The grid is a 6x12 matrix where each cell is empty or holds a block
//! color. Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (x, y) with x in 0..6 (left to right), y in 0..12 (top to
//! bottom); gravity pulls cells toward increasing y.

use arrayvec::ArrayVec;

use crate::core::rng::SimpleRng;
use crate::types::{Cell, CoreError, PuyoColor, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
pub const GRID_SIZE: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// Positions collected by flood fill; bounded by the grid size
pub type PositionSet = ArrayVec<(i8, i8), GRID_SIZE>;

/// The game grid - 6 columns x 12 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    pub fn get(&self, x: i8, y: i8) -> Result<Cell, CoreError> {
        Self::index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(CoreError::OutOfBounds { x, y })
    }

    /// Set cell at position (x, y); overwrites unconditionally
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> Result<(), CoreError> {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                Ok(())
            }
            None => Err(CoreError::OutOfBounds { x, y }),
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(Self::index(x, y).map(|idx| self.cells[idx]), Some(None))
    }

    /// Gravity step: per column, shift all non-empty cells downward
    /// preserving their relative order, then fill the top with empties.
    /// Deterministic and idempotent; only relative order and count of
    /// non-empty cells per column matter.
    pub fn compact_columns(&mut self) {
        let width = GRID_WIDTH as usize;
        for x in 0..width {
            let mut write_y = GRID_HEIGHT as usize;
            // Scan bottom to top, sliding occupied cells to the write cursor
            for read_y in (0..GRID_HEIGHT as usize).rev() {
                let read_idx = read_y * width + x;
                if self.cells[read_idx].is_some() {
                    write_y -= 1;
                    let write_idx = write_y * width + x;
                    if write_idx != read_idx {
                        self.cells[write_idx] = self.cells[read_idx];
                        self.cells[read_idx] = None;
                    }
                }
            }
        }
    }

    /// Flood fill (4-directional) over cells sharing the color at (x, y).
    /// Returns an empty set for an empty start cell. Garbage is never
    /// connectable, neither as a start nor as a member.
    pub fn find_connected(&self, x: i8, y: i8) -> PositionSet {
        let mut connected = PositionSet::new();

        let color = match Self::index(x, y).and_then(|idx| self.cells[idx]) {
            Some(color) if !color.is_garbage() => color,
            _ => return connected,
        };

        let mut visited = [false; GRID_SIZE];
        let mut stack: ArrayVec<(i8, i8), GRID_SIZE> = ArrayVec::new();
        stack.push((x, y));

        while let Some((cx, cy)) = stack.pop() {
            let idx = match Self::index(cx, cy) {
                Some(idx) => idx,
                None => continue,
            };
            if visited[idx] || self.cells[idx] != Some(color) {
                continue;
            }
            visited[idx] = true;
            connected.push((cx, cy));

            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                stack.push((cx + dx, cy + dy));
            }
        }

        connected
    }

    /// Drop up to `count` garbage blocks into distinct randomly-chosen
    /// columns, one per column, each landing in the topmost empty row.
    /// Completely full columns are skipped silently; the caller retains any
    /// remainder beyond the grid width.
    pub fn drop_garbage(&mut self, count: u32, rng: &mut SimpleRng) {
        let mut columns: ArrayVec<i8, { GRID_WIDTH as usize }> =
            (0..GRID_WIDTH as i8).collect();
        rng.shuffle(&mut columns);

        for &col in columns.iter().take(count.min(GRID_WIDTH as u32) as usize) {
            for row in 0..GRID_HEIGHT as i8 {
                if self.is_empty(col, row) {
                    // Bounds just checked, set cannot fail
                    let _ = self.set(col, row, Some(PuyoColor::Garbage));
                    break;
                }
            }
        }
    }

    /// Reference to the raw cell array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
