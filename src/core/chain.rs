//! Chain module - match detection and cascade resolution
//!
//! After a pair settles, same-color groups of four or more clear, adjacent
//! garbage clears with them, gravity compacts the columns, and the scan
//! repeats until a pass finds nothing. Each pass is one chain round with
//! its own score contribution.

use crate::core::grid::{Grid, GRID_SIZE};
use crate::types::{PuyoColor, CELL_SCORE, CHAIN_BONUS, GRID_HEIGHT, GRID_WIDTH, MATCH_GROUP_MIN};

/// One resolved pass of the chain loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRound {
    /// 1-based position of this round within the chain
    pub index: u32,
    /// Every cleared cell with its pre-clear color, row-major order
    pub cleared: Vec<((i8, i8), PuyoColor)>,
    /// Points awarded for this round
    pub score: u32,
}

impl ChainRound {
    /// Number of cells removed this round, garbage included
    pub fn cleared_count(&self) -> u32 {
        self.cleared.len() as u32
    }
}

/// Resolve a single pass: find all groups of `MATCH_GROUP_MIN` or more
/// connected same-color cells, clear them plus orthogonally adjacent
/// garbage, then compact. Returns `None` when no group qualifies, leaving
/// the grid untouched.
///
/// `round_index` is the 1-based position of this pass within its chain and
/// feeds the per-round bonus.
pub fn resolve_once(grid: &mut Grid, round_index: u32) -> Option<ChainRound> {
    let mut marked = [false; GRID_SIZE];
    let mut any = false;

    // Row-major scan; cells already claimed by an earlier group are not
    // rescanned
    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            if marked[(y as usize) * (GRID_WIDTH as usize) + (x as usize)] {
                continue;
            }
            let group = grid.find_connected(x, y);
            if group.len() >= MATCH_GROUP_MIN {
                any = true;
                for (gx, gy) in group {
                    marked[(gy as usize) * (GRID_WIDTH as usize) + (gx as usize)] = true;
                }
            }
        }
    }

    if !any {
        return None;
    }

    // Garbage adjacent to any marked colored cell clears too, but never
    // propagates to further garbage
    let mut garbage = [false; GRID_SIZE];
    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            if !marked[(y as usize) * (GRID_WIDTH as usize) + (x as usize)] {
                continue;
            }
            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let (nx, ny) = (x + dx, y + dy);
                if let Ok(Some(color)) = grid.get(nx, ny) {
                    if color.is_garbage() {
                        garbage[(ny as usize) * (GRID_WIDTH as usize) + (nx as usize)] = true;
                    }
                }
            }
        }
    }

    let mut cleared = Vec::new();
    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            let idx = (y as usize) * (GRID_WIDTH as usize) + (x as usize);
            if marked[idx] || garbage[idx] {
                if let Ok(Some(color)) = grid.get(x, y) {
                    cleared.push(((x, y), color));
                }
            }
        }
    }

    for ((x, y), _) in &cleared {
        // Positions came from in-bounds scans
        let _ = grid.set(*x, *y, None);
    }
    grid.compact_columns();

    let score = cleared.len() as u32 * CELL_SCORE + round_index * CHAIN_BONUS;
    Some(ChainRound {
        index: round_index,
        cleared,
        score,
    })
}

/// Run the full chain loop until a pass clears nothing. Returns the rounds
/// in order; an empty result means the settle produced no match.
pub fn resolve_all(grid: &mut Grid) -> Vec<ChainRound> {
    let mut rounds = Vec::new();
    let mut index = 1;
    while let Some(round) = resolve_once(grid, index) {
        rounds.push(round);
        index += 1;
    }
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(grid: &mut Grid, cells: &[(i8, i8, PuyoColor)]) {
        for (x, y, color) in cells {
            grid.set(*x, *y, Some(*color)).unwrap();
        }
    }

    #[test]
    fn test_no_match_below_threshold() {
        let mut grid = Grid::new();
        fill(
            &mut grid,
            &[
                (0, 11, PuyoColor::Red),
                (1, 11, PuyoColor::Red),
                (2, 11, PuyoColor::Red),
            ],
        );
        let before = grid.clone();
        assert!(resolve_once(&mut grid, 1).is_none());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_plus_shape_clears_with_score() {
        let mut grid = Grid::new();
        // Plus of five reds centered at (2, 10)
        fill(
            &mut grid,
            &[
                (2, 9, PuyoColor::Red),
                (1, 10, PuyoColor::Red),
                (2, 10, PuyoColor::Red),
                (3, 10, PuyoColor::Red),
                (2, 11, PuyoColor::Red),
            ],
        );
        let round = resolve_once(&mut grid, 1).unwrap();
        assert_eq!(round.index, 1);
        assert_eq!(round.cleared_count(), 5);
        // 5 cells * 10 + round 1 * 50
        assert_eq!(round.score, 100);
        assert!(grid.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_diagonal_cells_do_not_connect() {
        let mut grid = Grid::new();
        fill(
            &mut grid,
            &[
                (0, 11, PuyoColor::Red),
                (1, 10, PuyoColor::Red),
                (2, 11, PuyoColor::Red),
                (3, 10, PuyoColor::Red),
            ],
        );
        assert!(resolve_once(&mut grid, 1).is_none());
    }

    #[test]
    fn test_two_groups_clear_in_one_round() {
        let mut grid = Grid::new();
        // Four reds in column 0, four blues in column 5
        for y in 8..12 {
            grid.set(0, y, Some(PuyoColor::Red)).unwrap();
            grid.set(5, y, Some(PuyoColor::Blue)).unwrap();
        }
        let round = resolve_once(&mut grid, 1).unwrap();
        assert_eq!(round.cleared_count(), 8);
        assert_eq!(round.score, 8 * CELL_SCORE + CHAIN_BONUS);
    }

    #[test]
    fn test_adjacent_garbage_clears_without_spreading() {
        let mut grid = Grid::new();
        // Vertical red group with garbage beside it, and a second garbage
        // only adjacent to the first garbage
        for y in 8..12 {
            grid.set(0, y, Some(PuyoColor::Red)).unwrap();
        }
        grid.set(1, 11, Some(PuyoColor::Garbage)).unwrap();
        grid.set(2, 11, Some(PuyoColor::Garbage)).unwrap();

        let round = resolve_once(&mut grid, 1).unwrap();
        assert_eq!(round.cleared_count(), 5);
        assert!(round
            .cleared
            .contains(&((1, 11), PuyoColor::Garbage)));
        // The second garbage survives and falls to the floor
        assert_eq!(grid.get(2, 11), Ok(Some(PuyoColor::Garbage)));
    }

    #[test]
    fn test_cleared_positions_report_pre_clear_colors() {
        let mut grid = Grid::new();
        for y in 8..12 {
            grid.set(3, y, Some(PuyoColor::Yellow)).unwrap();
        }
        let round = resolve_once(&mut grid, 1).unwrap();
        for ((x, _), color) in &round.cleared {
            assert_eq!(*x, 3);
            assert_eq!(*color, PuyoColor::Yellow);
        }
        // Row-major order means ascending y within the single column
        let ys: Vec<i8> = round.cleared.iter().map(|((_, y), _)| *y).collect();
        assert_eq!(ys, vec![8, 9, 10, 11]);
    }

    #[test]
    fn test_cascade_two_rounds() {
        let mut grid = Grid::new();
        // Column 0: Blue on top of four Reds. Column 1: three Blues on the
        // floor. Clearing the reds drops the blue next to its three
        // neighbors for a second round.
        fill(
            &mut grid,
            &[
                (0, 7, PuyoColor::Blue),
                (0, 8, PuyoColor::Red),
                (0, 9, PuyoColor::Red),
                (0, 10, PuyoColor::Red),
                (0, 11, PuyoColor::Red),
                (1, 9, PuyoColor::Blue),
                (1, 10, PuyoColor::Blue),
                (1, 11, PuyoColor::Blue),
            ],
        );

        let rounds = resolve_all(&mut grid);
        assert_eq!(rounds.len(), 2);

        assert_eq!(rounds[0].index, 1);
        assert_eq!(rounds[0].cleared_count(), 4);
        assert_eq!(rounds[0].score, 4 * CELL_SCORE + CHAIN_BONUS);

        assert_eq!(rounds[1].index, 2);
        assert_eq!(rounds[1].cleared_count(), 4);
        assert_eq!(rounds[1].score, 4 * CELL_SCORE + 2 * CHAIN_BONUS);

        assert!(grid.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_resolve_all_empty_grid() {
        let mut grid = Grid::new();
        assert!(resolve_all(&mut grid).is_empty());
    }
}
