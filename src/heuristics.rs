//! Admissible distance estimates from a board to a goal.
//!
//! Both estimates ignore the blank, never overestimate the number of moves left
//! and are consistent, so A* never has to reopen a closed board. Manhattan
//! distance is never below the misplaced-tile count.
use crate::engine::{Board, BOARD_SIZE, BLANK, CELL_COUNT, GOAL};
use std::fmt;

/// The target arrangement a search is trying to reach.
///
/// Besides the board itself, a `Goal` keeps a lookup from tile value to its
/// target `(row, column)` so that Manhattan distance costs one pass over the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal {
    board: Board,
    positions: [(usize, usize); CELL_COUNT],
}

impl Goal {
    /// Builds a goal from any valid board.
    pub fn new(board: Board) -> Self {
        let mut positions = [(0, 0); CELL_COUNT];
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                positions[usize::from(board.tile(r, c))] = (r, c);
            }
        }
        Goal { board, positions }
    }

    /// The usual goal, `[[1,2,3],[4,5,6],[7,8,0]]`.
    pub fn standard() -> Self {
        Goal::new(GOAL)
    }

    /// Returns the target board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns where `tile` sits in the target board.
    ///
    /// # Panics
    /// Panics if `tile` is not in `0..=8`.
    pub fn position_of(&self, tile: u8) -> (usize, usize) {
        self.positions[usize::from(tile)]
    }

    /// Returns `true` if `board` is the target arrangement.
    pub fn is_reached_by(&self, board: &Board) -> bool {
        *board == self.board
    }
}

impl Default for Goal {
    fn default() -> Self {
        Goal::standard()
    }
}

/// Counts the non-blank tiles that are not where the goal wants them.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::{misplaced, Goal};
///
/// let board = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
/// assert_eq!(misplaced(&board, &Goal::standard()), 2);
/// ```
pub fn misplaced(board: &Board, goal: &Goal) -> u32 {
    let mut count = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let tile = board.tile(r, c);
            if tile != BLANK && tile != goal.board.tile(r, c) {
                count += 1;
            }
        }
    }
    count
}

/// Sums, over the non-blank tiles, the row plus column distance to each tile's goal cell.
pub fn manhattan(board: &Board, goal: &Goal) -> u32 {
    let mut distance = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let tile = board.tile(r, c);
            if tile != BLANK {
                let (goal_r, goal_c) = goal.position_of(tile);
                distance += r.abs_diff(goal_r) + c.abs_diff(goal_c);
            }
        }
    }
    u32::try_from(distance)
        .unwrap_or_else(|_| unreachable!("8 tiles travel at most 32 cells in total"))
}

/// Selects which estimate A* orders its frontier by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Number of misplaced tiles.
    Misplaced,
    /// Sum of Manhattan distances.
    Manhattan,
}

impl Heuristic {
    /// Both heuristics, weakest first.
    pub const ALL: [Heuristic; 2] = [Heuristic::Misplaced, Heuristic::Manhattan];

    /// Estimates the moves left from `board` to `goal`.
    pub fn evaluate(self, board: &Board, goal: &Goal) -> u32 {
        match self {
            Heuristic::Misplaced => misplaced(board, goal),
            Heuristic::Manhattan => manhattan(board, goal),
        }
    }

    /// Human-readable name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Misplaced => "Misplaced Tiles",
            Heuristic::Manhattan => "Manhattan Distance",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
