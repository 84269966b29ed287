//! Board representation for the 3x3 sliding puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: The four directions the blank can travel, in their fixed generation order.
//! - `Board`: An immutable 3x3 arrangement of tiles `1..=8` and one blank (`0`),
//!   with move application, successor enumeration and seeded random generation.
//! - `BoardError`: Reasons a grid of numbers is not a valid puzzle board.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, blank included.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Value used for the blank cell.
pub const BLANK: u8 = 0;

/// The solved arrangement `[[1,2,3],[4,5,6],[7,8,0]]`.
pub const GOAL: Board = Board {
    cells: [1, 2, 3, 4, 5, 6, 7, 8, BLANK],
};

/// A direction the blank travels when a move is made.
///
/// Moving the blank `Down` slides the tile below it up, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// The blank swaps with the tile below it.
    Down,
    /// The blank swaps with the tile above it.
    Up,
    /// The blank swaps with the tile to its right.
    Right,
    /// The blank swaps with the tile to its left.
    Left,
}

impl Move {
    /// All moves in generation order.
    ///
    /// Successors are always produced in this order, which together with the
    /// frontier tie-break decides which of several optimal paths a search returns.
    pub const ALL: [Move; 4] = [Move::Down, Move::Up, Move::Right, Move::Left];

    /// Returns the single-character label of the move.
    ///
    /// # Examples
    ///
    /// ```
    /// use eight_puzzle_solver::engine::Move;
    /// assert_eq!(Move::Down.label(), 'D');
    /// assert_eq!(Move::Left.label(), 'L');
    /// ```
    pub fn label(self) -> char {
        match self {
            Move::Down => 'D',
            Move::Up => 'U',
            Move::Right => 'R',
            Move::Left => 'L',
        }
    }

    /// Parses a move from its label. Returns `None` for any other character.
    pub fn from_label(label: char) -> Option<Move> {
        match label {
            'D' => Some(Move::Down),
            'U' => Some(Move::Up),
            'R' => Some(Move::Right),
            'L' => Some(Move::Left),
            _ => None,
        }
    }

    /// Returns the move that undoes this one.
    pub fn inverse(self) -> Move {
        match self {
            Move::Down => Move::Up,
            Move::Up => Move::Down,
            Move::Right => Move::Left,
            Move::Left => Move::Right,
        }
    }

    /// Row and column delta applied to the blank's position.
    fn offset(self) -> (isize, isize) {
        match self {
            Move::Down => (1, 0),
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Left => (0, -1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Renders a sequence of moves as its label string, e.g. `"DR"`.
pub fn moves_to_labels(moves: &[Move]) -> String {
    moves.iter().map(|mv| mv.label()).collect()
}

/// Reasons a grid of numbers is rejected as a puzzle board.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The grid does not have exactly `BOARD_SIZE` rows.
    #[display("expected 3 rows, found {found}")]
    InvalidRowCount {
        /// Number of rows supplied.
        found: usize,
    },
    /// A row does not have exactly `BOARD_SIZE` cells.
    #[display("row {row} has {found} cells (expected 3)")]
    InvalidRowLength {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of cells in that row.
        found: usize,
    },
    /// A cell holds a value outside `0..=8`.
    #[display("tile {value} is out of range (expected 0..=8)")]
    TileOutOfRange {
        /// The offending value.
        value: u8,
    },
    /// A value appears more than once, so some other value is missing.
    #[display("tile {value} appears more than once")]
    DuplicateTile {
        /// The repeated value.
        value: u8,
    },
    /// Text input contained something that is not a tile.
    #[display("unrecognized token '{token}' in row {row}")]
    InvalidToken {
        /// Zero-based index of the offending row.
        row: usize,
        /// The token as written.
        token: String,
    },
}

/// An immutable 3x3 tile arrangement.
///
/// Cells are stored flattened in row-major order. The derived ordering compares
/// that flattened form lexicographically, which is the ordering the A* frontier
/// uses to break ties between nodes with equal `f` and `g`.
///
/// Every `Board` holds a permutation of `0..=8`; the constructors reject anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    cells: [u8; CELL_COUNT],
}

impl Board {
    /// Returns the solved board.
    pub fn goal() -> Self {
        GOAL
    }

    /// Creates a board from a row-major array of cells.
    ///
    /// # Arguments
    /// * `cells`: Nine values, row-major, `0` marking the blank.
    ///
    /// # Returns
    /// * `Ok(Board)` if `cells` is a permutation of `0..=8`.
    /// * `Err(BoardError)` naming the first out-of-range or repeated value otherwise.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, BoardError};
    ///
    /// let board = Board::from_flat([1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
    /// assert_eq!(board.blank_position(), (1, 1));
    ///
    /// let err = Board::from_flat([1, 1, 3, 4, 0, 6, 7, 5, 8]).unwrap_err();
    /// assert_eq!(err, BoardError::DuplicateTile { value: 1 });
    /// ```
    pub fn from_flat(cells: [u8; CELL_COUNT]) -> Result<Self, BoardError> {
        let mut seen = [false; CELL_COUNT];
        for &value in &cells {
            let slot = seen
                .get_mut(usize::from(value))
                .ok_or(BoardError::TileOutOfRange { value })?;
            if *slot {
                return Err(BoardError::DuplicateTile { value });
            }
            *slot = true;
        }
        Ok(Board { cells })
    }

    /// Creates a board from a 3x3 grid, validating that it holds each of `0..=8` once.
    pub fn from_grid(grid: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, BoardError> {
        let mut cells = [BLANK; CELL_COUNT];
        for (r, row) in grid.iter().enumerate() {
            cells[r * BOARD_SIZE..(r + 1) * BOARD_SIZE].copy_from_slice(row);
        }
        Self::from_flat(cells)
    }

    /// Creates a board from rows of arbitrary length, rejecting grids that are not 3x3.
    ///
    /// This is the entry point for externally supplied grids whose shape is not
    /// guaranteed by the type system.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::InvalidRowCount { found: rows.len() });
        }
        let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != BOARD_SIZE {
                return Err(BoardError::InvalidRowLength {
                    row: r,
                    found: row.len(),
                });
            }
            grid[r].copy_from_slice(row);
        }
        Self::from_grid(grid)
    }

    /// Creates a uniformly random board from a seed.
    ///
    /// Half of all permutations are unreachable from the goal, so the result may be
    /// unsolvable. The same seed always produces the same board.
    pub fn new_random_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cells = GOAL.cells;
        cells.shuffle(&mut rng);
        Board { cells }
    }

    /// Creates a solvable board by walking the blank `moves` random steps away from the goal.
    ///
    /// The walk never immediately undoes its previous step, but it may still revisit
    /// earlier boards, so the optimal solution can be shorter than `moves`.
    pub fn scrambled(seed: u64, moves: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = GOAL;
        let mut last: Option<Move> = None;
        for _ in 0..moves {
            let options: Vec<(Board, Move)> = board
                .successors()
                .into_iter()
                .filter(|&(_, mv)| Some(mv.inverse()) != last)
                .collect();
            // Every cell has at least two neighbours, so one option always survives.
            let (next, mv) = options[rng.gen_range(0..options.len())];
            board = next;
            last = Some(mv);
        }
        board
    }

    /// Returns the value at row `r`, column `c` (`0` for the blank).
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `BOARD_SIZE`.
    pub fn tile(&self, r: usize, c: usize) -> u8 {
        assert!(r < BOARD_SIZE && c < BOARD_SIZE, "cell ({r}, {c}) is off the board");
        self.cells[r * BOARD_SIZE + c]
    }

    /// Returns the canonical row-major flattening used as the visited-set key.
    pub fn flatten(&self) -> [u8; CELL_COUNT] {
        self.cells
    }

    /// Returns the board as a 3x3 grid.
    pub fn grid(&self) -> [[u8; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[r * BOARD_SIZE..(r + 1) * BOARD_SIZE]);
        }
        grid
    }

    /// Returns the `(row, column)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        let index = self
            .cells
            .iter()
            .position(|&v| v == BLANK)
            .unwrap_or_else(|| unreachable!("validated boards always hold a blank"));
        (index / BOARD_SIZE, index % BOARD_SIZE)
    }

    /// Slides the blank one step in the direction of `mv`.
    ///
    /// # Returns
    /// * `Some(Board)` holding the new arrangement; `self` is left unchanged.
    /// * `None` if the move would take the blank off the board.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, Move};
    ///
    /// let goal = Board::goal();
    /// assert!(goal.apply_move(Move::Down).is_none()); // blank is in the bottom row
    /// let moved = goal.apply_move(Move::Up).unwrap();
    /// assert_eq!(moved.tile(2, 2), 6);
    /// assert_eq!(moved.apply_move(Move::Down), Some(goal));
    /// ```
    pub fn apply_move(&self, mv: Move) -> Option<Board> {
        let (row, col) = self.blank_position();
        let (dr, dc) = mv.offset();
        let new_row = row.checked_add_signed(dr)?;
        let new_col = col.checked_add_signed(dc)?;
        if new_row >= BOARD_SIZE || new_col >= BOARD_SIZE {
            return None;
        }
        let mut cells = self.cells;
        cells.swap(row * BOARD_SIZE + col, new_row * BOARD_SIZE + new_col);
        Some(Board { cells })
    }

    /// Applies a whole move sequence, returning `None` as soon as a move is illegal.
    pub fn apply_moves(&self, moves: &[Move]) -> Option<Board> {
        moves
            .iter()
            .try_fold(*self, |board, &mv| board.apply_move(mv))
    }

    /// Enumerates the boards one move away, paired with the move that reaches each.
    ///
    /// Moves are tried in `Move::ALL` order (Down, Up, Right, Left) and those that
    /// would leave the board are skipped, so a corner blank yields two successors,
    /// an edge blank three and the centre blank four.
    pub fn successors(&self) -> Vec<(Board, Move)> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply_move(mv).map(|next| (next, mv)))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        GOAL
    }
}

impl fmt::Display for Board {
    /// Formats the board as three rows of space-separated tiles, the blank shown as `_`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if c > 0 {
                    write!(f, " ")?;
                }
                match self.tile(r, c) {
                    BLANK => write!(f, "_")?,
                    value => write!(f, "{value}")?,
                }
            }
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvability::is_solvable;

    fn center_blank() -> Board {
        Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap()
    }

    #[test]
    fn test_goal_constant_is_valid() {
        assert_eq!(Board::from_flat(GOAL.flatten()), Ok(GOAL));
        assert_eq!(Board::goal().grid(), [[1, 2, 3], [4, 5, 6], [7, 8, 0]]);
        assert!(crate::heuristics::Goal::standard().is_reached_by(&Board::goal()));
        assert_eq!(Board::default(), GOAL);
    }

    #[test]
    fn test_from_flat_rejects_out_of_range() {
        let err = Board::from_flat([1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap_err();
        assert_eq!(err, BoardError::TileOutOfRange { value: 9 });
    }

    #[test]
    fn test_from_grid_rejects_duplicates() {
        let err = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 7, 0]]).unwrap_err();
        assert_eq!(err, BoardError::DuplicateTile { value: 7 });
    }

    #[test]
    fn test_from_rows_rejects_wrong_shape() {
        let two_rows: [&[u8]; 2] = [&[1, 2, 3], &[4, 5, 6]];
        assert_eq!(
            Board::from_rows(&two_rows),
            Err(BoardError::InvalidRowCount { found: 2 })
        );

        let short_row = vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8, 0]];
        assert_eq!(
            Board::from_rows(&short_row),
            Err(BoardError::InvalidRowLength { row: 1, found: 2 })
        );

        let ok = vec![vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]];
        assert_eq!(Board::from_rows(&ok), Ok(center_blank()));
    }

    #[test]
    fn test_tile_and_flatten() {
        let board = center_blank();
        assert_eq!(board.tile(1, 1), 0);
        assert_eq!(board.tile(2, 1), 5);
        assert_eq!(board.flatten(), [1, 2, 3, 4, 0, 6, 7, 5, 8]);
        assert_eq!(board.blank_position(), (1, 1));
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn test_tile_out_of_bounds_panics() {
        GOAL.tile(3, 0);
    }

    #[test]
    fn test_successors_center_blank_order() {
        let successors = center_blank().successors();
        let moves: Vec<Move> = successors.iter().map(|&(_, mv)| mv).collect();
        assert_eq!(moves, Move::ALL.to_vec());

        let (down, _) = successors[0];
        assert_eq!(down.grid(), [[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        let (left, _) = successors[3];
        assert_eq!(left.grid(), [[1, 2, 3], [0, 4, 6], [7, 5, 8]]);
    }

    #[test]
    fn test_successors_corner_and_edge_blank() {
        let corner: Vec<Move> = GOAL.successors().into_iter().map(|(_, mv)| mv).collect();
        assert_eq!(corner, vec![Move::Up, Move::Left]);

        let edge = Board::from_grid([[1, 0, 3], [4, 2, 6], [7, 5, 8]]).unwrap();
        let moves: Vec<Move> = edge.successors().into_iter().map(|(_, mv)| mv).collect();
        assert_eq!(moves, vec![Move::Down, Move::Right, Move::Left]);
    }

    #[test]
    fn test_move_then_inverse_restores_board() {
        let start = center_blank();
        for (next, mv) in start.successors() {
            assert_eq!(next.apply_move(mv.inverse()), Some(start));
        }
        let down_up = start
            .apply_move(Move::Down)
            .and_then(|b| b.apply_move(Move::Up));
        assert_eq!(down_up, Some(start));
    }

    #[test]
    fn test_apply_moves_stops_on_illegal_move() {
        let start = center_blank();
        assert_eq!(start.apply_moves(&[Move::Down, Move::Right]), Some(GOAL));
        assert_eq!(start.apply_moves(&[Move::Down, Move::Down]), None);
        assert_eq!(start.apply_moves(&[]), Some(start));
    }

    #[test]
    fn test_move_labels_round_trip() {
        for mv in Move::ALL {
            assert_eq!(Move::from_label(mv.label()), Some(mv));
            assert_eq!(mv.inverse().inverse(), mv);
        }
        assert_eq!(Move::from_label('X'), None);
        assert_eq!(moves_to_labels(&[Move::Down, Move::Right]), "DR");
        assert_eq!(moves_to_labels(&[]), "");
    }

    #[test]
    fn test_display_board_formatting() {
        assert_eq!(center_blank().to_string(), "1 2 3\n4 _ 6\n7 5 8");
    }

    #[test]
    fn test_board_ordering_follows_flattened_form() {
        let a = Board::from_flat([0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let b = Board::from_flat([0, 1, 2, 3, 4, 5, 6, 8, 7]).unwrap();
        assert!(a < b);
        assert!(center_blank() < GOAL);
    }

    #[test]
    fn test_new_random_with_seed_determinism() {
        let first = Board::new_random_with_seed(42);
        let second = Board::new_random_with_seed(42);
        assert_eq!(first, second);
        assert!(Board::from_flat(first.flatten()).is_ok());
    }

    #[test]
    fn test_scrambled_boards_stay_solvable() {
        for seed in 0..20 {
            let board = Board::scrambled(seed, 25);
            assert!(is_solvable(&board), "seed {seed} produced {board}");
            assert_eq!(board, Board::scrambled(seed, 25));
        }
        assert_eq!(Board::scrambled(7, 0), GOAL);
    }
}
