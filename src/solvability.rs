//! Reachability test by permutation parity.
//!
//! On a board of odd width every move either slides a tile sideways (the
//! blank-free reading order is unchanged) or past two other tiles (the
//! inversion count changes by 0 or 2). Inversion parity is therefore invariant,
//! and two boards are mutually reachable exactly when their parities agree.
use crate::engine::{Board, BLANK};
use crate::heuristics::Goal;

/// Counts pairs of tiles that appear in the wrong relative order when the board
/// is read row by row with the blank left out.
pub fn count_inversions(board: &Board) -> usize {
    let tiles: Vec<u8> = board
        .flatten()
        .into_iter()
        .filter(|&tile| tile != BLANK)
        .collect();
    let mut inversions = 0;
    for (i, &earlier) in tiles.iter().enumerate() {
        inversions += tiles[i + 1..].iter().filter(|&&later| earlier > later).count();
    }
    inversions
}

/// Returns `true` if `board` can reach the standard goal `[[1,2,3],[4,5,6],[7,8,0]]`.
///
/// The standard goal has no inversions, so a board is solvable exactly when its
/// own inversion count is even.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::solvability::is_solvable;
///
/// let two_moves_away = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
/// assert!(is_solvable(&two_moves_away));
///
/// let swapped = Board::from_grid([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
/// assert!(!is_solvable(&swapped));
/// ```
pub fn is_solvable(board: &Board) -> bool {
    count_inversions(board) % 2 == 0
}

impl Goal {
    /// Returns `true` if `board` can be slid into this goal.
    pub fn is_reachable_from(&self, board: &Board) -> bool {
        count_inversions(board) % 2 == count_inversions(self.board()) % 2
    }
}
