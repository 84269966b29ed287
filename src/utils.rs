use crate::engine::{Board, BoardError, BLANK, BOARD_SIZE};

/// Parses an array of string slices into a `Board`.
///
/// Each string slice represents one row, starting from row 0. A row is either
/// three tokens separated by whitespace, commas or brackets (`"1 2 3"`,
/// `"1,2,3"`, `"[1, 2, 3]"`), or three characters written together (`"123"`).
/// The blank may be written as `0`, `_` or `.`.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`), one per board row.
///
/// # Returns
/// * `Ok(Board)` if the rows describe a valid 3x3 board.
/// * `Err(BoardError)` if:
///     - There are not exactly three rows, or a row does not hold three tiles.
///     - A token is not a number or a blank marker.
///     - The numbers are not a permutation of `0..=8`.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::board_from_str_array;
/// use eight_puzzle_solver::engine::BoardError;
///
/// let board = board_from_str_array(&["1 2 3", "4 _ 6", "7 5 8"]).unwrap();
/// assert_eq!(board.tile(1, 1), 0);
/// assert_eq!(board_from_str_array(&["123", "4.6", "758"]), Ok(board));
///
/// let too_few = board_from_str_array(&["1 2 3", "4 5 6"]);
/// assert_eq!(too_few, Err(BoardError::InvalidRowCount { found: 2 }));
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardError> {
    if s.len() != BOARD_SIZE {
        return Err(BoardError::InvalidRowCount { found: s.len() });
    }

    let mut rows = Vec::with_capacity(BOARD_SIZE);
    for (r, row_str) in s.iter().enumerate() {
        let mut tokens: Vec<String> = row_str
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']'))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        // A single run of exactly three characters is the compact "123" form.
        if tokens.len() == 1 && tokens[0].chars().count() == BOARD_SIZE {
            tokens = tokens[0].chars().map(String::from).collect();
        }

        let row = tokens
            .iter()
            .map(|token| parse_tile(r, token))
            .collect::<Result<Vec<u8>, BoardError>>()?;
        rows.push(row);
    }
    Board::from_rows(&rows)
}

/// Parses a whole board file: blank lines and lines starting with `#` are skipped,
/// the remaining lines are handed to `board_from_str_array`.
pub fn board_from_text(text: &str) -> Result<Board, BoardError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    board_from_str_array(&lines)
}

fn parse_tile(row: usize, token: &str) -> Result<u8, BoardError> {
    match token {
        "_" | "." => Ok(BLANK),
        _ => token.parse::<u8>().map_err(|_| BoardError::InvalidToken {
            row,
            token: token.to_string(),
        }),
    }
}
