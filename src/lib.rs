//! # 8-Puzzle Solver Library
//!
//! This library provides a state-space search engine for the 3x3 sliding puzzle:
//! A* over two admissible heuristics, iterative-deepening depth-first search, and
//! a parity check that rejects unsolvable boards before any search starts.
//!
//! It is used by two binaries:
//! - `puzzle_solver`: Loads (or generates) a board and solves it with the
//!   selected engines, optionally tracing every expanded board.
//! - `heuristic_evaluator`: Compares how many boards A* expands with each
//!   heuristic over a set of seeded random puzzles.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), moves (`Move`) and the goal constant.
//! - `heuristics`: The injectable `Goal` and the misplaced-tile and Manhattan estimates.
//! - `solvability`: Inversion counting and the parity-based solvability check.
//! - `solver`: The A* and IDDFS engines, their results and progress events.
//! - `driver`: Runs the solvability check and a configured list of engines.
//! - `utils`: Parsing boards from text.
//!
//! ## Example
//! ```
//! use eight_puzzle_solver::driver::{solve, SolverConfig};
//! use eight_puzzle_solver::heuristics::Goal;
//! use eight_puzzle_solver::utils::board_from_str_array;
//!
//! let start = board_from_str_array(&["1 2 3", "4 0 6", "7 5 8"]).unwrap();
//! let report = solve(&start, &Goal::standard(), &SolverConfig::default(), |_| {}).unwrap();
//! assert_eq!(report.best().unwrap().path(), "DR");
//! ```

pub mod driver;
pub mod engine;
pub mod heuristics;
pub mod solvability;
pub mod solver;
pub mod utils;
