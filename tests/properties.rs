//! Property-based and exhaustive checks of the search engines.
//!
//! Optimal move counts are cross-checked against a plain breadth-first search,
//! and the parity test against the full reachable state space.

use eight_puzzle_solver::driver::{solve, SolverConfig};
use eight_puzzle_solver::engine::{Board, CELL_COUNT, GOAL};
use eight_puzzle_solver::heuristics::{manhattan, misplaced, Goal, Heuristic};
use eight_puzzle_solver::solvability::is_solvable;
use eight_puzzle_solver::solver::{astar, iddfs, SearchError};
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

// ===== Helpers =====

/// Fewest moves from `start` to the goal, by breadth-first search.
fn bfs_distance(start: &Board) -> u32 {
    let mut seen = HashSet::from([*start]);
    let mut queue = VecDeque::from([(*start, 0)]);
    while let Some((board, distance)) = queue.pop_front() {
        if board == GOAL {
            return distance;
        }
        for (next, _) in board.successors() {
            if seen.insert(next) {
                queue.push_back((next, distance + 1));
            }
        }
    }
    panic!("{start} cannot reach the goal");
}

/// Every board reachable from the goal.
fn reachable_from_goal() -> HashSet<Board> {
    let mut seen = HashSet::from([GOAL]);
    let mut queue = VecDeque::from([GOAL]);
    while let Some(board) = queue.pop_front() {
        for (next, _) in board.successors() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// All 9! arrangements of `0..=8`, in lexicographic order.
fn all_permutations() -> Vec<[u8; CELL_COUNT]> {
    let mut current = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    let mut permutations = vec![current];
    loop {
        let Some(i) = (0..CELL_COUNT - 1).rev().find(|&i| current[i] < current[i + 1]) else {
            break;
        };
        let j = (i + 1..CELL_COUNT)
            .rev()
            .find(|&j| current[j] > current[i])
            .unwrap();
        current.swap(i, j);
        current[i + 1..].reverse();
        permutations.push(current);
    }
    permutations
}

// ===== Strategies =====

/// Any arrangement of the nine cells, solvable or not.
fn arb_board() -> impl Strategy<Value = Board> {
    Just((0u8..CELL_COUNT as u8).collect::<Vec<u8>>())
        .prop_shuffle()
        .prop_map(|cells| {
            let mut flat = [0u8; CELL_COUNT];
            flat.copy_from_slice(&cells);
            Board::from_flat(flat).unwrap()
        })
}

/// Solvable boards a short random walk from the goal.
fn arb_scrambled() -> impl Strategy<Value = Board> {
    (any::<u64>(), 0usize..14).prop_map(|(seed, moves)| Board::scrambled(seed, moves))
}

// ===== Exhaustive checks =====

#[test]
fn solvability_matches_reachability_for_every_permutation() {
    let reachable = reachable_from_goal();
    assert_eq!(reachable.len(), 181_440);

    let mut solvable = 0;
    let mut unsolvable = 0;
    for cells in all_permutations() {
        let board = Board::from_flat(cells).unwrap();
        let parity_says = is_solvable(&board);
        assert_eq!(parity_says, reachable.contains(&board), "{board}");
        if parity_says {
            solvable += 1;
        } else {
            unsolvable += 1;
        }
    }
    assert_eq!(solvable, 181_440);
    assert_eq!(unsolvable, 181_440);
}

#[test]
fn two_move_and_swapped_boards() {
    let goal = Goal::standard();

    let start = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
    assert!(is_solvable(&start));
    let report = solve(&start, &goal, &SolverConfig::default(), |_| {}).unwrap();
    for run in &report.runs {
        let solution = run.outcome.as_ref().unwrap();
        assert_eq!(solution.steps, 2);
        assert_eq!(solution.path(), "DR");
    }

    let swapped = Board::from_grid([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
    let mut engine_events = 0;
    let result = solve(&swapped, &goal, &SolverConfig::default(), |_| engine_events += 1);
    assert_eq!(result, Err(SearchError::Unsolvable));
    assert_eq!(engine_events, 0);
}

#[test]
fn manhattan_never_expands_more_than_misplaced() {
    let goal = Goal::standard();
    for seed in 0..120u64 {
        let start = Board::scrambled(seed, 8 + (seed % 24) as usize);
        let misplaced_run = astar(&start, &goal, Heuristic::Misplaced, |_| {}).unwrap();
        let manhattan_run = astar(&start, &goal, Heuristic::Manhattan, |_| {}).unwrap();
        assert_eq!(manhattan_run.steps, misplaced_run.steps, "seed {seed}");
        assert!(
            manhattan_run.nodes_expanded <= misplaced_run.nodes_expanded,
            "seed {seed}: manhattan expanded {}, misplaced {}\n{start}",
            manhattan_run.nodes_expanded,
            misplaced_run.nodes_expanded
        );
    }
}

// ===== Property Tests =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_manhattan_dominates_misplaced(board in arb_board()) {
        let goal = Goal::standard();
        prop_assert!(manhattan(&board, &goal) >= misplaced(&board, &goal));
    }

    #[test]
    fn prop_move_then_inverse_is_identity(board in arb_board()) {
        for (next, mv) in board.successors() {
            prop_assert_eq!(next.apply_move(mv.inverse()), Some(board));
        }
    }

    #[test]
    fn prop_heuristics_are_admissible(board in arb_scrambled()) {
        let goal = Goal::standard();
        let optimum = bfs_distance(&board);
        for heuristic in Heuristic::ALL {
            prop_assert!(heuristic.evaluate(&board, &goal) <= optimum);
        }
    }

    #[test]
    fn prop_astar_is_optimal(board in arb_scrambled()) {
        let goal = Goal::standard();
        let optimum = bfs_distance(&board);
        for heuristic in Heuristic::ALL {
            let solution = astar(&board, &goal, heuristic, |_| {}).unwrap();
            prop_assert_eq!(solution.steps, optimum);
            prop_assert_eq!(solution.moves.len() as u32, optimum);
            prop_assert_eq!(board.apply_moves(&solution.moves), Some(GOAL));
        }
    }

    #[test]
    fn prop_astar_is_deterministic(board in arb_scrambled()) {
        let goal = Goal::standard();
        let first = astar(&board, &goal, Heuristic::Misplaced, |_| {}).unwrap();
        let second = astar(&board, &goal, Heuristic::Misplaced, |_| {}).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_iddfs_depth_bound_is_tight(board in arb_scrambled()) {
        let goal = Goal::standard();
        let optimum = bfs_distance(&board);

        let solution = iddfs(&board, &goal, optimum, |_| {}).unwrap();
        prop_assert_eq!(solution.steps, optimum);
        prop_assert_eq!(board.apply_moves(&solution.moves), Some(GOAL));

        if optimum > 0 {
            prop_assert_eq!(
                iddfs(&board, &goal, optimum - 1, |_| {}),
                Err(SearchError::DepthExhausted { max_depth: optimum - 1 })
            );
        }
    }

    #[test]
    fn prop_unsolvable_boards_never_search(board in arb_board()) {
        prop_assume!(!is_solvable(&board));
        let mut events = 0;
        let result = solve(&board, &Goal::standard(), &SolverConfig::default(), |_| events += 1);
        prop_assert_eq!(result, Err(SearchError::Unsolvable));
        prop_assert_eq!(events, 0);
    }
}
