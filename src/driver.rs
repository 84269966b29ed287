//! Orchestrates a solve request: solvability check first, then each configured engine.
use crate::engine::Board;
use crate::heuristics::{Goal, Heuristic};
use crate::solver::{astar, iddfs, SearchError, SearchEvent, Solution, Strategy};

/// Depth bound IDDFS gets unless the caller chooses another.
pub const DEFAULT_IDDFS_MAX_DEPTH: u32 = 20;

/// Which engines a solve request runs, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Strategies to run against the same start board.
    pub strategies: Vec<Strategy>,
}

impl SolverConfig {
    /// A configuration running a single strategy.
    pub fn single(strategy: Strategy) -> Self {
        SolverConfig {
            strategies: vec![strategy],
        }
    }
}

impl Default for SolverConfig {
    /// A* with misplaced tiles, A* with Manhattan distance, then IDDFS to depth 20.
    fn default() -> Self {
        SolverConfig {
            strategies: vec![
                Strategy::AStar(Heuristic::Misplaced),
                Strategy::AStar(Heuristic::Manhattan),
                Strategy::Iddfs {
                    max_depth: DEFAULT_IDDFS_MAX_DEPTH,
                },
            ],
        }
    }
}

/// Outcome of one engine on one board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineRun {
    /// The engine that ran.
    pub strategy: Strategy,
    /// Its solution, or why it stopped without one.
    pub outcome: Result<Solution, SearchError>,
}

/// Results of every engine a request ran, in configuration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    /// The board that was solved.
    pub start: Board,
    /// One entry per configured strategy.
    pub runs: Vec<EngineRun>,
}

impl SolveReport {
    /// Returns the shortest solution any engine found.
    pub fn best(&self) -> Option<&Solution> {
        self.runs
            .iter()
            .filter_map(|run| run.outcome.as_ref().ok())
            .min_by_key(|solution| solution.steps)
    }
}

/// Rejects a start board whose parity differs from the goal's, logging the
/// rejection at `info` level.
pub fn check_reachable(start: &Board, goal: &Goal) -> Result<(), SearchError> {
    if goal.is_reachable_from(start) {
        Ok(())
    } else {
        log::info!("{start:?} cannot reach {:?}; skipping search", goal.board());
        Err(SearchError::Unsolvable)
    }
}

/// Runs one strategy without any solvability check.
pub fn run_strategy<F>(
    start: &Board,
    goal: &Goal,
    strategy: Strategy,
    observer: F,
) -> Result<Solution, SearchError>
where
    F: FnMut(&SearchEvent),
{
    match strategy {
        Strategy::AStar(heuristic) => astar(start, goal, heuristic, observer),
        Strategy::Iddfs { max_depth } => iddfs(start, goal, max_depth, observer),
    }
}

/// Checks solvability, then runs a single strategy.
///
/// # Returns
/// * `Err(SearchError::Unsolvable)` without searching if `start` cannot reach `goal`.
/// * Otherwise whatever the engine returns.
pub fn solve_with<F>(
    start: &Board,
    goal: &Goal,
    strategy: Strategy,
    observer: F,
) -> Result<Solution, SearchError>
where
    F: FnMut(&SearchEvent),
{
    check_reachable(start, goal)?;
    run_strategy(start, goal, strategy, observer)
}

/// Checks solvability, then runs every strategy in `config` against `start`.
///
/// The observer receives events from every engine in turn. Failures of
/// individual engines (such as IDDFS hitting its depth bound) are recorded in the
/// report rather than aborting the remaining runs.
///
/// # Returns
/// * `Ok(SolveReport)` with one entry per strategy.
/// * `Err(SearchError::Unsolvable)` if `start` has the wrong parity; no engine runs.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::driver::{solve, SolverConfig};
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::Goal;
/// use eight_puzzle_solver::solver::SearchError;
///
/// let goal = Goal::standard();
/// let start = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
/// let report = solve(&start, &goal, &SolverConfig::default(), |_| {}).unwrap();
/// assert!(report.runs.iter().all(|run| run.outcome.as_ref().unwrap().path() == "DR"));
///
/// let swapped = Board::from_grid([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
/// let err = solve(&swapped, &goal, &SolverConfig::default(), |_| {}).unwrap_err();
/// assert_eq!(err, SearchError::Unsolvable);
/// ```
pub fn solve<F>(
    start: &Board,
    goal: &Goal,
    config: &SolverConfig,
    mut observer: F,
) -> Result<SolveReport, SearchError>
where
    F: FnMut(&SearchEvent),
{
    check_reachable(start, goal)?;

    let mut runs = Vec::with_capacity(config.strategies.len());
    for &strategy in &config.strategies {
        log::debug!("running {strategy}");
        let outcome = run_strategy(start, goal, strategy, &mut observer);
        match &outcome {
            Ok(solution) => log::info!(
                "{strategy}: {} moves ({}), {} boards expanded",
                solution.steps,
                solution.path(),
                solution.nodes_expanded
            ),
            Err(err) => log::info!("{strategy}: {err}"),
        }
        runs.push(EngineRun { strategy, outcome });
    }

    Ok(SolveReport {
        start: *start,
        runs,
    })
}
