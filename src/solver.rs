//! A* and iterative-deepening search over puzzle boards.
//!
//! Both engines take the goal as an argument and report progress through a
//! caller-supplied observer instead of printing, so a front end decides how (and
//! whether) to render each step.
use crate::engine::{moves_to_labels, Board, BoardError, Move};
use crate::heuristics::{Goal, Heuristic};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

/// Which engine (and, for A*, which heuristic) produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Best-first search ordered by `g + h`.
    AStar(Heuristic),
    /// Iterative deepening up to and including `max_depth`.
    Iddfs {
        /// Largest depth limit tried.
        max_depth: u32,
    },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::AStar(heuristic) => write!(f, "A* ({heuristic})"),
            Strategy::Iddfs { max_depth } => write!(f, "IDDFS (max depth {max_depth})"),
        }
    }
}

/// Represents a solution found by one of the engines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Moves of the blank, from the start board to the goal.
    pub moves: Vec<Move>,
    /// Number of moves, i.e. `g` of the goal node.
    pub steps: u32,
    /// The engine that found this solution.
    pub strategy: Strategy,
    /// Boards expanded before the goal was reached. For IDDFS this sums every iteration.
    pub nodes_expanded: usize,
}

impl Solution {
    /// The moves as a label string such as `"DR"`.
    pub fn path(&self) -> String {
        moves_to_labels(&self.moves)
    }
}

/// Progress reported to the observer while a search runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// A* popped a node and is about to test it against the goal.
    Expanding {
        /// `g + h` of the node.
        f: u32,
        /// Moves made to reach the board.
        g: u32,
        /// Heuristic estimate for the board.
        h: u32,
        /// The board itself.
        board: Board,
    },
    /// IDDFS is starting a new depth-limited pass.
    DepthStarted {
        /// Depth bound of the pass.
        limit: u32,
    },
    /// IDDFS is expanding a board with `remaining` moves of budget left.
    Visiting {
        /// Moves still allowed below this board.
        remaining: u32,
        /// The board itself.
        board: Board,
    },
}

/// Every way a solve request can end without a solution.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchError {
    /// The start board is malformed.
    #[display("invalid board: {_0}")]
    InvalidBoard(#[error(source)] BoardError),
    /// The start board has the wrong inversion parity; no engine was run.
    #[display("this puzzle is unsolvable")]
    Unsolvable,
    /// IDDFS tried every depth up to the bound without reaching the goal.
    /// A longer solution may still exist.
    #[display("not solvable within depth {max_depth}")]
    DepthExhausted {
        /// The bound that was exhausted.
        max_depth: u32,
    },
    /// A* ran out of boards to expand. For a solvable start this means the goal
    /// and the solvability check disagree, which is a bug.
    #[display("frontier exhausted after expanding {nodes_expanded} boards")]
    FrontierExhausted {
        /// Boards expanded before the frontier emptied.
        nodes_expanded: usize,
    },
}

impl From<BoardError> for SearchError {
    fn from(err: BoardError) -> Self {
        SearchError::InvalidBoard(err)
    }
}

/// Node in the A* priority queue.
///
/// Nodes order by `f`, then `g`, then the board's flattened form, then the path
/// compared label by label. The heap holds them in `Reverse` so the smallest pops first.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SearchNode {
    f: u32,
    g: u32,
    board: Board,
    path: Vec<Move>,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .cmp(&other.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| self.board.cmp(&other.board))
            .then_with(|| {
                let labels = self.path.iter().map(|mv| mv.label());
                labels.cmp(other.path.iter().map(|mv| mv.label()))
            })
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Solves the puzzle with A* using the given heuristic.
///
/// The start board is assumed to be able to reach `goal`; check that first (the
/// driver does). With an admissible heuristic the returned path is optimal. When
/// several optimal paths exist, the one returned is fixed by the successor order
/// and the frontier tie-break, so repeated runs agree.
///
/// # Arguments
/// * `start`: The board to solve.
/// * `goal`: The arrangement to reach.
/// * `heuristic`: The estimate used to order the frontier.
/// * `observer`: Called with a `SearchEvent::Expanding` for every node popped.
///
/// # Returns
/// * `Ok(Solution)` once the goal is popped.
/// * `Err(SearchError::FrontierExhausted)` if every reachable board was expanded
///   without finding the goal.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::{Goal, Heuristic};
/// use eight_puzzle_solver::solver::astar;
///
/// let start = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
/// let solution = astar(&start, &Goal::standard(), Heuristic::Manhattan, |_| {}).unwrap();
/// assert_eq!(solution.path(), "DR");
/// assert_eq!(solution.steps, 2);
/// ```
pub fn astar<F>(
    start: &Board,
    goal: &Goal,
    heuristic: Heuristic,
    mut observer: F,
) -> Result<Solution, SearchError>
where
    F: FnMut(&SearchEvent),
{
    let mut frontier = BinaryHeap::new();
    let mut visited: HashSet<Board> = HashSet::new();

    frontier.push(Reverse(SearchNode {
        f: heuristic.evaluate(start, goal),
        g: 0,
        board: *start,
        path: Vec::new(),
    }));

    while let Some(Reverse(node)) = frontier.pop() {
        observer(&SearchEvent::Expanding {
            f: node.f,
            g: node.g,
            h: node.f - node.g,
            board: node.board,
        });

        if goal.is_reached_by(&node.board) {
            return Ok(Solution {
                steps: node.g,
                moves: node.path,
                strategy: Strategy::AStar(heuristic),
                nodes_expanded: visited.len(),
            });
        }

        // Stale duplicate of a board that was already expanded with a lower f.
        if !visited.insert(node.board) {
            continue;
        }

        for (next, mv) in node.board.successors() {
            if visited.contains(&next) {
                continue;
            }
            let g = node.g + 1;
            let mut path = node.path.clone();
            path.push(mv);
            frontier.push(Reverse(SearchNode {
                f: g + heuristic.evaluate(&next, goal),
                g,
                board: next,
                path,
            }));
        }
    }

    log::error!(
        "A* ({heuristic}) emptied its frontier after {} boards without reaching {:?}",
        visited.len(),
        goal.board().flatten()
    );
    Err(SearchError::FrontierExhausted {
        nodes_expanded: visited.len(),
    })
}

/// Solves the puzzle with iterative-deepening depth-first search.
///
/// Depth limits `0, 1, ..., max_depth` are tried in turn, each with a fresh
/// visited table, and the first path found is returned. Because shallower limits
/// are exhausted first, that path has the minimum number of moves.
///
/// Within one pass a board is pruned only if it was already expanded with at
/// least as much remaining budget as it would get now, so reaching a board
/// early through a detour never hides a shorter route through it.
///
/// # Returns
/// * `Ok(Solution)` with the first path found.
/// * `Err(SearchError::DepthExhausted)` if no limit up to `max_depth` succeeds.
pub fn iddfs<F>(
    start: &Board,
    goal: &Goal,
    max_depth: u32,
    mut observer: F,
) -> Result<Solution, SearchError>
where
    F: FnMut(&SearchEvent),
{
    let mut nodes_expanded = 0;
    for limit in 0..=max_depth {
        observer(&SearchEvent::DepthStarted { limit });
        let mut visited = HashMap::new();
        let mut path = Vec::new();
        if depth_limited_recursive(
            *start,
            limit,
            goal,
            &mut path,
            &mut visited,
            &mut nodes_expanded,
            &mut observer,
        ) {
            let steps = u32::try_from(path.len())
                .unwrap_or_else(|_| unreachable!("a pass never goes deeper than its limit"));
            return Ok(Solution {
                steps,
                moves: path,
                strategy: Strategy::Iddfs { max_depth },
                nodes_expanded,
            });
        }
    }
    Err(SearchError::DepthExhausted { max_depth })
}

/// One depth-limited pass. On success `path` holds the moves from the pass's
/// start board to the goal.
fn depth_limited_recursive<F>(
    state: Board,
    remaining: u32,
    goal: &Goal,
    path: &mut Vec<Move>,
    visited: &mut HashMap<Board, u32>,
    nodes_expanded: &mut usize,
    observer: &mut F,
) -> bool
where
    F: FnMut(&SearchEvent),
{
    if goal.is_reached_by(&state) {
        return true;
    }
    if remaining == 0 {
        return false;
    }

    // Boards are only re-entered with a strictly larger budget, so this never lowers an entry.
    visited.insert(state, remaining);
    *nodes_expanded += 1;
    observer(&SearchEvent::Visiting {
        remaining,
        board: state,
    });

    for (next, mv) in state.successors() {
        if visited
            .get(&next)
            .is_some_and(|&budget| budget >= remaining - 1)
        {
            continue;
        }
        path.push(mv);
        if depth_limited_recursive(
            next,
            remaining - 1,
            goal,
            path,
            visited,
            nodes_expanded,
            observer,
        ) {
            return true;
        }
        path.pop();
    }
    false
}
