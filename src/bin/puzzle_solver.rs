use clap::{Parser, ValueEnum};
use eight_puzzle_solver::driver::{solve, SolverConfig, DEFAULT_IDDFS_MAX_DEPTH};
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::heuristics::{Goal, Heuristic};
use eight_puzzle_solver::solver::{SearchError, SearchEvent, Strategy};
use eight_puzzle_solver::utils::board_from_text;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Board solved when neither a file nor a seed is given.
const DEFAULT_START: [[u8; 3]; 3] = [[1, 2, 3], [4, 0, 6], [7, 5, 8]];

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Astar,
    Iddfs,
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HeuristicChoice {
    Misplaced,
    Manhattan,
    Both,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (three rows of three tiles, 0 or _ for the blank)
    #[clap(conflicts_with = "seed")]
    board_file: Option<PathBuf>,

    /// Generate the start board from this seed instead of reading a file
    #[clap(long)]
    seed: Option<u64>,

    /// With --seed, walk this many random moves away from the goal instead of shuffling
    #[clap(long, requires = "seed")]
    scramble: Option<usize>,

    /// Which search engines to run
    #[clap(short, long, value_enum, default_value_t = Algorithm::All)]
    algorithm: Algorithm,

    /// Heuristic(s) for A*
    #[clap(long, value_enum, default_value_t = HeuristicChoice::Both)]
    heuristic: HeuristicChoice,

    /// Depth limit for IDDFS
    #[clap(short = 'd', long, default_value_t = DEFAULT_IDDFS_MAX_DEPTH)]
    max_depth: u32,

    /// Print every board the engines expand
    #[clap(short, long)]
    trace: bool,
}

fn load_board(args: &Args) -> Result<Board, String> {
    if let Some(path) = &args.board_file {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        return board_from_text(&content)
            .map_err(|e| format!("Invalid board in {}: {}", path.display(), e));
    }
    match (args.seed, args.scramble) {
        (Some(seed), Some(moves)) => Ok(Board::scrambled(seed, moves)),
        (Some(seed), None) => Ok(Board::new_random_with_seed(seed)),
        (None, _) => Board::from_grid(DEFAULT_START).map_err(|e| e.to_string()),
    }
}

fn build_config(args: &Args) -> SolverConfig {
    let heuristics: &[Heuristic] = match args.heuristic {
        HeuristicChoice::Misplaced => &[Heuristic::Misplaced],
        HeuristicChoice::Manhattan => &[Heuristic::Manhattan],
        HeuristicChoice::Both => &Heuristic::ALL,
    };

    let mut strategies = Vec::new();
    if matches!(args.algorithm, Algorithm::Astar | Algorithm::All) {
        strategies.extend(heuristics.iter().map(|&h| Strategy::AStar(h)));
    }
    if matches!(args.algorithm, Algorithm::Iddfs | Algorithm::All) {
        strategies.push(Strategy::Iddfs {
            max_depth: args.max_depth,
        });
    }
    SolverConfig { strategies }
}

fn print_event(event: &SearchEvent) {
    match event {
        SearchEvent::Expanding { f, g, h, board } => {
            println!("Current State (f={f}, g={g}, h={h}):\n{board}\n");
        }
        SearchEvent::DepthStarted { limit } => println!("--- Depth limit {limit} ---\n"),
        SearchEvent::Visiting { remaining, board } => {
            println!("Current State (Depth {remaining}):\n{board}\n");
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let start = match load_board(&args) {
        Ok(board) => board,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };
    println!("Initial board state:\n{start}\n");

    let config = build_config(&args);
    let trace = args.trace;
    let report = match solve(&start, &Goal::standard(), &config, |event| {
        if trace {
            print_event(event);
        }
    }) {
        Ok(report) => report,
        Err(SearchError::Unsolvable) => {
            println!("This puzzle is unsolvable!");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("Search failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    for run in &report.runs {
        match &run.outcome {
            Ok(solution) => {
                match run.strategy {
                    Strategy::AStar(heuristic) => println!("Solved with {heuristic}"),
                    Strategy::Iddfs { .. } => println!("Solved with IDDFS"),
                }
                println!("Moves: {}", solution.path());
                println!("Steps: {}", solution.steps);
                println!("Boards expanded: {}\n", solution.nodes_expanded);
            }
            Err(SearchError::DepthExhausted { max_depth }) => {
                println!("Not solvable within depth {max_depth}\n");
            }
            Err(err) => println!("{}: {err}\n", run.strategy),
        }
    }

    if report.best().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
