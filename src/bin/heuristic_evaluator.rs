use clap::Parser;
use eight_puzzle_solver::driver::solve_with;
use eight_puzzle_solver::engine::Board;
use eight_puzzle_solver::heuristics::{Goal, Heuristic};
use eight_puzzle_solver::solver::Strategy;
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare A* heuristics on seeded random puzzles", long_about = None)]
struct Args {
    /// Number of boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Random moves used to scramble each board away from the goal
    #[clap(long, default_value_t = 30)]
    scramble: usize,
}

/// Totals for one heuristic across every board.
#[derive(Default)]
struct Tally {
    expanded: Vec<usize>,
    steps: Vec<u32>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let goal = Goal::standard();

    let mut tallies: HashMap<Heuristic, Tally> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards ({} scramble moves)...",
        args.boards, args.scramble
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let start = Board::scrambled(current_seed, args.scramble);

        println!("\nEvaluating Board {} (Seed: {})\n{}", board_idx, current_seed, start);

        for heuristic in Heuristic::ALL {
            match solve_with(&start, &goal, Strategy::AStar(heuristic), |_| {}) {
                Ok(solution) => {
                    println!(
                        "  Heuristic: {:<20} Steps: {:<4} Expanded: {}",
                        heuristic.name(),
                        solution.steps,
                        solution.nodes_expanded
                    );
                    let tally = tallies.entry(heuristic).or_default();
                    tally.expanded.push(solution.nodes_expanded);
                    tally.steps.push(solution.steps);
                }
                Err(err) => {
                    eprintln!(
                        "Error: {} failed on board {} (Seed: {}): {}",
                        heuristic, board_idx, current_seed, err
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    let mut averages: Vec<(Heuristic, f64, f64)> = Vec::new();
    for (heuristic, tally) in &tallies {
        if tally.expanded.is_empty() {
            println!("Heuristic {}: No results recorded.", heuristic);
            continue;
        }
        let runs = tally.expanded.len() as f64;
        let avg_expanded = tally.expanded.iter().sum::<usize>() as f64 / runs;
        let avg_steps = tally.steps.iter().map(|&s| f64::from(s)).sum::<f64>() / runs;
        averages.push((*heuristic, avg_expanded, avg_steps));
    }

    // Fewest expansions first
    averages.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (heuristic, avg_expanded, avg_steps) in averages {
        println!(
            "Heuristic {:<20}: Average Expanded = {:.2}, Average Steps = {:.2}",
            heuristic.name(),
            avg_expanded,
            avg_steps
        );
    }
}
