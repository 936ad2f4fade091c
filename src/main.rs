//! Command-line front end for the eight-puzzle solver.
//!
//! ## Usage
//!
//! - `eight-puzzle` - Interactive: prompt for a puzzle file and an algorithm
//! - `eight-puzzle solve <FILE>` - Solve a puzzle file
//! - `eight-puzzle shuffle` - Solve a randomly shuffled puzzle

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use eight_puzzle::loader::read_puzzle;
use eight_puzzle::puzzle::{BLANK, SIZE};
use eight_puzzle::{Algorithm, Board, Move, SearchOutcome};

/// Eight-puzzle solver using breadth-first search or A*
#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle stored as three rows of three tiles (0 is the blank)
    Solve {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Strategy::Astar)]
        algorithm: Strategy,

        /// Print the board after every move
        #[arg(long)]
        steps: bool,
    },
    /// Shuffle a solvable puzzle and solve it
    Shuffle {
        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, value_enum, default_value_t = Strategy::Astar)]
        algorithm: Strategy,

        /// Print the board after every move
        #[arg(long)]
        steps: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Bfs,
    Astar,
    /// Run both and compare
    Both,
}

impl Strategy {
    fn algorithms(self) -> Vec<Algorithm> {
        match self {
            Strategy::Bfs => vec![Algorithm::Bfs],
            Strategy::Astar => vec![Algorithm::AStar],
            Strategy::Both => vec![Algorithm::Bfs, Algorithm::AStar],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Solve {
            file,
            algorithm,
            steps,
        }) => {
            let start = read_puzzle(&file)?;
            run(start, algorithm, steps);
        }
        Some(Commands::Shuffle {
            seed,
            algorithm,
            steps,
        }) => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let start = Board::shuffled(&mut rng);
            run(start, algorithm, steps);
        }
        None => interactive()?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(start: Board, strategy: Strategy, steps: bool) {
    print_initial_state(&start);
    if !start.is_solvable() {
        tracing::warn!("puzzle has the wrong parity; the search will exhaust every reachable board");
    }

    let mut results = Vec::new();
    for algorithm in strategy.algorithms() {
        let outcome = algorithm.solve(start);
        println!();
        report(algorithm, &start, &outcome, steps);
        results.push((algorithm, outcome));
    }

    if results.len() > 1 {
        println!();
        println!("{:<10}{:>8}{:>16}", "Algorithm", "Moves", "Nodes expanded");
        for (algorithm, outcome) in &results {
            let moves = outcome
                .depth()
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            println!("{:<10}{:>8}{:>16}", algorithm.to_string(), moves, outcome.nodes_expanded);
        }
    }
}

/// Prompt-driven flow: ask for a file, then for an algorithm.
fn interactive() -> Result<()> {
    println!("Welcome to the Eight-Puzzle Solver!");
    println!("Provide a file with a 3x3 grid of tiles 0-8, where 0 is the empty spot.");
    println!("The solver finds the moves from that state to the goal and counts the nodes expanded.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let filename = prompt(&mut lines, "Enter the filename of the puzzle you want to solve: ")?;
    let start = match read_puzzle(filename.trim()) {
        Ok(board) => board,
        Err(e) => {
            println!("Could not load the puzzle: {e}");
            return Ok(());
        }
    };
    print_initial_state(&start);

    let choice = prompt(&mut lines, "Choose the algorithm: 1 for BFS, 2 for A*: ")?;
    let algorithm: Algorithm = match choice.parse() {
        Ok(algorithm) => algorithm,
        Err(_) => {
            println!("Invalid choice.");
            return Ok(());
        }
    };

    let outcome = algorithm.solve(start);
    report(algorithm, &start, &outcome, false);
    Ok(())
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().context("failed to flush stdout")?;
    let line = lines
        .next()
        .context("unexpected end of input")?
        .context("failed to read from stdin")?;
    Ok(line)
}

fn print_initial_state(board: &Board) {
    println!("Initial state of the puzzle:");
    print!("{board}");
}

fn report(algorithm: Algorithm, start: &Board, outcome: &SearchOutcome, steps: bool) {
    println!("{algorithm}:");
    match (outcome.path(), outcome.depth()) {
        (Some(path), Some(depth)) => {
            let moves: Vec<String> = path.iter().map(Move::to_string).collect();
            println!("Solution path: {}", moves.join(" "));
            println!("Number of moves: {depth}");
            println!("Total nodes expanded: {}", outcome.nodes_expanded);
            if steps {
                replay(start, &path);
            }
        }
        _ => {
            println!("No solution found.");
            println!("Total nodes expanded: {}", outcome.nodes_expanded);
        }
    }
}

fn replay(start: &Board, path: &[Move]) {
    let mut board = *start;
    println!();
    println!("{}", render(&board));
    for &item in path {
        board = board.apply_move(item);
        println!("{}\n{}", item.to_string().bold(), render(&board));
    }
}

fn render(board: &Board) -> String {
    board
        .tiles()
        .chunks(SIZE)
        .map(|row| {
            row.iter()
                .map(|&tile| {
                    if tile == BLANK {
                        "_".dark_grey().to_string()
                    } else {
                        tile.to_string().cyan().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
