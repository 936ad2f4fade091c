//! Eight-puzzle solver.
//!
//! Solves the 3x3 sliding-tile puzzle towards the fixed goal
//!
//! ```text
//! 1 2 3
//! 8 0 4
//! 7 6 5
//! ```
//!
//! with either breadth-first search or A* guided by the Manhattan distance.
//! Both return an optimal (fewest moves) solution together with the number of
//! nodes they expanded.
//!
//! ## Modules
//!
//! - [`puzzle`] - Board representation, moves and parsing
//! - [`heuristic`] - Manhattan distance estimate
//! - [`node`] - Search tree nodes and path reconstruction
//! - [`search`] - BFS and A* strategies
//! - [`loader`] - Reading puzzles from files
//!
//! ## Example
//!
//! ```
//! use eight_puzzle::puzzle::{Board, Move};
//! use eight_puzzle::search::a_star_solve;
//!
//! let start: Board = "1 2 3\n8 4 0\n7 6 5".parse().unwrap();
//! let outcome = a_star_solve(start);
//! assert_eq!(outcome.depth(), Some(1));
//! assert_eq!(outcome.path(), Some(vec![Move::Left]));
//! ```

pub mod error;
pub mod heuristic;
pub mod loader;
pub mod node;
pub mod puzzle;
pub mod search;

pub use error::PuzzleError;
pub use node::{reconstruct_path, SearchNode};
pub use puzzle::{Board, Move, GOAL};
pub use search::{a_star_solve, bfs_solve, solve, Algorithm, SearchOutcome};
