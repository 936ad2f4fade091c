//! Reading puzzles from disk.

use std::fs;
use std::path::Path;

use crate::error::{PuzzleError, Result};
use crate::puzzle::Board;

/// Load a board from a text file of three rows of three whitespace-separated tiles.
pub fn read_puzzle(path: impl AsRef<Path>) -> Result<Board> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| PuzzleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let board: Board = contents.parse()?;
    tracing::debug!(path = %path.display(), "loaded puzzle");
    Ok(board)
}
