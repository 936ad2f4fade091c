use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a puzzle configuration.
#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("failed to read puzzle from {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid tile {0:?}: expected an integer")]
    InvalidTile(String),

    #[error("expected 3 rows, found {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} tiles, expected 3")]
    WrongRowLength { row: usize, len: usize },

    #[error("expected 9 tiles, found {0}")]
    WrongTileCount(usize),

    #[error("tile {0} is out of range 0..9")]
    TileOutOfRange(u8),

    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
