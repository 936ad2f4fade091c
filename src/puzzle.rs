use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::{PuzzleError, Result};

/// Width and height of the grid.
pub const SIZE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// The blank cell is represented by 0.
pub const BLANK: u8 = 0;

/// The single target configuration:
///
/// ```text
/// 1 2 3
/// 8 0 4
/// 7 6 5
/// ```
pub const GOAL: Board = Board {
    tiles: [1, 2, 3, 8, 0, 4, 7, 6, 5],
    blank: 4,
};

const GOAL_POSITIONS: [usize; CELLS] = goal_positions();

const fn goal_positions() -> [usize; CELLS] {
    let mut positions = [0; CELLS];
    let mut i = 0;
    while i < CELLS {
        positions[GOAL.tiles[i] as usize] = i;
        i += 1;
    }
    positions
}

/// Index that `tile` occupies in [`GOAL`].
pub fn goal_position(tile: u8) -> usize {
    GOAL_POSITIONS[tile as usize]
}

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    /// Every move, in expansion order.
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

    /// Change in blank index when this move is applied.
    pub fn as_offset(&self) -> isize {
        match self {
            Move::Left => -1,
            Move::Right => 1,
            Move::Up => -(SIZE as isize),
            Move::Down => SIZE as isize,
        }
    }

    /// Whether the blank at `blank` can slide in this direction without leaving the grid.
    pub fn is_legal_from(&self, blank: usize) -> bool {
        match self {
            Move::Left => blank % SIZE != 0,
            Move::Right => blank % SIZE != SIZE - 1,
            Move::Up => blank >= SIZE,
            Move::Down => blank < CELLS - SIZE,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Left => Move::Right,
            Move::Right => Move::Left,
            Move::Up => Move::Down,
            Move::Down => Move::Up,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Left => "Left",
            Move::Right => "Right",
            Move::Up => "Up",
            Move::Down => "Down",
        };
        write!(f, "{}", s)
    }
}

/// A 3x3 arrangement of the tiles 0..=8, stored row-major.
///
/// Every `Board` holds each tile exactly once. Construction validates this and
/// moves only ever swap two cells, so it cannot be broken afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [u8; CELLS],
    blank: u8,
}

impl Board {
    pub fn new(tiles: [u8; CELLS]) -> Result<Self> {
        let mut seen = [false; CELLS];
        let mut blank = 0;

        for (i, &tile) in tiles.iter().enumerate() {
            if tile as usize >= CELLS {
                return Err(PuzzleError::TileOutOfRange(tile));
            }
            if seen[tile as usize] {
                return Err(PuzzleError::DuplicateTile(tile));
            }
            seen[tile as usize] = true;
            if tile == BLANK {
                blank = i as u8;
            }
        }

        Ok(Self { tiles, blank })
    }

    /// Uniformly random board from which [`GOAL`] is reachable.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles = GOAL.tiles;

        loop {
            tiles.shuffle(rng);

            let blank = tiles.iter().position(|&t| t == BLANK).unwrap_or_default();
            let board = Self {
                tiles,
                blank: blank as u8,
            };
            if board.is_solvable() {
                return board;
            }
        }
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    pub fn blank(&self) -> usize {
        self.blank as usize
    }

    pub fn is_goal(&self) -> bool {
        *self == GOAL
    }

    /// Legal moves for the blank, always yielded as Left, Right, Up, Down.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> {
        let blank = self.blank();
        Move::ALL
            .into_iter()
            .filter(move |m| m.is_legal_from(blank))
    }

    pub fn try_move(&self, movement: Move) -> Option<Self> {
        if !movement.is_legal_from(self.blank()) {
            return None;
        }

        let swap = (self.blank() as isize + movement.as_offset()) as usize;
        let mut tiles = self.tiles;
        tiles.swap(self.blank(), swap);

        Some(Self {
            tiles,
            blank: swap as u8,
        })
    }

    /// Slide the blank in direction `movement`.
    ///
    /// # Panics
    ///
    /// Panics if `movement` is not one of [`Board::legal_moves`].
    pub fn apply_move(&self, movement: Move) -> Self {
        match self.try_move(movement) {
            Some(board) => board,
            None => panic!("illegal move {movement} with blank at {}", self.blank),
        }
    }

    /// Whether [`GOAL`] is reachable from this board.
    ///
    /// Sliding the blank never changes the parity of the tile inversions, so a
    /// board is solvable exactly when its parity matches the goal's.
    pub fn is_solvable(&self) -> bool {
        self.count_inversions() % 2 == GOAL.count_inversions() % 2
    }

    fn count_inversions(&self) -> usize {
        let tiles = &self.tiles;
        tiles
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                tiles[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = PuzzleError;

    fn try_from(tiles: &[u8]) -> Result<Self> {
        let tiles: [u8; CELLS] = tiles
            .try_into()
            .map_err(|_| PuzzleError::WrongTileCount(tiles.len()))?;
        Self::new(tiles)
    }
}

impl FromStr for Board {
    type Err = PuzzleError;

    /// Parses whitespace-separated tiles, either as three rows of three or as
    /// a single line of nine.
    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|token| {
                        token
                            .parse::<u8>()
                            .map_err(|_| PuzzleError::InvalidTile(token.to_string()))
                    })
                    .collect::<Result<Vec<u8>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        if rows.len() != 1 {
            if rows.len() != SIZE {
                return Err(PuzzleError::WrongRowCount(rows.len()));
            }
            if let Some((row, tiles)) = rows.iter().enumerate().find(|(_, r)| r.len() != SIZE) {
                return Err(PuzzleError::WrongRowLength {
                    row: row + 1,
                    len: tiles.len(),
                });
            }
        }

        let flattened: Vec<u8> = rows.into_iter().flatten().collect();
        Self::try_from(flattened.as_slice())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(SIZE) {
            let line: Vec<String> = row.iter().map(u8::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(tiles: [u8; CELLS]) -> Board {
        Board::new(tiles).unwrap()
    }

    #[test]
    fn goal_positions_match_goal() {
        for (i, &tile) in GOAL.tiles().iter().enumerate() {
            assert_eq!(goal_position(tile), i);
        }
        assert_eq!(GOAL.blank(), 4);
    }

    #[test]
    fn corner_blank_has_two_moves() {
        let b = board([0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let moves: Vec<_> = b.legal_moves().collect();
        assert_eq!(moves, vec![Move::Right, Move::Down]);

        let b = board([1, 2, 3, 4, 5, 6, 7, 8, 0]);
        let moves: Vec<_> = b.legal_moves().collect();
        assert_eq!(moves, vec![Move::Left, Move::Up]);
    }

    #[test]
    fn center_blank_has_all_moves_in_order() {
        let moves: Vec<_> = GOAL.legal_moves().collect();
        assert_eq!(moves, Move::ALL.to_vec());
    }

    #[test]
    fn edge_blank_has_three_moves() {
        let b = board([1, 0, 3, 8, 2, 4, 7, 6, 5]);
        let moves: Vec<_> = b.legal_moves().collect();
        assert_eq!(moves, vec![Move::Left, Move::Right, Move::Down]);
    }

    #[test]
    fn apply_move_swaps_blank() {
        let b = board([1, 2, 3, 8, 4, 0, 7, 6, 5]);
        let next = b.apply_move(Move::Left);
        assert_eq!(next, GOAL);
        assert_eq!(next.blank(), 4);

        let up = GOAL.apply_move(Move::Up);
        assert_eq!(up.tiles(), &[1, 0, 3, 8, 2, 4, 7, 6, 5]);
        assert_eq!(up.blank(), 1);
    }

    #[test]
    fn try_move_rejects_illegal_moves() {
        let b = board([0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(b.try_move(Move::Left).is_none());
        assert!(b.try_move(Move::Up).is_none());
    }

    #[test]
    #[should_panic(expected = "illegal move")]
    fn apply_illegal_move_panics() {
        let b = board([1, 2, 3, 4, 5, 6, 7, 8, 0]);
        b.apply_move(Move::Right);
    }

    #[test]
    fn new_rejects_bad_tiles() {
        assert!(matches!(
            Board::new([1, 1, 2, 3, 4, 5, 6, 7, 0]),
            Err(PuzzleError::DuplicateTile(1))
        ));
        assert!(matches!(
            Board::new([9, 1, 2, 3, 4, 5, 6, 7, 0]),
            Err(PuzzleError::TileOutOfRange(9))
        ));
    }

    #[test]
    fn parses_rows_and_flat_lines() {
        let rows: Board = "1 2 3\n8 0 4\n7 6 5\n".parse().unwrap();
        assert_eq!(rows, GOAL);

        let flat: Board = "1 2 3 8 0 4 7 6 5".parse().unwrap();
        assert_eq!(flat, GOAL);
    }

    #[test]
    fn parse_reports_shape_errors() {
        assert!(matches!(
            "1 2 3\n8 0 4".parse::<Board>(),
            Err(PuzzleError::WrongRowCount(2))
        ));
        assert!(matches!(
            "1 2 3\n8 0\n4 7 6 5".parse::<Board>(),
            Err(PuzzleError::WrongRowLength { row: 2, len: 2 })
        ));
        assert!(matches!(
            "1 2 3 8".parse::<Board>(),
            Err(PuzzleError::WrongTileCount(4))
        ));
        assert!(matches!(
            "1 2 x\n8 0 4\n7 6 5".parse::<Board>(),
            Err(PuzzleError::InvalidTile(t)) if t == "x"
        ));
    }

    #[test]
    fn display_prints_rows() {
        assert_eq!(GOAL.to_string(), "1 2 3\n8 0 4\n7 6 5\n");
    }

    #[test]
    fn solvability_follows_inversion_parity() {
        assert!(GOAL.is_solvable());
        assert!(board([1, 2, 3, 8, 4, 0, 7, 6, 5]).is_solvable());
        // Swapping two tiles flips the parity.
        assert!(!board([2, 1, 3, 8, 0, 4, 7, 6, 5]).is_solvable());
    }

    #[test]
    fn shuffled_boards_are_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let b = Board::shuffled(&mut rng);
            assert!(b.is_solvable());
            assert_eq!(b.tiles()[b.blank()], BLANK);
        }
    }
}
