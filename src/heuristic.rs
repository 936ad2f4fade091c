//! Admissible distance estimate used to order the A* frontier.

use crate::puzzle::{goal_position, Board, BLANK, SIZE};

/// Sum over all tiles except the blank of the grid distance to their goal cell.
///
/// Each move shifts a single tile by one cell, so this never overestimates the
/// number of moves left and changes by exactly one per move.
pub fn manhattan_distance(board: &Board) -> usize {
    let mut distance = 0;
    for (i, &tile) in board.tiles().iter().enumerate() {
        if tile == BLANK {
            continue;
        }
        let target = goal_position(tile);
        distance += (i / SIZE).abs_diff(target / SIZE);
        distance += (i % SIZE).abs_diff(target % SIZE);
    }
    distance
}
