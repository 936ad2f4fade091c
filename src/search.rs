//! Breadth-first and A* search over board configurations.
//!
//! Both strategies own their frontier and visited set for the duration of one
//! call, run to completion synchronously, and report how many nodes they
//! expanded. Running out of frontier is a regular outcome, not an error.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::heuristic::manhattan_distance;
use crate::node::SearchNode;
use crate::puzzle::{Board, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bfs,
    AStar,
}

impl Algorithm {
    pub fn solve(&self, start: Board) -> SearchOutcome {
        match self {
            Algorithm::Bfs => bfs_solve(start),
            Algorithm::AStar => a_star_solve(start),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bfs => write!(f, "BFS"),
            Algorithm::AStar => write!(f, "A*"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "bfs" => Ok(Algorithm::Bfs),
            "2" | "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            other => Err(format!("unknown algorithm {other:?} (expected bfs or astar)")),
        }
    }
}

/// Result of a search: the goal node if one was reached, and the work done.
#[derive(Debug)]
pub struct SearchOutcome {
    pub goal: Option<Rc<SearchNode>>,
    pub nodes_expanded: usize,
}

impl SearchOutcome {
    fn solved(goal: Rc<SearchNode>, nodes_expanded: usize) -> Self {
        Self {
            goal: Some(goal),
            nodes_expanded,
        }
    }

    fn exhausted(nodes_expanded: usize) -> Self {
        Self {
            goal: None,
            nodes_expanded,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.goal.is_some()
    }

    /// Number of moves in the solution.
    pub fn depth(&self) -> Option<usize> {
        self.goal.as_ref().map(|node| node.depth())
    }

    pub fn path(&self) -> Option<Vec<Move>> {
        self.goal.as_ref().map(|node| node.path())
    }

    pub fn goal_board(&self) -> Option<&Board> {
        self.goal.as_ref().map(|node| node.board())
    }
}

/// Breadth-first search from `start`.
///
/// Children are tested against the goal as they are generated, so the first
/// goal seen is at the shallowest depth. A start that is already the goal
/// returns immediately with nothing expanded.
pub fn bfs_solve(start: Board) -> SearchOutcome {
    tracing::debug!(%start, "starting BFS");

    let root = SearchNode::root(start);
    if root.board().is_goal() {
        return finish(Algorithm::Bfs, SearchOutcome::solved(root, 0));
    }

    let mut queue = VecDeque::from([root]);
    let mut visited = FxHashSet::default();
    let mut nodes_expanded = 0;

    while let Some(current) = queue.pop_front() {
        // The same board may be queued from two parents before either is expanded.
        if !visited.insert(*current.board()) {
            continue;
        }
        nodes_expanded += 1;
        tracing::trace!(depth = current.depth(), nodes_expanded, "expanding");

        for child in current.expand() {
            if visited.contains(child.board()) {
                continue;
            }
            if child.board().is_goal() {
                return finish(Algorithm::Bfs, SearchOutcome::solved(child, nodes_expanded));
            }
            queue.push_back(child);
        }
    }

    finish(Algorithm::Bfs, SearchOutcome::exhausted(nodes_expanded))
}

/// Frontier entry ordered so that [`BinaryHeap`] pops the lowest `f`, and the
/// earliest insertion among equal `f`.
struct Candidate {
    f: usize,
    sequence: u64,
    node: Rc<SearchNode>,
}

impl Candidate {
    fn key(&self) -> (usize, u64) {
        (self.f, self.sequence)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// A* search from `start`, ordered by `depth + manhattan_distance`.
///
/// A board can sit in the heap several times; only its first pop is expanded
/// and later copies are dropped when they surface.
pub fn a_star_solve(start: Board) -> SearchOutcome {
    tracing::debug!(%start, "starting A*");

    let root = SearchNode::root(start);
    if root.board().is_goal() {
        return finish(Algorithm::AStar, SearchOutcome::solved(root, 0));
    }

    let mut heap = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut visited = FxHashSet::default();
    let mut nodes_expanded = 0;

    heap.push(Candidate {
        f: manhattan_distance(root.board()),
        sequence,
        node: root,
    });

    while let Some(Candidate { node: current, .. }) = heap.pop() {
        if !visited.insert(*current.board()) {
            continue;
        }
        nodes_expanded += 1;
        tracing::trace!(depth = current.depth(), nodes_expanded, "expanding");

        if current.board().is_goal() {
            return finish(Algorithm::AStar, SearchOutcome::solved(current, nodes_expanded));
        }

        for child in current.expand() {
            if visited.contains(child.board()) {
                continue;
            }
            sequence += 1;
            heap.push(Candidate {
                f: child.depth() + manhattan_distance(child.board()),
                sequence,
                node: child,
            });
        }
    }

    finish(Algorithm::AStar, SearchOutcome::exhausted(nodes_expanded))
}

/// Run `algorithm` from `start`.
pub fn solve(start: Board, algorithm: Algorithm) -> SearchOutcome {
    algorithm.solve(start)
}

fn finish(algorithm: Algorithm, outcome: SearchOutcome) -> SearchOutcome {
    match outcome.depth() {
        Some(depth) => tracing::debug!(
            %algorithm,
            depth,
            nodes_expanded = outcome.nodes_expanded,
            "solution found"
        ),
        None => tracing::debug!(
            %algorithm,
            nodes_expanded = outcome.nodes_expanded,
            "search space exhausted"
        ),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::GOAL;

    fn board(tiles: [u8; 9]) -> Board {
        Board::new(tiles).unwrap()
    }

    #[test]
    fn goal_start_expands_nothing() {
        for algorithm in [Algorithm::Bfs, Algorithm::AStar] {
            let outcome = solve(GOAL, algorithm);
            assert_eq!(outcome.depth(), Some(0));
            assert_eq!(outcome.path(), Some(vec![]));
            assert_eq!(outcome.nodes_expanded, 0);
        }
    }

    #[test]
    fn one_move_away() {
        let start = board([1, 2, 3, 8, 4, 0, 7, 6, 5]);

        let bfs = bfs_solve(start);
        assert_eq!(bfs.path(), Some(vec![Move::Left]));
        assert_eq!(bfs.nodes_expanded, 1);

        let a_star = a_star_solve(start);
        assert_eq!(a_star.path(), Some(vec![Move::Left]));
        // The root and then the goal itself are popped.
        assert_eq!(a_star.nodes_expanded, 2);
    }

    #[test]
    fn textbook_instance() {
        let start = board([2, 8, 3, 1, 6, 4, 7, 0, 5]);
        let bfs = bfs_solve(start);
        let a_star = a_star_solve(start);
        assert_eq!(bfs.depth(), Some(5));
        assert_eq!(a_star.depth(), Some(5));
        let replayed = a_star
            .path()
            .unwrap()
            .into_iter()
            .fold(start, |b, m| b.apply_move(m));
        assert_eq!(replayed, GOAL);
        assert!(a_star.nodes_expanded <= bfs.nodes_expanded);
        assert_eq!(bfs.goal_board(), Some(&GOAL));
    }

    #[test]
    fn candidates_pop_lowest_f_then_earliest() {
        let node = SearchNode::root(GOAL);
        let mut heap = BinaryHeap::new();
        for (f, sequence) in [(3, 0), (2, 2), (2, 1), (5, 3)] {
            heap.push(Candidate {
                f,
                sequence,
                node: Rc::clone(&node),
            });
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|c| c.key())).collect();
        assert_eq!(order, vec![(2, 1), (2, 2), (3, 0), (5, 3)]);
    }

    #[test]
    fn algorithm_parsing() {
        assert_eq!("bfs".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("1".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert!("dfs".parse::<Algorithm>().is_err());
    }
}
