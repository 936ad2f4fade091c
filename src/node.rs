//! Search tree nodes and path reconstruction.
//!
//! Nodes point back at their parent through an [`Rc`], so a solution node keeps
//! exactly its chain of ancestors alive. Every node is built once from an
//! existing parent and never changes, which rules out cycles.

use std::rc::Rc;

use crate::puzzle::{Board, Move};

#[derive(Debug)]
pub struct SearchNode {
    board: Board,
    parent: Option<Rc<SearchNode>>,
    action: Option<Move>,
    depth: usize,
}

impl SearchNode {
    pub fn root(board: Board) -> Rc<Self> {
        Rc::new(Self {
            board,
            parent: None,
            action: None,
            depth: 0,
        })
    }

    /// Successor reached by sliding the blank in direction `movement`.
    ///
    /// # Panics
    ///
    /// Panics if `movement` is illegal for this node's board.
    pub fn child(self: &Rc<Self>, movement: Move) -> Rc<Self> {
        Rc::new(Self {
            board: self.board.apply_move(movement),
            parent: Some(Rc::clone(self)),
            action: Some(movement),
            depth: self.depth + 1,
        })
    }

    /// Successors for every legal move, in Left, Right, Up, Down order.
    pub fn expand(self: &Rc<Self>) -> impl Iterator<Item = Rc<Self>> + '_ {
        self.board.legal_moves().map(move |m| self.child(m))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<&Rc<SearchNode>> {
        self.parent.as_ref()
    }

    /// The move that produced this node, `None` for the root.
    pub fn action(&self) -> Option<Move> {
        self.action
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// This node followed by each ancestor up to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Moves leading from the root to this node.
    pub fn path(&self) -> Vec<Move> {
        reconstruct_path(self)
    }
}

pub struct Ancestors<'a> {
    next: Option<&'a SearchNode>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a SearchNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent.as_deref();
        Some(node)
    }
}

/// Walk the parent chain from `node` and return the moves in root-to-node order.
pub fn reconstruct_path(node: &SearchNode) -> Vec<Move> {
    let mut path: Vec<Move> = node.ancestors().filter_map(SearchNode::action).collect();
    path.reverse();
    path
}
