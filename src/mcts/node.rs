//! Search tree node representation.

use std::collections::BTreeMap;

use crate::ports::Position;

/// Index of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root is always the first node allocated
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the search tree.
///
/// Children are owned by the arena and referenced by [`NodeId`]; `parent` is a
/// plain index used only to walk back up during backpropagation.
#[derive(Debug, Clone)]
pub struct SearchNode<P: Position> {
    /// The position at this node
    pub state: P,
    /// Node that created this one; `None` for the root
    pub parent: Option<NodeId>,
    /// Expanded children keyed by the action leading to them
    pub children: BTreeMap<P::Action, NodeId>,
    /// Number of completed backpropagations through this node
    pub visits: u32,
    /// Sum of the values backpropagated through this node
    pub value: f64,
}

impl<P: Position> SearchNode<P> {
    pub fn new(state: P, parent: Option<NodeId>) -> Self {
        SearchNode {
            state,
            parent,
            children: BTreeMap::new(),
            visits: 0,
            value: 0.0,
        }
    }

    /// Mean backpropagated value, `None` until the node has been visited
    pub fn mean(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.value / f64::from(self.visits))
    }

    /// One child per legal move.
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == self.state.legal_moves().len()
    }

    /// Legal moves without a child yet, in legal-move order
    pub fn unexpanded_moves(&self) -> Vec<P::Action> {
        self.state
            .legal_moves()
            .into_iter()
            .filter(|mv| !self.children.contains_key(mv))
            .collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// UCT score of this node seen from a parent with `parent_visits` visits.
    ///
    /// Unvisited nodes score `+inf` so they are always tried before any
    /// visited sibling.
    pub fn uct_score(&self, parent_visits: u32, exploration: f64) -> f64 {
        let Some(mean) = self.mean() else {
            return f64::INFINITY;
        };
        let visits = f64::from(self.visits);
        let log_parent = f64::from(parent_visits.max(1)).ln();
        mean + exploration * (2.0 * log_parent / visits).sqrt()
    }
}
