//! Search tree operations.
//!
//! [`SearchTree`] owns every node in a flat arena. Ownership only flows
//! downwards (a node's `children` map); the `parent` index exists so that
//! backpropagation can walk back to the root without any shared pointers.

use rand::Rng;

use super::node::{NodeId, SearchNode};
use crate::ports::Position;

/// Arena-based search tree.
#[derive(Debug, Clone)]
pub struct SearchTree<P: Position> {
    nodes: Vec<SearchNode<P>>,
}

impl<P: Position> SearchTree<P> {
    /// Create a tree holding only the root position.
    pub fn new(root_state: P) -> Self {
        SearchTree {
            nodes: vec![SearchNode::new(root_state, None)],
        }
    }

    pub fn root(&self) -> &SearchNode<P> {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<P> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SearchNode<P> {
        &mut self.nodes[id.0]
    }

    /// Number of nodes allocated so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node with its id, in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<P>)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Child of `id` with the highest UCT score, first one on ties.
    ///
    /// Returns `None` for a node without children.
    pub fn best_uct_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.node(id);
        let mut best: Option<(NodeId, f64)> = None;

        for &child_id in node.children.values() {
            let score = self.node(child_id).uct_score(node.visits, exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }

        best.map(|(child_id, _)| child_id)
    }

    /// Descend from `from` while the current node is fully expanded and has
    /// children, following the best UCT child at each level.
    pub fn select(&self, from: NodeId, exploration: f64) -> NodeId {
        let mut current = from;
        while self.node(current).is_fully_expanded() {
            match self.best_uct_child(current, exploration) {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    /// Add one child for a uniformly chosen untried legal move of `id`.
    ///
    /// Returns `None` when the node has no legal moves or every legal move
    /// already has a child.
    pub fn expand<R: Rng + ?Sized>(&mut self, id: NodeId, rng: &mut R) -> Option<NodeId> {
        let untried = self.node(id).unexpanded_moves();
        if untried.is_empty() {
            return None;
        }

        let action = untried[rng.random_range(0..untried.len())];
        let state = self.node(id).state.apply_move(action);
        let child_id = NodeId(self.nodes.len());

        self.nodes.push(SearchNode::new(state, Some(id)));
        self.node_mut(id).children.insert(action, child_id);
        Some(child_id)
    }

    /// Add `amount` to the value and one to the visit count of `from` and each
    /// of its ancestors. Returns the number of nodes updated.
    pub fn backpropagate(&mut self, from: NodeId, amount: f64) -> usize {
        let mut updated = 0;
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let node = self.node_mut(id);
            node.visits += 1;
            node.value += amount;
            cursor = node.parent;
            updated += 1;
        }
        updated
    }

    /// Ids from `id` up to the root, inclusive
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut cursor = self.node(id).parent;
        while let Some(parent) = cursor {
            path.push(parent);
            cursor = self.node(parent).parent;
        }
        path
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize {
        self.path_to_root(id).len() - 1
    }

    /// Action leading from the parent of `id` to `id`
    pub fn action_to(&self, id: NodeId) -> Option<P::Action> {
        let parent = self.node(id).parent?;
        self.node(parent)
            .children
            .iter()
            .find_map(|(&action, &child)| (child == id).then_some(action))
    }
}
