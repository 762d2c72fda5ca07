use pathkit_core::{Node, NodeId, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a search: nodes from start to goal inclusive, plus the accumulated cost.
///
/// An empty path is the failure signal; it carries a cost of `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphPath {
    pub nodes: Vec<Node>,
    pub cost: f64,
}

impl GraphPath {
    pub fn new(nodes: Vec<Node>, cost: f64) -> Self {
        Self { nodes, cost }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of transitions, one less than the node count.
    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn goal(&self) -> Option<&Node> {
        self.nodes.last()
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(Node::id).collect()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.nodes.iter().map(Node::position).collect()
    }
}
