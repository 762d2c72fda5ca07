use core::hash::{Hash, Hasher};

use crate::NodeId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cost-bearing connection between two nodes of the same graph.
///
/// Identity is the directed `(source, destination)` pair; `cost` is payload and takes no part in
/// equality or hashing.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub source: NodeId,
    pub destination: NodeId,
    pub cost: f64,
}

impl Edge {
    pub fn new(source: NodeId, destination: NodeId, cost: f64) -> Self {
        Self {
            source,
            destination,
            cost,
        }
    }

    /// Same connection traversed the other way.
    pub fn reversed(self) -> Self {
        Self::new(self.destination, self.source, self.cost)
    }

    /// Whether this edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.source == a && self.destination == b) || (self.source == b && self.destination == a)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.destination == other.destination
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.destination.hash(state);
    }
}
