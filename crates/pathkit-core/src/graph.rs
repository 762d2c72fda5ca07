use crate::{Edge, Node, NodeId, NodeKey};

/// Position-keyed graph over a fixed node set.
///
/// Topology is read-only once built; per-search state lives with the search, never on the
/// nodes. Implementations must only report neighbors that exist in the graph and must define
/// [`Graph::cost`] for every pair they report as neighbors.
pub trait Graph {
    fn node_count(&self) -> usize;

    /// Arena lookup. `None` when `id` was not assigned by this graph.
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Resolve a node by identity: lattice position on grids, vertex id on meshes.
    ///
    /// Unknown or out-of-range keys yield `None`.
    fn node_at(&self, key: NodeKey) -> Option<&Node>;

    /// Append the ids of nodes directly reachable from `node` into `out`.
    ///
    /// The caller clears `out` first. Order is fixed per graph so searches are reproducible.
    fn neighbors_into(&self, node: NodeId, out: &mut Vec<NodeId>);

    /// Cost of the direct transition `from -> to`.
    fn cost(&self, from: &Node, to: &Node) -> f64;

    /// Directly reachable nodes; empty for isolated or foreign nodes.
    fn neighbors(&self, node: &Node) -> Vec<&Node> {
        let Some(node) = self.resolve(node) else {
            return Vec::new();
        };
        let mut ids = Vec::new();
        self.neighbors_into(node.id(), &mut ids);
        ids.into_iter().filter_map(|id| self.node(id)).collect()
    }

    /// This graph's copy of `node`, matched by id first and by key otherwise.
    fn resolve(&self, node: &Node) -> Option<&Node> {
        match self.node(node.id()) {
            Some(own) if own == node => Some(own),
            _ => self.node_at(node.key()),
        }
    }

    fn contains(&self, node: &Node) -> bool {
        self.resolve(node).is_some()
    }
}

/// Graphs that expose their connections as first-class, cost-bearing edges.
pub trait EdgeGraph: Graph {
    /// Outgoing edges of `node`, in neighbor order.
    fn edges(&self, node: &Node) -> Vec<Edge>;

    /// Total number of undirected connections.
    fn edge_count(&self) -> usize {
        (0..self.node_count())
            .filter_map(|i| self.node(NodeId::from(i)))
            .map(|n| self.edges(n).len())
            .sum::<usize>()
            / 2
    }
}

impl<G: Graph + ?Sized> Graph for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        (**self).node(id)
    }

    fn node_at(&self, key: NodeKey) -> Option<&Node> {
        (**self).node_at(key)
    }

    fn neighbors_into(&self, node: NodeId, out: &mut Vec<NodeId>) {
        (**self).neighbors_into(node, out)
    }

    fn cost(&self, from: &Node, to: &Node) -> f64 {
        (**self).cost(from, to)
    }
}

impl<G: EdgeGraph + ?Sized> EdgeGraph for &G {
    fn edges(&self, node: &Node) -> Vec<Edge> {
        (**self).edges(node)
    }
}
