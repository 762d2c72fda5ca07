use pathkit_core::{
    Decorated, Edge, EdgeGraph, Graph, GraphError, Node, NodeId, NodeKey, Result, Traversability,
    TraversableNode,
};

/// Graph decorator that adds a traversability flag to every node.
///
/// Flags live in a side table indexed by node id; the wrapped topology is untouched. A node
/// marked non-traversable is never reported as anyone's neighbor, so searches route around it
/// (a search may still start on one).
#[derive(Debug, Clone)]
pub struct TraversableGraph<G> {
    inner: G,
    flags: Vec<Traversability>,
}

impl<G: Graph> TraversableGraph<G> {
    pub fn new(inner: G) -> Self {
        let flags = vec![Traversability::default(); inner.node_count()];
        Self { inner, flags }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    pub fn set_traversable(&mut self, node: &Node, traversable: bool) -> Result<()> {
        let id = self
            .inner
            .resolve(node)
            .map(Node::id)
            .ok_or(GraphError::UnknownNode { key: node.key() })?;
        self.flags[id.index()].traversable = traversable;
        Ok(())
    }

    /// Mark every node resolved from `keys` as blocked; returns how many were found.
    pub fn block_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = NodeKey>,
    {
        let mut blocked = 0;
        for key in keys {
            if let Some(id) = self.inner.node_at(key).map(Node::id) {
                self.flags[id.index()].traversable = false;
                blocked += 1;
            }
        }
        blocked
    }

    /// Unknown nodes are reported as non-traversable.
    pub fn is_traversable(&self, node: &Node) -> bool {
        self.inner
            .resolve(node)
            .is_some_and(|n| self.flags[n.id().index()].traversable)
    }

    /// Decorated view of this graph's copy of `node`.
    pub fn decorated(&self, node: &Node) -> Option<TraversableNode<'_>> {
        let own = self.inner.resolve(node)?;
        Some(Decorated::new(own, self.flags[own.id().index()]))
    }

    pub fn blocked_count(&self) -> usize {
        self.flags.iter().filter(|f| !f.traversable).count()
    }

    fn open(&self, id: NodeId) -> bool {
        self.flags.get(id.index()).is_some_and(|f| f.traversable)
    }
}

impl<G: Graph> Graph for TraversableGraph<G> {
    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.inner.node(id)
    }

    fn node_at(&self, key: NodeKey) -> Option<&Node> {
        self.inner.node_at(key)
    }

    fn neighbors_into(&self, node: NodeId, out: &mut Vec<NodeId>) {
        let start = out.len();
        self.inner.neighbors_into(node, out);
        let mut kept = start;
        for read in start..out.len() {
            if self.open(out[read]) {
                out[kept] = out[read];
                kept += 1;
            }
        }
        out.truncate(kept);
    }

    fn cost(&self, from: &Node, to: &Node) -> f64 {
        self.inner.cost(from, to)
    }
}

/// Edges join two traversable nodes only; a blocked node reports none, so every remaining
/// connection is seen from both ends.
impl<G: EdgeGraph> EdgeGraph for TraversableGraph<G> {
    fn edges(&self, node: &Node) -> Vec<Edge> {
        if !self.is_traversable(node) {
            return Vec::new();
        }
        let mut edges = self.inner.edges(node);
        edges.retain(|e| self.open(e.destination));
        edges
    }
}
