use std::collections::HashMap;

use pathkit_core::{
    Decorated, Edge, EdgeGraph, Graph, GraphError, Node, NodeId, NodeKey, Result, Toll,
    TolledEdge,
};

/// Graph decorator that scales selected edge costs by a toll multiplier.
///
/// Tolls are undirected and must be finite and `>= 1.0`, so a heuristic admissible for the
/// inner graph stays admissible here.
#[derive(Debug, Clone)]
pub struct TollGraph<G> {
    inner: G,
    tolls: HashMap<(NodeId, NodeId), Toll>,
}

impl<G: Graph> TollGraph<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            tolls: HashMap::new(),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    pub fn set_toll(&mut self, a: &Node, b: &Node, multiplier: f64) -> Result<()> {
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(GraphError::InvalidToll { value: multiplier });
        }
        let a = self.id_of(a)?;
        let b = self.id_of(b)?;
        self.tolls.insert(pair(a, b), Toll { multiplier });
        Ok(())
    }

    pub fn clear_toll(&mut self, a: &Node, b: &Node) -> bool {
        match (self.inner.resolve(a), self.inner.resolve(b)) {
            (Some(a), Some(b)) => self.tolls.remove(&pair(a.id(), b.id())).is_some(),
            _ => false,
        }
    }

    /// Toll between `a` and `b`; the neutral toll when none is set.
    pub fn toll(&self, a: &Node, b: &Node) -> Toll {
        match (self.inner.resolve(a), self.inner.resolve(b)) {
            (Some(a), Some(b)) => self.toll_by_id(a.id(), b.id()),
            _ => Toll::default(),
        }
    }

    pub fn toll_count(&self) -> usize {
        self.tolls.len()
    }

    fn toll_by_id(&self, a: NodeId, b: NodeId) -> Toll {
        self.tolls.get(&pair(a, b)).copied().unwrap_or_default()
    }

    fn id_of(&self, node: &Node) -> Result<NodeId> {
        self.inner
            .resolve(node)
            .map(Node::id)
            .ok_or(GraphError::UnknownNode { key: node.key() })
    }
}

impl<G: EdgeGraph> TollGraph<G> {
    /// Outgoing edges of `node`, each decorated with its toll.
    pub fn tolled_edges(&self, node: &Node) -> Vec<TolledEdge> {
        self.inner
            .edges(node)
            .into_iter()
            .map(|e| Decorated::new(e, self.toll_by_id(e.source, e.destination)))
            .collect()
    }
}

impl<G: Graph> Graph for TollGraph<G> {
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
        self.inner.neighbors_into(node, out)
    }

    fn cost(&self, from: &Node, to: &Node) -> f64 {
        self.inner.cost(from, to) * self.toll(from, to).multiplier
    }
}

impl<G: EdgeGraph> EdgeGraph for TollGraph<G> {
    fn edges(&self, node: &Node) -> Vec<Edge> {
        self.tolled_edges(node).iter().map(TolledEdge::to_edge).collect()
    }
}

fn pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
