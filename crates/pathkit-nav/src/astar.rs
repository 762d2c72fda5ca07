use pathkit_core::{Graph, Heuristic, Node, NodeId};

use crate::open::OpenList;
use crate::{GraphPath, PathfinderObserver};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-node search state, kept in a side table owned by the [`Pathfinder`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchRecord {
    /// Best known cost from the start.
    pub g: f64,
    /// Heuristic estimate to the goal.
    pub h: f64,
    /// Predecessor on the best known path.
    pub parent: Option<NodeId>,
}

impl SearchRecord {
    pub const UNSEEN: Self = Self {
        g: f64::INFINITY,
        h: 0.0,
        parent: None,
    };

    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

impl Default for SearchRecord {
    fn default() -> Self {
        Self::UNSEEN
    }
}

/// Handle returned by [`Pathfinder::register_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(pub u64);

/// Reusable scratch buffers, reset at the start of every search.
#[derive(Debug, Default)]
struct SearchScratch {
    open: OpenList,
    records: Vec<SearchRecord>,
    closed: Vec<bool>,
    neighbors: Vec<NodeId>,
}

impl SearchScratch {
    fn reset(&mut self, node_count: usize) {
        self.open.reset(node_count);
        self.records.clear();
        self.records.resize(node_count, SearchRecord::UNSEEN);
        self.closed.clear();
        self.closed.resize(node_count, false);
        self.neighbors.clear();
    }
}

/// A* over any [`Graph`] with any [`Heuristic`].
///
/// The pathfinder owns the per-search state, not the graph: topology is only read, so the same
/// graph can back any number of pathfinders. Searches on one pathfinder are sequential
/// (`&mut self`). Pass `&graph` to borrow a graph instead of moving it in.
pub struct Pathfinder<G, H> {
    graph: G,
    heuristic: H,
    observers: Vec<(ObserverId, Box<dyn PathfinderObserver>)>,
    next_observer: u64,
    scratch: SearchScratch,
    expanded: usize,
}

impl<G: Graph, H: Heuristic> Pathfinder<G, H> {
    pub fn new(graph: G, heuristic: H) -> Self {
        Self {
            graph,
            heuristic,
            observers: Vec::new(),
            next_observer: 0,
            scratch: SearchScratch::default(),
            expanded: 0,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable access between searches, e.g. to toggle traversability.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    pub fn into_parts(self) -> (G, H) {
        (self.graph, self.heuristic)
    }

    pub fn register_observer<O>(&mut self, observer: O) -> ObserverId
    where
        O: PathfinderObserver + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether an observer with this id was registered.
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Nodes expanded by the most recent search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// State the most recent search left for `node`, if it was discovered.
    pub fn record(&self, node: &Node) -> Option<&SearchRecord> {
        let node = self.graph.resolve(node)?;
        self.scratch
            .records
            .get(node.id().index())
            .filter(|r| r.g.is_finite())
    }

    /// Shortest path from `start` to `goal`, both inclusive.
    ///
    /// Returns an empty path when the goal is unreachable or either endpoint is not part of the
    /// graph. `start == goal` yields `[start]`.
    pub fn find_path(&mut self, start: &Node, goal: &Node) -> GraphPath {
        self.search(start, goal).finish()
    }

    /// Begin a search that advances one expansion per [`AStarSearch::step`].
    pub fn search(&mut self, start: &Node, goal: &Node) -> AStarSearch<'_, G, H> {
        let node_count = self.graph.node_count();
        self.scratch.reset(node_count);
        self.expanded = 0;

        let start = self.graph.resolve(start).copied();
        let goal = self.graph.resolve(goal).copied();

        match (start, goal) {
            (Some(start), Some(goal)) => {
                tracing::debug!(start = %start, goal = %goal, nodes = node_count, "search started");
                let h = self.heuristic.calculate(&start, &goal);
                self.scratch.records[start.id().index()] = SearchRecord {
                    g: 0.0,
                    h,
                    parent: None,
                };
                self.scratch.open.push(start.id(), h);
            }
            _ => {
                tracing::debug!("search endpoint is not part of the graph");
            }
        }

        AStarSearch {
            finder: self,
            goal,
            outcome: None,
        }
    }
}

/// An in-progress search. Iterating yields each node as it becomes current.
///
/// Observers see the same events whether the search is stepped or run with
/// [`AStarSearch::finish`]. `on_finish` fires once, when the search ends; a search dropped
/// before that never reports.
pub struct AStarSearch<'a, G, H> {
    finder: &'a mut Pathfinder<G, H>,
    goal: Option<Node>,
    outcome: Option<GraphPath>,
}

impl<G: Graph, H: Heuristic> AStarSearch<'_, G, H> {
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The final path once the search has ended.
    pub fn outcome(&self) -> Option<&GraphPath> {
        self.outcome.as_ref()
    }

    /// Nodes currently waiting in the open set.
    pub fn frontier_len(&self) -> usize {
        self.finder.scratch.open.len()
    }

    /// Expand one node. Returns it, or `None` once the search has ended.
    pub fn step(&mut self) -> Option<Node> {
        if self.outcome.is_some() {
            return None;
        }

        let Pathfinder {
            graph,
            heuristic,
            observers,
            scratch,
            expanded,
            ..
        } = &mut *self.finder;

        let (Some(goal), Some(current_id)) = (self.goal, scratch.open.pop()) else {
            self.complete(GraphPath::default());
            return None;
        };
        let Some(current) = graph.node(current_id).copied() else {
            self.complete(GraphPath::default());
            return None;
        };

        *expanded += 1;
        let record = scratch.records[current_id.index()];
        tracing::trace!(node = %current, g = record.g, f = record.f(), "expand");
        for (_, observer) in observers.iter_mut() {
            observer.on_node(&current, &record);
        }

        if current == goal {
            let path = reconstruct(&*graph, &scratch.records, current_id);
            self.complete(path);
            return Some(current);
        }

        scratch.closed[current_id.index()] = true;
        scratch.neighbors.clear();
        graph.neighbors_into(current_id, &mut scratch.neighbors);

        for &neighbor_id in &scratch.neighbors {
            if scratch.closed.get(neighbor_id.index()).copied().unwrap_or(true) {
                continue;
            }
            let Some(neighbor) = graph.node(neighbor_id) else {
                continue;
            };

            let tentative_g = record.g + graph.cost(&current, neighbor);
            let queued = scratch.open.contains(neighbor_id);
            let slot = &mut scratch.records[neighbor_id.index()];
            if queued && tentative_g >= slot.g {
                continue;
            }

            *slot = SearchRecord {
                g: tentative_g,
                h: heuristic.calculate(neighbor, &goal),
                parent: Some(current_id),
            };
            scratch.open.push(neighbor_id, slot.f());
        }

        Some(current)
    }

    /// Run to completion and return the path (empty when unreachable).
    pub fn finish(mut self) -> GraphPath {
        while self.step().is_some() {}
        self.outcome.take().unwrap_or_default()
    }

    fn complete(&mut self, path: GraphPath) {
        tracing::debug!(
            expanded = self.finder.expanded,
            length = path.len(),
            cost = path.cost,
            "search finished"
        );
        for (_, observer) in self.finder.observers.iter_mut() {
            observer.on_finish(&path);
        }
        self.outcome = Some(path);
    }
}

impl<G: Graph, H: Heuristic> Iterator for AStarSearch<'_, G, H> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        self.step()
    }
}

fn reconstruct<G: Graph>(graph: &G, records: &[SearchRecord], goal: NodeId) -> GraphPath {
    let cost = records[goal.index()].g;
    let mut nodes = Vec::new();
    let mut current = Some(goal);
    while let Some(id) = current {
        let Some(node) = graph.node(id) else {
            break;
        };
        nodes.push(*node);
        current = records[id.index()].parent;
    }
    nodes.reverse();
    GraphPath::new(nodes, cost)
}
