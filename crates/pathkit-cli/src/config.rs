//! Scenario files: one graph, two endpoints and per-scenario overrides, loaded from YAML.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use pathkit_core::{Graph, HeuristicKind, Node, NodeKey};
use pathkit_nav::{GraphBuilder, GraphSpec, NavGraph, TollGraph, TraversableGraph};

/// Graph a scenario searches: blocked nodes first, tolls layered on top.
pub type ScenarioGraph = TollGraph<TraversableGraph<NavGraph>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub graph: GraphSpec,

    #[serde(default)]
    pub heuristic: HeuristicKind,

    /// Lattice coordinates on grids, vertex ids on meshes
    pub start: NodeKey,
    pub goal: NodeKey,

    /// Nodes no search may enter
    #[serde(default)]
    pub blocked: Vec<NodeKey>,

    #[serde(default)]
    pub tolls: Vec<TollConfig>,
}

/// Undirected cost multiplier between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TollConfig {
    pub from: NodeKey,
    pub to: NodeKey,
    pub multiplier: f64,
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build the graph and apply blocked nodes and tolls.
    ///
    /// Blocked keys outside the graph are skipped with a warning; toll endpoints must exist.
    pub fn build(&self) -> Result<ScenarioGraph> {
        let graph = GraphBuilder::new()
            .build(&self.graph)
            .with_context(|| format!("Failed to build {} graph", kind_of(&self.graph)))?;

        let mut graph = TraversableGraph::new(graph);
        for &key in &self.blocked {
            if graph.block_all([key]) == 0 {
                tracing::warn!(node = %key, "blocked node is not part of the graph");
            }
        }

        let mut graph = TollGraph::new(graph);
        for toll in &self.tolls {
            let from = lookup(&graph, toll.from, "toll endpoint")?;
            let to = lookup(&graph, toll.to, "toll endpoint")?;
            graph
                .set_toll(&from, &to, toll.multiplier)
                .with_context(|| format!("Invalid toll between {} and {}", toll.from, toll.to))?;
        }

        tracing::info!(
            kind = kind_of(&self.graph),
            nodes = graph.node_count(),
            blocked = graph.inner().blocked_count(),
            tolls = graph.toll_count(),
            "scenario graph ready"
        );
        Ok(graph)
    }

    /// Start and goal resolved against `graph`.
    pub fn endpoints<G: Graph>(&self, graph: &G) -> Result<(Node, Node)> {
        Ok((
            lookup(graph, self.start, "start")?,
            lookup(graph, self.goal, "goal")?,
        ))
    }
}

fn lookup<G: Graph>(graph: &G, key: NodeKey, role: &str) -> Result<Node> {
    graph
        .node_at(key)
        .copied()
        .ok_or_else(|| anyhow!("{role} {key} is not part of the graph"))
}

fn kind_of(spec: &GraphSpec) -> &'static str {
    match spec {
        GraphSpec::Grid2 { .. } => "grid2",
        GraphSpec::Grid3 { .. } => "grid3",
        GraphSpec::Mesh { .. } => "mesh",
    }
}
