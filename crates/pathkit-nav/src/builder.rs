use pathkit_core::{Edge, EdgeGraph, Graph, Node, NodeId, NodeKey, Result, Vec3};

use crate::{GridGraph2, GridGraph3, MeshData, MeshGraph, MeshGraphBuilder};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Declarative description of a graph to build.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum GraphSpec {
    Grid2 {
        width: i64,
        height: i64,
    },
    Grid3 {
        width: i64,
        height: i64,
        depth: i64,
    },
    Mesh {
        vertices: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        #[cfg_attr(feature = "serde", serde(default))]
        weld: bool,
    },
}

/// Factory for the concrete graph kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    mesh: MeshGraphBuilder,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weld bit-identical mesh vertices for every mesh this builder produces.
    pub fn weld_meshes(mut self, weld: bool) -> Self {
        self.mesh = self.mesh.weld(weld);
        self
    }

    pub fn grid2(&self, width: i64, height: i64) -> Result<GridGraph2> {
        GridGraph2::new(width, height)
    }

    pub fn grid3(&self, width: i64, height: i64, depth: i64) -> Result<GridGraph3> {
        GridGraph3::new(width, height, depth)
    }

    pub fn mesh(&self, mesh: &MeshData) -> Result<MeshGraph> {
        self.mesh.build(mesh)
    }

    pub fn build(&self, spec: &GraphSpec) -> Result<NavGraph> {
        Ok(match spec {
            GraphSpec::Grid2 { width, height } => NavGraph::Grid2(self.grid2(*width, *height)?),
            GraphSpec::Grid3 {
                width,
                height,
                depth,
            } => NavGraph::Grid3(self.grid3(*width, *height, *depth)?),
            GraphSpec::Mesh {
                vertices,
                triangles,
                weld,
            } => {
                let data = MeshData::new(vertices.clone(), triangles.clone());
                let builder = if *weld { self.mesh.weld(true) } else { self.mesh };
                NavGraph::Mesh(builder.build(&data)?)
            }
        })
    }
}

/// Any of the built-in graph kinds behind one type.
#[derive(Debug, Clone)]
pub enum NavGraph {
    Grid2(GridGraph2),
    Grid3(GridGraph3),
    Mesh(MeshGraph),
}

impl NavGraph {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Grid2(_) => "grid2",
            Self::Grid3(_) => "grid3",
            Self::Mesh(_) => "mesh",
        }
    }

    pub fn as_mesh(&self) -> Option<&MeshGraph> {
        match self {
            Self::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $graph:ident => $body:expr) => {
        match $self {
            NavGraph::Grid2($graph) => $body,
            NavGraph::Grid3($graph) => $body,
            NavGraph::Mesh($graph) => $body,
        }
    };
}

impl Graph for NavGraph {
    fn node_count(&self) -> usize {
        dispatch!(self, g => g.node_count())
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        dispatch!(self, g => g.node(id))
    }

    fn node_at(&self, key: NodeKey) -> Option<&Node> {
        dispatch!(self, g => g.node_at(key))
    }

    fn neighbors_into(&self, node: NodeId, out: &mut Vec<NodeId>) {
        dispatch!(self, g => g.neighbors_into(node, out))
    }

    fn cost(&self, from: &Node, to: &Node) -> f64 {
        dispatch!(self, g => g.cost(from, to))
    }
}

impl EdgeGraph for NavGraph {
    fn edges(&self, node: &Node) -> Vec<Edge> {
        dispatch!(self, g => g.edges(node))
    }

    fn edge_count(&self) -> usize {
        dispatch!(self, g => g.edge_count())
    }
}
