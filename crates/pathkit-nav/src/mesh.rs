use std::collections::{BTreeSet, HashMap, VecDeque};

use pathkit_core::{
    Edge, EdgeGraph, Graph, GraphError, Node, NodeId, NodeKey, Position, Result, Vec3,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Vertex and triangle buffers as handed over by a mesh loader.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(vertex) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(GraphError::NonFiniteVertex { vertex });
        }
        let vertex_count = self.vertices.len();
        for (triangle, tri) in self.triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(GraphError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

/// Builds a [`MeshGraph`] from [`MeshData`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshGraphBuilder {
    weld: bool,
}

impl MeshGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse vertices with bit-identical positions into the lowest vertex id.
    pub fn weld(mut self, weld: bool) -> Self {
        self.weld = weld;
        self
    }

    pub fn build(&self, mesh: &MeshData) -> Result<MeshGraph> {
        mesh.validate()?;

        let mut by_vertex = Vec::with_capacity(mesh.vertices.len());
        let mut nodes = Vec::new();
        let mut welded: HashMap<Position, NodeId> = HashMap::new();

        for (vertex, &point) in mesh.vertices.iter().enumerate() {
            let position = Position::xyz(point.x, point.y, point.z);
            if self.weld {
                if let Some(&id) = welded.get(&position) {
                    by_vertex.push(id);
                    continue;
                }
            }
            let id = NodeId::from(nodes.len());
            nodes.push(Node::vertex(id, vertex as u32, point));
            welded.entry(position).or_insert(id);
            by_vertex.push(id);
        }

        // Sets keep neighbor order ascending and drop duplicate shared edges.
        let mut adjacency = vec![BTreeSet::new(); nodes.len()];
        for tri in &mesh.triangles {
            let [a, b, c] = tri.map(|v| by_vertex[v as usize]);
            for (from, to) in [(a, b), (b, c), (c, a)] {
                // Degenerate triangles repeat an index; never link a node to itself.
                if from == to {
                    continue;
                }
                adjacency[from.index()].insert(to);
                adjacency[to.index()].insert(from);
            }
        }

        let graph = MeshGraph {
            nodes,
            adjacency: adjacency
                .into_iter()
                .map(|set| set.into_iter().collect())
                .collect(),
            by_vertex,
            by_position: welded,
            source: mesh.clone(),
            weld: self.weld,
        };

        tracing::debug!(
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            nodes = graph.nodes.len(),
            edges = graph.edge_count(),
            "built mesh graph"
        );
        Ok(graph)
    }
}

/// Navigation graph over a triangulated surface.
///
/// Nodes are mesh vertices; two vertices are neighbors when some triangle contains both, and
/// moving between them costs their Euclidean distance. Vertices referenced by no triangle
/// become isolated nodes.
#[derive(Debug, Clone)]
pub struct MeshGraph {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<NodeId>>,
    by_vertex: Vec<NodeId>,
    by_position: HashMap<Position, NodeId>,
    source: MeshData,
    weld: bool,
}

impl MeshGraph {
    pub fn from_mesh(mesh: &MeshData) -> Result<Self> {
        MeshGraphBuilder::new().build(mesh)
    }

    /// Node for vertex id `vertex`; welded aliases resolve to the surviving vertex.
    pub fn vertex(&self, vertex: u32) -> Option<&Node> {
        let id = *self.by_vertex.get(vertex as usize)?;
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn mesh(&self) -> &MeshData {
        &self.source
    }

    pub fn triangle_count(&self) -> usize {
        self.source.triangles.len()
    }

    pub fn is_welded(&self) -> bool {
        self.weld
    }

    /// Vertex ids of nodes that no triangle touches.
    pub fn isolated_vertices(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .filter(|n| self.adjacency[n.id().index()].is_empty())
            .filter_map(Node::vertex_id)
            .collect()
    }

    /// Connected components, each sorted by node id, ordered by their smallest node.
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        let mut seen = vec![false; self.nodes.len()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for root in 0..self.nodes.len() {
            if seen[root] {
                continue;
            }
            seen[root] = true;
            queue.push_back(NodeId::from(root));
            let mut component = Vec::new();
            while let Some(id) = queue.pop_front() {
                component.push(id);
                for &next in &self.adjacency[id.index()] {
                    if !seen[next.index()] {
                        seen[next.index()] = true;
                        queue.push_back(next);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }

        components
    }
}

impl Graph for MeshGraph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_at(&self, key: NodeKey) -> Option<&Node> {
        match key {
            NodeKey::Vertex(vertex) => self.vertex(vertex),
            NodeKey::Position(position) => {
                let id = self.by_position.get(&position)?;
                self.nodes.get(id.index())
            }
        }
    }

    fn neighbors_into(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if let Some(adjacent) = self.adjacency.get(node.index()) {
            out.extend_from_slice(adjacent);
        }
    }

    fn cost(&self, from: &Node, to: &Node) -> f64 {
        from.point().distance(to.point())
    }
}

impl EdgeGraph for MeshGraph {
    fn edges(&self, node: &Node) -> Vec<Edge> {
        let Some(node) = self.resolve(node) else {
            return Vec::new();
        };
        self.adjacency[node.id().index()]
            .iter()
            .map(|&id| {
                let to = &self.nodes[id.index()];
                Edge::new(node.id(), id, self.cost(node, to))
            })
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct MeshGraphSerde {
    mesh: MeshData,
    #[serde(default)]
    weld: bool,
}

#[cfg(feature = "serde")]
impl Serialize for MeshGraph {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        MeshGraphSerde {
            mesh: self.source.clone(),
            weld: self.weld,
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for MeshGraph {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = MeshGraphSerde::deserialize(deserializer)?;
        MeshGraphBuilder::new()
            .weld(data.weld)
            .build(&data.mesh)
            .map_err(serde::de::Error::custom)
    }
}
