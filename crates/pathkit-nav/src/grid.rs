use pathkit_core::{Edge, EdgeGraph, Graph, GraphError, Node, NodeId, NodeKey, Position, Result};

const AXES: [&str; 3] = ["width", "height", "depth"];

/// Uniform lattice graph with axis-aligned adjacency only (4-connected in 2D, 6-connected in
/// 3D).
///
/// One node is allocated per cell with its integer coordinates as position. Adjacency is
/// computed on demand from the bounds; nothing beyond the node arena is stored.
#[derive(Debug, Clone)]
pub struct GridGraph<const D: usize> {
    extent: [u32; D],
    nodes: Vec<Node>,
}

pub type GridGraph2 = GridGraph<2>;
pub type GridGraph3 = GridGraph<3>;

impl GridGraph<2> {
    pub fn new(width: i64, height: i64) -> Result<Self> {
        Self::with_extent([width, height])
    }

    pub fn width(&self) -> u32 {
        self.extent[0]
    }

    pub fn height(&self) -> u32 {
        self.extent[1]
    }

    pub fn cell(&self, x: i64, y: i64) -> Option<&Node> {
        self.at([x, y])
    }
}

impl GridGraph<3> {
    pub fn new(width: i64, height: i64, depth: i64) -> Result<Self> {
        Self::with_extent([width, height, depth])
    }

    pub fn width(&self) -> u32 {
        self.extent[0]
    }

    pub fn height(&self) -> u32 {
        self.extent[1]
    }

    pub fn depth(&self) -> u32 {
        self.extent[2]
    }

    pub fn cell(&self, x: i64, y: i64, z: i64) -> Option<&Node> {
        self.at([x, y, z])
    }
}

impl<const D: usize> GridGraph<D> {
    fn with_extent(requested: [i64; D]) -> Result<Self> {
        let mut extent = [0u32; D];
        let mut count: u64 = 1;
        for (axis, &value) in requested.iter().enumerate() {
            let axis_name = AXES.get(axis).copied().unwrap_or("extent");
            if value <= 0 || value > i64::from(u32::MAX) {
                return Err(GraphError::InvalidDimension {
                    axis: axis_name,
                    value,
                });
            }
            extent[axis] = value as u32;
            count = count.saturating_mul(value as u64);
        }
        if count > u64::from(u32::MAX) {
            return Err(GraphError::InvalidDimension {
                axis: "cell count",
                value: i64::try_from(count).unwrap_or(i64::MAX),
            });
        }

        let mut grid = Self {
            extent,
            nodes: Vec::with_capacity(count as usize),
        };
        for index in 0..count as usize {
            let coords = grid.coords_of(index).map(|c| c as f64);
            let position = Position::from_slice(&coords).ok_or(GraphError::InvalidDimension {
                axis: "dimensions",
                value: D as i64,
            })?;
            grid.nodes.push(Node::at(NodeId::from(index), position));
        }

        tracing::debug!(extent = ?grid.extent, nodes = grid.nodes.len(), "built grid graph");
        Ok(grid)
    }

    pub fn extent(&self) -> [u32; D] {
        self.extent
    }

    /// Node at integer lattice coordinates; `None` outside `[0, extent)` on any axis.
    pub fn at(&self, coords: [i64; D]) -> Option<&Node> {
        self.index_of(coords).map(|i| &self.nodes[i])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn coords_of(&self, index: usize) -> [i64; D] {
        let mut coords = [0i64; D];
        let mut rest = index as u64;
        for (axis, c) in coords.iter_mut().enumerate() {
            let len = u64::from(self.extent[axis]);
            *c = (rest % len) as i64;
            rest /= len;
        }
        coords
    }

    fn index_of(&self, coords: [i64; D]) -> Option<usize> {
        let mut index: u64 = 0;
        for axis in (0..D).rev() {
            let len = i64::from(self.extent[axis]);
            let c = coords[axis];
            if c < 0 || c >= len {
                return None;
            }
            index = index * len as u64 + c as u64;
        }
        Some(index as usize)
    }

    // Only exact integral coordinates name a cell.
    fn lattice(position: Position) -> Option<[i64; D]> {
        if position.dims() != D {
            return None;
        }
        let mut coords = [0i64; D];
        for (c, &v) in coords.iter_mut().zip(position.coords()) {
            if !v.is_finite() || v.fract() != 0.0 || v.abs() > i64::MAX as f64 {
                return None;
            }
            *c = v as i64;
        }
        Some(coords)
    }
}

impl<const D: usize> Graph for GridGraph<D> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_at(&self, key: NodeKey) -> Option<&Node> {
        match key {
            NodeKey::Position(position) => self.at(Self::lattice(position)?),
            NodeKey::Vertex(_) => None,
        }
    }

    fn neighbors_into(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if node.index() >= self.nodes.len() {
            return;
        }
        let coords = self.coords_of(node.index());
        // Fixed order for determinism: per axis, -1 then +1.
        for axis in 0..D {
            for delta in [-1, 1] {
                let mut next = coords;
                next[axis] += delta;
                if let Some(i) = self.index_of(next) {
                    out.push(NodeId::from(i));
                }
            }
        }
    }

    /// Straight-line distance, i.e. `1.0` between axis-adjacent cells.
    fn cost(&self, from: &Node, to: &Node) -> f64 {
        from.point().distance(to.point())
    }
}

impl<const D: usize> EdgeGraph for GridGraph<D> {
    fn edges(&self, node: &Node) -> Vec<Edge> {
        let Some(node) = self.resolve(node) else {
            return Vec::new();
        };
        let mut ids = Vec::with_capacity(2 * D);
        self.neighbors_into(node.id(), &mut ids);
        ids.into_iter()
            .map(|id| Edge::new(node.id(), id, 1.0))
            .collect()
    }
}
