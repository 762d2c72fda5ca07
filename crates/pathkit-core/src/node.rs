use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense arena index of a node inside the graph that owns it.
///
/// Ids are only meaningful for the graph that assigned them; identity across graphs goes
/// through [`NodeKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

/// Real-valued coordinates with a fixed dimensionality of 2 or 3.
///
/// Equality and hashing compare coordinate bit patterns (with `-0.0` folded into `0.0`), so a
/// `Position` can key hash maps.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Position {
    coords: [f64; 3],
    dims: u8,
}

impl Position {
    pub const fn xy(x: f64, y: f64) -> Self {
        Self {
            coords: [x, y, 0.0],
            dims: 2,
        }
    }

    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: [x, y, z],
            dims: 3,
        }
    }

    /// Build from a 2- or 3-element slice.
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match *coords {
            [x, y] => Some(Self::xy(x, y)),
            [x, y, z] => Some(Self::xyz(x, y, z)),
            _ => None,
        }
    }

    pub fn dims(&self) -> usize {
        self.dims as usize
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords[..self.dims()]
    }

    pub fn axis(&self, axis: usize) -> Option<f64> {
        self.coords().get(axis).copied()
    }

    /// Embed into 3D space; 2D positions land on `z = 0`.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::from(self.coords)
    }

    fn bits(&self) -> [u64; 3] {
        self.coords.map(|c| if c == 0.0 { 0 } else { c.to_bits() })
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && self.bits() == other.bits()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dims.hash(state);
        self.bits().hash(state);
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position{self}")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, c) in self.coords().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&coords)
            .ok_or_else(|| format!("expected 2 or 3 coordinates, got {}", coords.len()))
    }
}

impl From<Position> for Vec<f64> {
    fn from(position: Position) -> Self {
        position.coords().to_vec()
    }
}

/// Identity of a node: its lattice position on grids, its vertex id on meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum NodeKey {
    Position(Position),
    Vertex(u32),
}

impl From<Position> for NodeKey {
    fn from(position: Position) -> Self {
        Self::Position(position)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(p) => write!(f, "{p}"),
            Self::Vertex(v) => write!(f, "v{v}"),
        }
    }
}

/// One traversable location.
///
/// Two nodes are equal iff their [`NodeKey`]s are equal. The arena id and the cached 3D point
/// do not take part in equality or hashing, so nodes taken from two graphs built with the same
/// dimensions are interchangeable in sets and maps.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    id: NodeId,
    key: NodeKey,
    point: Vec3,
}

impl Node {
    pub fn new(id: NodeId, key: NodeKey, point: Vec3) -> Self {
        Self { id, key, point }
    }

    /// Grid node located at `position`.
    pub fn at(id: NodeId, position: Position) -> Self {
        Self::new(id, NodeKey::Position(position), position.to_vec3())
    }

    /// Mesh node for vertex `vertex` located at `point`.
    pub fn vertex(id: NodeId, vertex: u32, point: Vec3) -> Self {
        Self::new(id, NodeKey::Vertex(vertex), point)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn position(&self) -> Position {
        match self.key {
            NodeKey::Position(p) => p,
            NodeKey::Vertex(_) => Position::xyz(self.point.x, self.point.y, self.point.z),
        }
    }

    pub fn vertex_id(&self) -> Option<u32> {
        match self.key {
            NodeKey::Vertex(v) => Some(v),
            NodeKey::Position(_) => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
