use crate::Node;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Estimated remaining cost between two nodes.
///
/// Results must be `>= 0`. Shortest paths are only guaranteed when the estimate never exceeds
/// the true remaining cost; nothing stops a caller from supplying one that does.
pub trait Heuristic {
    fn calculate(&self, a: &Node, b: &Node) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&Node, &Node) -> f64,
{
    fn calculate(&self, a: &Node, b: &Node) -> f64 {
        self(a, b)
    }
}

/// Straight-line distance between node points.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    fn calculate(&self, a: &Node, b: &Node) -> f64 {
        a.point().distance(b.point())
    }
}

/// Axis-aligned distance; admissible on 4/6-connected unit grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn calculate(&self, a: &Node, b: &Node) -> f64 {
        a.point().manhattan(b.point())
    }
}

/// Always zero, turning A* into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zero;

impl Heuristic for Zero {
    fn calculate(&self, _a: &Node, _b: &Node) -> f64 {
        0.0
    }
}

/// Runtime-selectable heuristic, e.g. from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HeuristicKind {
    #[default]
    Euclidean,
    Manhattan,
    Zero,
}

impl Heuristic for HeuristicKind {
    fn calculate(&self, a: &Node, b: &Node) -> f64 {
        match self {
            Self::Euclidean => Euclidean.calculate(a, b),
            Self::Manhattan => Manhattan.calculate(a, b),
            Self::Zero => Zero.calculate(a, b),
        }
    }
}
