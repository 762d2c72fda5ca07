//! Graph, node and heuristic primitives for position-keyed pathfinding.
//!
//! Nodes are immutable values identified by a [`NodeKey`]; graphs expose neighbor lookup and
//! transition cost through [`Graph`]. Search state is owned by the search, so one graph can
//! serve any number of sequential searches.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod decorate;
pub mod edge;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod math;
pub mod node;

pub use decorate::{Decorated, Toll, TolledEdge, Traversability, TraversableNode};
pub use edge::Edge;
pub use error::{GraphError, Result};
pub use graph::{EdgeGraph, Graph};
pub use heuristic::{Euclidean, Heuristic, HeuristicKind, Manhattan, Zero};
pub use math::Vec3;
pub use node::{Node, NodeId, NodeKey, Position};
