//! Grid and navmesh graphs with a deterministic A* engine.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod builder;
pub mod grid;
pub mod mesh;
pub mod observer;
pub mod open;
pub mod path;
pub mod toll;
pub mod traversable;

pub use astar::{AStarSearch, ObserverId, Pathfinder, SearchRecord};
pub use builder::{GraphBuilder, GraphSpec, NavGraph};
pub use grid::{GridGraph, GridGraph2, GridGraph3};
pub use mesh::{MeshData, MeshGraph, MeshGraphBuilder};
pub use observer::{PathfinderObserver, SearchTrace};
pub use open::OpenList;
pub use path::GraphPath;
pub use toll::TollGraph;
pub use traversable::TraversableGraph;
