use thiserror::Error;

use crate::NodeKey;

/// Construction-time failures. Lookup misses and failed searches are not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("grid {axis} must be positive, got {value}")]
    InvalidDimension { axis: &'static str, value: i64 },

    #[error("triangle {triangle} references vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("vertex {vertex} has a non-finite position")]
    NonFiniteVertex { vertex: usize },

    #[error("toll multiplier must be finite and >= 1.0, got {value}")]
    InvalidToll { value: f64 },

    #[error("node {key} is not part of this graph")]
    UnknownNode { key: NodeKey },
}

pub type Result<T> = std::result::Result<T, GraphError>;
