//! Composition-based decoration of nodes and edges.
//!
//! A [`Decorated`] value forwards to its inner value through `Deref` and carries orthogonal
//! attributes next to it. Equality, hashing and `Borrow` all go to the inner value, so a
//! decorated node and the plain node it wraps are interchangeable as set/map keys.

use core::borrow::Borrow;
use core::hash::{Hash, Hasher};
use core::ops::Deref;

use crate::{Edge, Node};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Decorated<T, A> {
    inner: T,
    attrs: A,
}

impl<T, A> Decorated<T, A> {
    pub fn new(inner: T, attrs: A) -> Self {
        Self { inner, attrs }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn attrs(&self) -> &A {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut A {
        &mut self.attrs
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn into_parts(self) -> (T, A) {
        (self.inner, self.attrs)
    }
}

impl<T, A> Deref for Decorated<T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T, A> Borrow<T> for Decorated<T, A> {
    fn borrow(&self) -> &T {
        &self.inner
    }
}

impl<T: PartialEq, A, B> PartialEq<Decorated<T, B>> for Decorated<T, A> {
    fn eq(&self, other: &Decorated<T, B>) -> bool {
        self.inner == other.inner
    }
}

impl<T: Eq, A> Eq for Decorated<T, A> {}

impl<T: Hash, A> Hash for Decorated<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

/// Whether a node may be entered by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Traversability {
    pub traversable: bool,
}

impl Default for Traversability {
    fn default() -> Self {
        Self { traversable: true }
    }
}

pub type TraversableNode<'a> = Decorated<&'a Node, Traversability>;

impl TraversableNode<'_> {
    pub fn is_traversable(&self) -> bool {
        self.attrs.traversable
    }

    pub fn set_traversable(&mut self, traversable: bool) {
        self.attrs.traversable = traversable;
    }
}

/// Multiplier applied on top of an edge's base cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Toll {
    pub multiplier: f64,
}

impl Default for Toll {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

pub type TolledEdge = Decorated<Edge, Toll>;

impl TolledEdge {
    /// Base cost scaled by the toll multiplier.
    pub fn cost(&self) -> f64 {
        self.inner.cost * self.attrs.multiplier
    }

    /// Plain edge carrying the tolled cost.
    pub fn to_edge(&self) -> Edge {
        Edge::new(self.inner.source, self.inner.destination, self.cost())
    }
}
