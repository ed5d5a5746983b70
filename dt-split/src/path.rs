//! Candidate routes produced by a path search.

use std::fmt;

use dt_core::graph::{
    NetworkView,
    Vertex,
    VertexId,
    Weight,
};
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};

/// An ordered route through the network together with its total weight.
///
/// The weight is whatever the network reported when the path was found, so a path found through
/// an overlay carries the cost under that overlay's closures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Visited vertices, origin first, destination last.
    vertices: Vec<Vertex>,
    /// Sum of the traversed edge weights.
    weight: Weight,
}

impl Path {
    /// A path over `vertices` with a precomputed total `weight`.
    #[must_use]
    pub const fn new(vertices: Vec<Vertex>, weight: Weight) -> Self {
        Self { vertices, weight }
    }

    /// The path through `ids`, weighted by summing each hop's weight in `network`.
    ///
    /// A hop with no open edge contributes [`DISCONNECTED`](dt_core::graph::DISCONNECTED), so the
    /// whole path ends up disconnected too.
    pub fn from_network<N: NetworkView + ?Sized>(network: &N, ids: &[VertexId]) -> Self {
        let weight: Weight = ids.iter().tuple_windows().map(|(&u, &v)| network.weight(u, v)).sum();
        Self { vertices: ids.iter().copied().map(Vertex).collect(), weight }
    }

    /// Visited vertices in order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Total weight of the path.
    #[must_use]
    pub const fn weight(&self) -> Weight {
        self.weight
    }

    /// First vertex, if the path is not empty.
    #[must_use]
    pub fn origin(&self) -> Option<Vertex> {
        self.vertices.first().copied()
    }

    /// Last vertex, if the path is not empty.
    #[must_use]
    pub fn destination(&self) -> Option<Vertex> {
        self.vertices.last().copied()
    }

    /// Number of edges traversed.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Renders the vertex sequence as `1-2-3`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vertices.iter().join("-"))
    }
}

#[cfg(test)]
mod tests;
