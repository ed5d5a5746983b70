use std::collections::BTreeSet;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Identifier of a vertex in the road network.
pub type VertexId = usize;

/// Cost of traversing a directed edge (or a whole path), in the network's distance unit.
pub type Weight = f64;

/// Weight reported for any pair of vertices with no traversable edge between them.
pub const DISCONNECTED: Weight = f64::INFINITY;

/// A vertex of the road network.
///
/// Vertices carry no state besides their id; equality, ordering and hashing are all by id.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vertex(pub VertexId);

impl Vertex {
    /// The id of this vertex.
    #[must_use]
    pub const fn id(self) -> VertexId {
        self.0
    }
}

impl From<VertexId> for Vertex {
    fn from(id: VertexId) -> Self {
        Self(id)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered `(source, sink)` pair identifying a directed edge.
///
/// Direction matters: `(a, b)` and `(b, a)` are different keys.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    /// Tail of the edge.
    pub source: VertexId,
    /// Head of the edge.
    pub sink: VertexId,
}

impl EdgeKey {
    /// Build the key for the directed edge `source -> sink`.
    #[must_use]
    pub const fn new(source: VertexId, sink: VertexId) -> Self {
        Self { source, sink }
    }

    /// The key of the edge running the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self { source: self.sink, sink: self.source }
    }
}

impl From<(VertexId, VertexId)> for EdgeKey {
    fn from((source, sink): (VertexId, VertexId)) -> Self {
        Self { source, sink }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.sink)
    }
}

/// Read-only view of a directed, weighted road network.
///
/// Implementations must never fail on unknown ids: they report empty neighbor sets, `false`, or
/// [`DISCONNECTED`] instead. Neighbor sets are ordered so that anything iterating them (most
/// importantly a path search breaking ties) behaves deterministically.
pub trait NetworkView: Send + Sync {
    /// Weight of the directed edge `source -> sink`, or [`DISCONNECTED`] if there is none.
    fn weight(&self, source: VertexId, sink: VertexId) -> Weight;

    /// Ids of the heads of every edge leaving `vertex`.
    fn out_neighbors(&self, vertex: VertexId) -> BTreeSet<VertexId>;

    /// Ids of the tails of every edge entering `vertex`.
    fn in_neighbors(&self, vertex: VertexId) -> BTreeSet<VertexId>;

    /// Every vertex id in the network, in the network's own stable order.
    fn vertex_ids(&self) -> Vec<VertexId>;

    /// Whether `vertex` is part of the network.
    fn contains_vertex(&self, vertex: VertexId) -> bool;
}
