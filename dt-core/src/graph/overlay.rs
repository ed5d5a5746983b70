use std::collections::{
    BTreeSet,
    HashSet,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use super::{
    EdgeKey,
    NetworkView,
    Vertex,
    VertexId,
    Weight,
    DISCONNECTED,
};

/// One closure scenario: the vertices and directed edges to suppress.
///
/// This is the serializable form of an [`OverlayGraph`]'s removal state, so scenarios can be
/// described in config, snapshotted with [`OverlayGraph::closures`] and swapped back in with
/// [`OverlayGraph::reset_to`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Closures {
    /// Closed vertices; every edge touching one of them is closed too.
    pub vertices: BTreeSet<VertexId>,
    /// Closed directed edges.
    pub edges: BTreeSet<EdgeKey>,
}

impl Closures {
    /// True when nothing is closed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}

/// A view of a base network with some vertices and directed edges logically removed.
///
/// The overlay borrows the base network and never mutates or copies it. Nothing is cached:
/// every query re-filters the base view through the current removal sets, so a mutation is
/// visible to the very next query of any kind. Removal and restoration are plain set operations
/// and accept ids the base network has never heard of.
///
/// The overlay is deliberately not `Clone`; run independent scenarios through separate overlays
/// or through [`closures`](Self::closures)/[`reset_to`](Self::reset_to).
#[derive(Debug)]
pub struct OverlayGraph<'a, N: NetworkView + ?Sized> {
    /// The network being filtered.
    base: &'a N,
    /// Suppressed vertex ids.
    removed_vertices: HashSet<VertexId>,
    /// Suppressed directed edges.
    removed_edges: HashSet<EdgeKey>,
}

impl<'a, N: NetworkView + ?Sized> OverlayGraph<'a, N> {
    /// Wrap `base` with nothing removed.
    #[must_use]
    pub fn new(base: &'a N) -> Self {
        Self {
            base,
            removed_vertices: HashSet::new(),
            removed_edges: HashSet::new(),
        }
    }

    /// The unfiltered network underneath.
    #[must_use]
    pub const fn base(&self) -> &'a N {
        self.base
    }

    /// Close every vertex in `ids`. Already-closed and unknown ids are accepted.
    pub fn remove_vertices<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = VertexId>,
    {
        self.removed_vertices.extend(ids);
    }

    /// Close every directed edge in `edges`.
    pub fn remove_edges<I, E>(&mut self, edges: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<EdgeKey>,
    {
        self.removed_edges.extend(edges.into_iter().map(Into::into));
    }

    /// Close a single vertex.
    pub fn remove_vertex(&mut self, id: VertexId) {
        self.removed_vertices.insert(id);
    }

    /// Close a single directed edge; the opposite direction stays open.
    pub fn remove_edge(&mut self, edge: impl Into<EdgeKey>) {
        self.removed_edges.insert(edge.into());
    }

    /// Reopen every closed edge.
    pub fn restore_all_edges(&mut self) {
        self.removed_edges.clear();
    }

    /// Reopen one directed edge. No-op if it was not closed.
    pub fn restore_edge(&mut self, edge: impl Into<EdgeKey>) {
        self.removed_edges.remove(&edge.into());
    }

    /// Reopen every closed vertex.
    pub fn restore_all_vertices(&mut self) {
        self.removed_vertices.clear();
    }

    /// Reopen one vertex. No-op if it was not closed.
    pub fn restore_vertex(&mut self, id: VertexId) {
        self.removed_vertices.remove(&id);
    }

    /// Whether `id` is currently in the removed-vertex set.
    #[must_use]
    pub fn is_vertex_removed(&self, id: VertexId) -> bool {
        self.removed_vertices.contains(&id)
    }

    /// Whether the exact directed pair is currently in the removed-edge set.
    ///
    /// This does not consider removed endpoints; see [`is_blocked`](Self::is_blocked).
    #[must_use]
    pub fn is_edge_removed(&self, edge: impl Into<EdgeKey>) -> bool {
        self.removed_edges.contains(&edge.into())
    }

    /// Whether the directed edge `source -> sink` is suppressed, either directly or because one
    /// of its endpoints is.
    #[must_use]
    pub fn is_blocked(&self, source: VertexId, sink: VertexId) -> bool {
        self.removed_vertices.contains(&source)
            || self.removed_vertices.contains(&sink)
            || self.removed_edges.contains(&EdgeKey::new(source, sink))
    }

    /// Weight of `source -> sink` under the current closures.
    ///
    /// Suppressed edges report [`DISCONNECTED`]; every other edge reports exactly the base weight
    /// (which may itself be `DISCONNECTED` if the base has no such edge).
    #[must_use]
    pub fn edge_weight(&self, source: VertexId, sink: VertexId) -> Weight {
        if self.is_blocked(source, sink) {
            return DISCONNECTED;
        }
        self.base.weight(source, sink)
    }

    /// Weight of `source -> sink` in the base network, regardless of closures.
    #[must_use]
    pub fn edge_weight_ignoring_overlay(&self, source: VertexId, sink: VertexId) -> Weight {
        self.base.weight(source, sink)
    }

    /// Out-neighbors of `id` reachable through an open edge; empty if `id` itself is removed.
    #[must_use]
    pub fn adjacent_vertices(&self, id: VertexId) -> BTreeSet<Vertex> {
        self.open_out_neighbors(id).into_iter().map(Vertex).collect()
    }

    /// In-neighbors of `id` reaching it through an open edge; empty if `id` itself is removed.
    #[must_use]
    pub fn precedent_vertices(&self, id: VertexId) -> BTreeSet<Vertex> {
        self.open_in_neighbors(id).into_iter().map(Vertex).collect()
    }

    /// Every vertex of the base network that is not removed, in the base network's order.
    #[must_use]
    pub fn all_vertices(&self) -> Vec<Vertex> {
        self.open_vertex_ids().into_iter().map(Vertex).collect()
    }

    /// The vertex with id `id`, unless it is removed or unknown to the base network.
    #[must_use]
    pub fn vertex_by_id(&self, id: VertexId) -> Option<Vertex> {
        self.contains_vertex(id).then_some(Vertex(id))
    }

    /// Snapshot of the current removal sets.
    #[must_use]
    pub fn closures(&self) -> Closures {
        Closures {
            vertices: self.removed_vertices.iter().copied().collect(),
            edges: self.removed_edges.iter().copied().collect(),
        }
    }

    /// Add every closure in `closures` to the current removal sets.
    pub fn apply(&mut self, closures: &Closures) {
        debug!(vertices = closures.vertices.len(), edges = closures.edges.len(), "applying closures");
        self.remove_vertices(closures.vertices.iter().copied());
        self.remove_edges(closures.edges.iter().copied());
    }

    /// Replace the current removal sets with exactly `closures`.
    pub fn reset_to(&mut self, closures: Closures) {
        debug!(vertices = closures.vertices.len(), edges = closures.edges.len(), "switching closure scenario");
        self.removed_vertices = closures.vertices.into_iter().collect();
        self.removed_edges = closures.edges.into_iter().collect();
    }

    /// Base out-neighbors of `id` minus anything the closures block.
    fn open_out_neighbors(&self, id: VertexId) -> BTreeSet<VertexId> {
        if self.is_vertex_removed(id) {
            return BTreeSet::new();
        }
        self.base.out_neighbors(id).into_iter().filter(|&head| !self.is_blocked(id, head)).collect()
    }

    /// Base in-neighbors of `id` minus anything the closures block.
    fn open_in_neighbors(&self, id: VertexId) -> BTreeSet<VertexId> {
        if self.is_vertex_removed(id) {
            return BTreeSet::new();
        }
        self.base.in_neighbors(id).into_iter().filter(|&tail| !self.is_blocked(tail, id)).collect()
    }

    /// Base vertex ids minus closed vertices, in base order.
    fn open_vertex_ids(&self) -> Vec<VertexId> {
        self.base.vertex_ids().into_iter().filter(|&id| !self.is_vertex_removed(id)).collect()
    }
}

impl<N: NetworkView + ?Sized> NetworkView for OverlayGraph<'_, N> {
    fn weight(&self, source: VertexId, sink: VertexId) -> Weight {
        self.edge_weight(source, sink)
    }

    fn out_neighbors(&self, vertex: VertexId) -> BTreeSet<VertexId> {
        self.open_out_neighbors(vertex)
    }

    fn in_neighbors(&self, vertex: VertexId) -> BTreeSet<VertexId> {
        self.open_in_neighbors(vertex)
    }

    fn vertex_ids(&self) -> Vec<VertexId> {
        self.open_vertex_ids()
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        !self.is_vertex_removed(vertex) && self.base.contains_vertex(vertex)
    }
}
