use std::collections::{
    BTreeSet,
    HashMap,
};

use petgraph::graph::{
    DiGraph,
    NodeIndex,
};
use petgraph::Direction;
use tracing::debug;

use super::{
    GraphError,
    NetworkView,
    VertexId,
    Weight,
    DISCONNECTED,
};

/// A [`NetworkView`] backed by a `petgraph` directed graph.
///
/// Node weights are the external vertex ids and edge weights are traversal costs. The adapter
/// only indexes the graph; building it (from files, generators, ...) is the caller's business.
/// Vertex order follows petgraph's node insertion order, and when parallel edges connect the
/// same ordered pair the cheapest one wins.
#[derive(Clone, Debug)]
pub struct DiGraphNetwork {
    /// The underlying storage.
    graph: DiGraph<VertexId, Weight>,
    /// Lookup from external vertex id to petgraph node index.
    index: HashMap<VertexId, NodeIndex>,
}

impl DiGraphNetwork {
    /// Index `graph` by vertex id, failing if two nodes carry the same id.
    pub fn try_new(graph: DiGraph<VertexId, Weight>) -> anyhow::Result<Self> {
        let mut index = HashMap::with_capacity(graph.node_count());
        for node in graph.node_indices() {
            let id = graph[node];
            if index.insert(id, node).is_some() {
                return Err(GraphError::duplicate_vertex(id));
            }
        }

        debug!(vertices = graph.node_count(), edges = graph.edge_count(), "indexed road network");
        Ok(Self { graph, index })
    }

    /// The petgraph node index of `id`.
    pub fn vertex_index(&self, id: VertexId) -> anyhow::Result<NodeIndex> {
        self.index.get(&id).copied().ok_or_else(|| GraphError::unknown_vertex(id))
    }

    /// Read access to the wrapped graph.
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<VertexId, Weight> {
        &self.graph
    }

    /// Ids of the neighbors of `vertex` in the given direction; empty for unknown ids.
    fn neighbors(&self, vertex: VertexId, direction: Direction) -> BTreeSet<VertexId> {
        let Some(&node) = self.index.get(&vertex) else {
            return BTreeSet::new();
        };
        self.graph.neighbors_directed(node, direction).map(|n| self.graph[n]).collect()
    }
}

impl NetworkView for DiGraphNetwork {
    fn weight(&self, source: VertexId, sink: VertexId) -> Weight {
        let (Some(&a), Some(&b)) = (self.index.get(&source), self.index.get(&sink)) else {
            return DISCONNECTED;
        };
        self.graph.edges_connecting(a, b).map(|e| *e.weight()).fold(DISCONNECTED, Weight::min)
    }

    fn out_neighbors(&self, vertex: VertexId) -> BTreeSet<VertexId> {
        self.neighbors(vertex, Direction::Outgoing)
    }

    fn in_neighbors(&self, vertex: VertexId) -> BTreeSet<VertexId> {
        self.neighbors(vertex, Direction::Incoming)
    }

    fn vertex_ids(&self) -> Vec<VertexId> {
        self.graph.node_weights().copied().collect()
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.index.contains_key(&vertex)
    }
}
