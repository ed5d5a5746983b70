//! Shared fixtures for tests across the workspace.
#![allow(missing_docs, clippy::missing_docs_in_private_items)]

use petgraph::graph::DiGraph;
use rstest::*;

use crate::graph::{
    DiGraphNetwork,
    VertexId,
    Weight,
};

/// Build a [`DiGraphNetwork`] with `vertices` (in that order) and the given weighted edges.
///
/// # Panics
///
/// Panics if an edge mentions a vertex not in `vertices` or if `vertices` has duplicates.
#[must_use]
pub fn network_from(vertices: &[VertexId], edges: &[(VertexId, VertexId, Weight)]) -> DiGraphNetwork {
    let mut graph = DiGraph::new();
    let nodes: Vec<_> = vertices.iter().map(|&id| (id, graph.add_node(id))).collect();
    let node = |id: VertexId| nodes.iter().find(|(v, _)| *v == id).map(|(_, n)| *n).unwrap();
    for &(source, sink, weight) in edges {
        graph.add_edge(node(source), node(sink), weight);
    }
    DiGraphNetwork::try_new(graph).unwrap()
}

/// Three junctions with a two-hop route and a direct bypass:
/// `1 -> 2` (10), `2 -> 3` (10), `1 -> 3` (30).
#[fixture]
pub fn triangle_network() -> DiGraphNetwork {
    network_from(&[1, 2, 3], &[(1, 2, 10.0), (2, 3, 10.0), (1, 3, 30.0)])
}

/// A small grid-ish network with two-way streets, a one-way street (`4 -> 1`) and an
/// isolated vertex (`6`).
///
/// ```text
///   1 <-> 2 <-> 3
///   ^     ^     ^
///   |     v     v
///   4 <-> 5 ----+      6
/// ```
#[fixture]
pub fn town_network() -> DiGraphNetwork {
    network_from(
        &[1, 2, 3, 4, 5, 6],
        &[
            (1, 2, 5.0),
            (2, 1, 5.0),
            (2, 3, 7.0),
            (3, 2, 7.0),
            (4, 1, 4.0),
            (2, 5, 3.0),
            (5, 2, 3.0),
            (3, 5, 6.0),
            (5, 3, 6.0),
            (4, 5, 2.0),
            (5, 4, 2.0),
        ],
    )
}
