//! Road network views.
//!
//! A [`NetworkView`] is the read-only contract every graph in this workspace exposes: directed
//! edge weights plus in/out adjacency keyed by integer vertex ids. The base network is wrapped by
//! [`DiGraphNetwork`] (a thin index over a `petgraph` `DiGraph`), and closure scenarios are
//! expressed by layering an [`OverlayGraph`] on top of it. Because the overlay is itself a
//! `NetworkView`, anything written against the trait (a path search, a report) runs unchanged on
//! either.
//!
//! Absence is always structural: unknown or removed ids produce empty sets, `None`, or the
//! [`DISCONNECTED`] weight, never an error.

/// Adapter from a `petgraph` directed graph to [`NetworkView`].
mod digraph;
/// Vertex, weight and edge-key primitives plus the [`NetworkView`] trait.
mod network;
/// Closure overlay which subtracts vertices and edges from a base view.
mod overlay;

pub use digraph::DiGraphNetwork;
pub use network::{
    EdgeKey,
    NetworkView,
    Vertex,
    VertexId,
    Weight,
    DISCONNECTED,
};
pub use overlay::{
    Closures,
    OverlayGraph,
};

use crate::err_impl;

err_impl! {GraphError,
    #[error("unknown vertex: {0}")]
    UnknownVertex(VertexId),

    #[error("duplicate vertex: {0}")]
    DuplicateVertex(VertexId),
}

#[cfg(test)]
mod tests;
