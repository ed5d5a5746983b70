//! The seam between demand splitting and whatever enumerates candidate routes.

use dt_core::graph::{
    NetworkView,
    VertexId,
};

use crate::path::Path;

/// A k-shortest loopless paths search (e.g. Yen's algorithm) over a [`NetworkView`].
///
/// Implementations must return at most `k` paths, each visiting no vertex twice, ordered by
/// non-decreasing weight with a deterministic tie-break. Fewer than `k` paths (including none at
/// all) is a normal outcome when the network cannot supply more. Unknown endpoints may be
/// reported as [`GraphError::UnknownVertex`](dt_core::graph::GraphError::UnknownVertex).
///
/// The search sees the network only through `network`, so handing it an
/// [`OverlayGraph`](dt_core::graph::OverlayGraph) makes it honor the current closures.
#[cfg_attr(any(test, feature = "testutils"), mockall::automock)]
pub trait PathSearch: Send + Sync {
    /// Up to `k` cheapest loopless paths from `source` to `sink`.
    fn k_shortest_paths(
        &self,
        network: &dyn NetworkView,
        source: VertexId,
        sink: VertexId,
        k: usize,
    ) -> anyhow::Result<Vec<Path>>;
}
