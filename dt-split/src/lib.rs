#![deny(
    // Inline allows are the escape hatch; they flag spots a reviewer should look at twice.
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]

//! # dt-split – splitting travel demand across alternative routes
//!
//! Given a road network with closures applied (a [`dt_core::graph::OverlayGraph`]), a path search
//! producing up to `k` loopless candidate routes per origin-destination pair, and a list of
//! demands, dt-split assigns whole numbers of trips to each route in proportion to an
//! exponential decay of route cost.
//!
//! ## Pieces
//! 1. [`PathSearch`] – the seam to an external k-shortest loopless paths search (Yen-style). The
//!    search sees only a [`NetworkView`](dt_core::graph::NetworkView), so closures are honored
//!    without the search knowing about them.
//! 2. [`AllocationEngine`] – scores candidates with `exp(-weight * scale)`, normalizes, and floors
//!    each share to an integer, dropping routes that end up with nothing.
//! 3. [`Router`] – runs the two for each [`DemandRecord`], sequentially or on the rayon pool.
//!
//! Everything here is synchronous and side-effect free apart from `tracing` output. Closure
//! scenarios are switched by mutating the overlay between batches, never during one.

pub mod allocation;
pub mod config;
pub mod path;
pub mod router;
pub mod search;

pub use allocation::{
    AllocationEngine,
    AllocationError,
    AllocationRecord,
    DemandRecord,
};
pub use config::AllocationConfig;
pub use path::Path;
pub use router::Router;
#[cfg(any(test, feature = "testutils"))]
pub use search::MockPathSearch;
pub use search::PathSearch;
