#![deny(
    // Inline allows are the escape hatch; they flag spots a reviewer should look at twice.
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]

//! # dt-core – road network views and closure overlays for detour
//!
//! detour splits travel demand between alternative routes on a road network where some roads
//! or junctions are closed. This crate holds the pieces every other detour crate builds on:
//!
//! - [`graph`] – the [`NetworkView`](graph::NetworkView) read contract, a `petgraph`-backed base
//!   network, and the [`OverlayGraph`](graph::OverlayGraph) that subtracts closed vertices and
//!   edges from a base network without touching it.
//! - [`errors`] – `thiserror` kinds wrapped in `anyhow`, plus the [`err_impl!`] macro.
//! - [`logging`] – `tracing` subscriber setup for hosts.

pub mod errors;
pub mod graph;
pub mod logging;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
