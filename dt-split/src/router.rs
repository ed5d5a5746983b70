//! The per-demand loop: find candidate routes through the current closure scenario, then split
//! the demand across them.

use dt_core::graph::NetworkView;
use rayon::prelude::*;
use tracing::{
    debug,
    info,
    instrument,
};

use crate::allocation::{
    AllocationEngine,
    AllocationRecord,
    DemandRecord,
};
use crate::search::PathSearch;

/// Routes demand records over one network view (normally an
/// [`OverlayGraph`](dt_core::graph::OverlayGraph)) using a [`PathSearch`] and an
/// [`AllocationEngine`].
///
/// The router only borrows the network, so the overlay cannot change closures while a router is
/// alive; switch scenarios between batches by dropping the router, mutating the overlay and
/// building a new one.
pub struct Router<'a, S: PathSearch + ?Sized> {
    /// Where routes are searched; closures are already applied.
    network: &'a dyn NetworkView,
    /// Candidate route enumeration.
    search: &'a S,
    /// Demand splitting.
    engine: AllocationEngine,
}

impl<'a, S: PathSearch + ?Sized> Router<'a, S> {
    /// Bundle a network view, a search and an engine.
    #[must_use]
    pub fn new(network: &'a dyn NetworkView, search: &'a S, engine: AllocationEngine) -> Self {
        Self { network, search, engine }
    }

    /// The engine used for splitting.
    #[must_use]
    pub const fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    /// Route a single demand.
    ///
    /// Zero demand returns nothing without searching. A search that finds no route is not an
    /// error either; it simply yields no records.
    ///
    /// # Errors
    ///
    /// `InvalidDemand` for a negative count; search failures are passed through unchanged.
    #[instrument(skip(self), fields(k = self.engine.config().k))]
    pub fn route(&self, demand: &DemandRecord) -> anyhow::Result<Vec<AllocationRecord>> {
        if demand.validated_count()? == 0 {
            return Ok(Vec::new());
        }

        let candidates =
            self.search
                .k_shortest_paths(self.network, demand.origin, demand.destination, self.engine.config().k)?;
        if candidates.is_empty() {
            debug!("no route between origin and destination");
            return Ok(Vec::new());
        }

        self.engine.allocate(demand, &candidates)
    }

    /// Route every demand in order, stopping at the first error.
    pub fn route_all(&self, demands: &[DemandRecord]) -> anyhow::Result<Vec<AllocationRecord>> {
        let mut records = Vec::new();
        for demand in demands {
            records.extend(self.route(demand)?);
        }
        summarize(demands, &records);
        Ok(records)
    }

    /// Route every demand on the rayon pool.
    ///
    /// The output is identical to [`route_all`](Self::route_all), including record order; if
    /// several demands fail, which error is reported is unspecified.
    pub fn route_all_par(&self, demands: &[DemandRecord]) -> anyhow::Result<Vec<AllocationRecord>> {
        let batches: Vec<Vec<AllocationRecord>> =
            demands.par_iter().map(|demand| self.route(demand)).collect::<anyhow::Result<_>>()?;
        let records: Vec<_> = batches.into_iter().flatten().collect();
        summarize(demands, &records);
        Ok(records)
    }
}

/// Log how much of a successfully routed batch was allocated.
fn summarize(demands: &[DemandRecord], records: &[AllocationRecord]) {
    // batch totals can exceed the range of a single count
    let requested: i128 = demands.iter().map(|d| i128::from(d.demand_count)).sum();
    let allocated: u128 = records.iter().map(|r| u128::from(r.allocated_count)).sum();
    info!(demands = demands.len(), routes = records.len(), requested, allocated, "routed demand batch");
}

#[cfg(test)]
mod tests;
