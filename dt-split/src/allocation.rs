//! Splitting one origin-destination demand across ranked candidate routes.
//!
//! Each candidate gets a decay score `exp(-weight * scale)`, a logit-style attractiveness that
//! falls off geometrically with cost. Demand is shared out in proportion to the scores and
//! floored to whole vehicles. The floor is never corrected: the allocated total may fall short
//! of the demand, and callers needing exact conservation must redistribute the remainder
//! themselves.

use std::fmt;

use dt_core::err_impl;
use dt_core::graph::{
    Vertex,
    VertexId,
    Weight,
};
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    instrument,
    warn,
};

use crate::config::AllocationConfig;
use crate::path::Path;

err_impl! {AllocationError,
    #[error("invalid demand: {0}")]
    InvalidDemand(String),

    #[error("invalid allocation config: {0}")]
    InvalidConfig(String),
}

/// A number of trips wanted from `origin` to `destination`.
///
/// The count is signed so malformed negative input survives parsing and is rejected here rather
/// than wrapping around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandRecord {
    /// Where the trips start.
    pub origin: VertexId,
    /// Where the trips end.
    pub destination: VertexId,
    /// How many trips; must not be negative.
    pub demand_count: i64,
}

impl DemandRecord {
    /// A demand of `demand_count` trips from `origin` to `destination`.
    #[must_use]
    pub const fn new(origin: VertexId, destination: VertexId, demand_count: i64) -> Self {
        Self { origin, destination, demand_count }
    }

    /// The trip count, or `InvalidDemand` if it is negative.
    pub fn validated_count(&self) -> anyhow::Result<u64> {
        u64::try_from(self.demand_count).map_err(|_| {
            AllocationError::invalid_demand(&format!(
                "negative demand {} from {} to {}",
                self.demand_count, self.origin, self.destination
            ))
        })
    }
}

/// Trips assigned to one route. `allocated_count` is always positive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    /// The route, origin first.
    pub path: Vec<Vertex>,
    /// Trips sent along it.
    pub allocated_count: u64,
}

/// Renders as `nodes,count`, e.g. `1-2-3,100`.
impl fmt::Display for AllocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.path.iter().join("-"), self.allocated_count)
    }
}

/// Turns ranked candidate paths into integer flow assignments.
///
/// The engine is a pure function of its inputs and is freely shareable across threads.
#[derive(Clone, Debug)]
pub struct AllocationEngine {
    /// Validated tunables.
    config: AllocationConfig,
}

impl AllocationEngine {
    /// Build an engine, rejecting an invalid `config`.
    pub fn new(config: AllocationConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Decay score of a path of the given weight; 0 for a disconnected path.
    #[must_use]
    pub fn score(&self, weight: Weight) -> f64 {
        (-weight * self.config.scale).exp()
    }

    /// Split `demand` across `candidates`.
    ///
    /// `candidates` must be non-empty and ordered by non-decreasing weight; they are not
    /// re-sorted, and records come out in candidate order. Paths whose share floors to zero are
    /// left out. A zero demand, or candidates that are all disconnected, yield no records.
    ///
    /// # Errors
    ///
    /// `InvalidDemand` if the demand count is negative or `candidates` is empty.
    #[instrument(
        skip(self, demand, candidates),
        fields(
            origin = demand.origin,
            destination = demand.destination,
            count = demand.demand_count,
            candidates = candidates.len(),
        ),
    )]
    pub fn allocate(&self, demand: &DemandRecord, candidates: &[Path]) -> anyhow::Result<Vec<AllocationRecord>> {
        let requested = demand.validated_count()?;
        if candidates.is_empty() {
            return Err(AllocationError::invalid_demand(&format!(
                "no candidate paths from {} to {}",
                demand.origin, demand.destination
            )));
        }
        if requested == 0 {
            return Ok(Vec::new());
        }
        if candidates.iter().tuple_windows().any(|(a, b)| b.weight() < a.weight()) {
            warn!("candidate paths are not in non-decreasing weight order; allocating in the given order");
        }

        let scores: Vec<f64> = candidates.iter().map(|p| self.score(p.weight())).collect();
        for (path, score) in candidates.iter().zip(&scores) {
            debug!(%path, weight = path.weight(), score, "scored candidate");
        }

        let total: f64 = scores.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            debug!(total, "no candidate has a usable score");
            return Ok(Vec::new());
        }

        #[allow(clippy::cast_precision_loss)]
        let demand_count = requested as f64;
        let mut remaining = requested;
        let records = candidates
            .iter()
            .zip(scores)
            .filter_map(|(path, score)| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let share = (score / total * demand_count).floor() as u64;
                // float noise in score / total must never hand out more than was requested
                let allocated = share.min(remaining);
                remaining -= allocated;
                (allocated > 0).then(|| AllocationRecord { path: path.vertices().to_vec(), allocated_count: allocated })
            })
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod tests;
