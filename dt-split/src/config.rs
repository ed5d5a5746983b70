//! Tunables for demand splitting.

use std::io::Read;

use dt_core::errors::*;
use serde::{
    Deserialize,
    Serialize,
};

use crate::allocation::AllocationError;

/// Decay per unit of path weight used when nothing else is configured.
///
/// Path weights are lengths in feet; 0.0003 ≈ 0.000189394 mi/ft × 35 mi/h × 60 min/h, i.e. the
/// weight expressed in driving minutes at 35 mph.
pub const DEFAULT_SCALE: f64 = 0.0003;

/// Number of candidate routes requested per demand when nothing else is configured.
pub const DEFAULT_K: usize = 6;

/// Configuration of the [`AllocationEngine`](crate::AllocationEngine).
///
/// Deserializes from YAML with every field optional:
///
/// ```yaml
/// scale: 0.0003
/// k: 6
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AllocationConfig {
    /// Converts a path weight into the exponent of its decay score, `exp(-weight * scale)`.
    pub scale: f64,
    /// Maximum number of candidate routes to request per demand.
    pub k: usize,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE, k: DEFAULT_K }
    }
}

impl AllocationConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml<R: Read>(reader: R) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that `scale` is finite and positive and that `k` asks for at least one route.
    pub fn validate(&self) -> EmptyResult {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(AllocationError::invalid_config(&format!(
                "scale must be finite and positive, got {}",
                self.scale
            )));
        }
        if self.k == 0 {
            return Err(AllocationError::invalid_config("k must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
