//! Crate-standard logging setup.
//!
//! Library code only ever emits through `tracing`; the host decides whether and how to collect it
//! by calling [`setup`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::errors::*;

/// Install a global compact `tracing` subscriber filtered by `env_filter`.
///
/// `env_filter` uses the usual `RUST_LOG` directive syntax, e.g. `"info"` or
/// `"warn,dt_split=debug"`. Fails if the directive does not parse or if a global subscriber has
/// already been installed.
pub fn setup(env_filter: &str) -> EmptyResult {
    let filter = EnvFilter::try_new(env_filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("could not install tracing subscriber: {e}"))
}
