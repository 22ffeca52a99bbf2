//! Gating for long-running data collection.
//!
//! Conditions are authored as configuration, resolved through a registry,
//! and evaluated against vessel telemetry every tick. The outcome tells the
//! host whether to continue, wait, reset, or abort. Keeping this logic in a
//! library crate lets hosts, tools, and tests share it.

pub mod scenario;
pub mod trace;

pub use gate_conditions as conditions;
pub use gate_config as config;
pub use gate_core::{bounds, constants, outcome};
pub use gate_export as export;
pub use gate_orbits as orbits;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
