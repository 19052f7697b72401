//! Cost evaluation.
//!
//! - [`ArcCost`] — pluggable directed arc cost minimized by the solver
//! - [`WeightedCost`] — KPI-weighted combination of the raw objective matrices
//! - [`route_metrics`] / [`assemble`] — raw totals and caller-facing result

mod assembler;
mod cost;

pub use assembler::{assemble, route_metrics};
pub use cost::{ArcCost, ObjectiveScaling, WeightedCost};
