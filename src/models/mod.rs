//! Domain model types for multi-objective route optimization.
//!
//! Provides nodes (depot and customers), raw and normalized KPI weights,
//! closed depot-to-depot tours, and the metrics/result types returned to
//! callers.

mod node;
mod result;
mod tour;
mod weights;

pub use node::{node_label, Node, DEPOT};
pub use result::{RouteMetrics, RouteResult, SearchStats, StopReason, NO_FEASIBLE_ROUTE};
pub use tour::Tour;
pub use weights::KpiWeights;
