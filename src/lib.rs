//! # u-ecoroute
//!
//! Multi-objective route optimization for fleet deliveries. Given a depot and
//! a set of customer nodes, finds a visiting order that minimizes a
//! user-weighted mix of distance, travel time, CO₂ emission and congestion
//! exposure within a bounded search time.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Node, KpiWeights, Tour, RouteResult)
//! - [`nodes`] — Explicit and seeded synthetic node sets
//! - [`distance`] — Distance, time, CO₂ and congestion matrices
//! - [`evaluation`] — Weighted arc cost and result assembly
//! - [`constructive`] — Initial tour heuristics (cheapest insertion, cheapest arc)
//! - [`local_search`] — 2-opt, Or-opt, and guided local search
//! - [`optimizer`] — [`optimize_route`](optimizer::optimize_route) entry point
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use u_ecoroute::models::KpiWeights;
//! use u_ecoroute::optimizer::{optimize_route, OptimizerConfig};
//!
//! let config = OptimizerConfig::default()
//!     .with_weights(KpiWeights::new(1.0, 0.5, 2.0, 0.0))
//!     .with_time_limit(Duration::from_millis(200));
//! let result = optimize_route(&config).unwrap();
//! if result.is_feasible() {
//!     println!("{}", result.route_string());
//! }
//! ```

pub mod constructive;
pub mod distance;
mod error;
pub mod evaluation;
pub mod local_search;
#[cfg(feature = "cli")]
pub mod logging;
pub mod models;
pub mod nodes;
pub mod optimizer;
pub mod random;

pub use error::{Error, Result};
