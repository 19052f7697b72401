//! Route optimization entry point.
//!
//! Wires the pipeline together:
//! nodes → objective matrices → weighted arc cost → construction →
//! guided local search → result assembly.

mod config;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub use config::OptimizerConfig;

use crate::distance::ObjectiveMatrices;
use crate::error::Result;
use crate::evaluation::{assemble, ArcCost, WeightedCost};
use crate::local_search::GuidedLocalSearch;
use crate::models::RouteResult;
use crate::nodes::NodeSet;

/// Optimizes a route with the given configuration.
///
/// Shorthand for `RouteOptimizer::new(config.clone()).run()`.
///
/// # Errors
///
/// [`Error::InvalidInput`](crate::Error::InvalidInput) for empty node input,
/// invalid weights, or invalid physical parameters.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_ecoroute::optimizer::{optimize_route, OptimizerConfig};
///
/// let config = OptimizerConfig::default().with_time_limit(Duration::from_millis(300));
/// let result = optimize_route(&config).unwrap();
/// assert!(result.is_feasible());
/// assert_eq!(result.labels.len(), 10);
/// assert_eq!(result.labels.first().map(String::as_str), Some("N0"));
/// assert_eq!(result.labels.last().map(String::as_str), Some("N0"));
/// ```
pub fn optimize_route(config: &OptimizerConfig) -> Result<RouteResult> {
    RouteOptimizer::new(config.clone()).run()
}

/// A single, self-contained optimization run.
///
/// Each run owns its nodes, matrices and tour; runs share nothing and may
/// execute concurrently.
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl RouteOptimizer {
    /// Creates an optimizer.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Lets the caller stop the improvement loop early by setting `flag`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The run's configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Builds the node set this run routes over.
    pub fn node_set(&self) -> Result<NodeSet> {
        let c = &self.config;
        match (&c.coordinates, c.uses_synthetic_nodes()) {
            (Some(coords), false) => NodeSet::from_coordinates(coords),
            _ => NodeSet::synthetic(c.mock_customers, c.seed, c.mock_half_width),
        }
    }

    /// Runs the optimization.
    ///
    /// Returns the [`RouteResult::no_feasible_route`] sentinel, not an error,
    /// when construction yields no tour.
    pub fn run(&self) -> Result<RouteResult> {
        let c = &self.config;
        c.validate()?;

        let nodes = self.node_set()?;
        let matrices = ObjectiveMatrices::build(nodes.nodes(), &c.physics, &c.congestion, c.seed)?;
        let cost = WeightedCost::new(&matrices, &c.weights, &c.scaling)?;
        let w = cost.weights();
        log::debug!(
            "optimizer: customers={} vehicles={} weights=[d={:.3} t={:.3} co2={:.3} cong={:.3}]",
            nodes.num_customers(),
            c.vehicle_count,
            w.distance,
            w.time,
            w.co2,
            w.congestion
        );

        let initial = match c.first_solution.construct(&cost) {
            Some(tour) => tour,
            None => {
                log::warn!("optimizer: construction produced no tour; returning sentinel");
                return Ok(assemble(None, &matrices, None));
            }
        };
        log::debug!(
            "optimizer: {:?} initial cost {:.4}",
            c.first_solution,
            cost.path_cost(initial.nodes())
        );

        let mut search = GuidedLocalSearch::new(c.search.clone());
        if let Some(flag) = &self.cancel {
            search = search.with_cancel_flag(Arc::clone(flag));
        }
        let (tour, stats) = search.run(&cost, initial);

        log::info!(
            "optimizer: cost {:.4} -> {:.4} moves={} rounds={} stop={:?} elapsed={:.3}s",
            stats.initial_cost,
            stats.best_cost,
            stats.moves,
            stats.penalty_rounds,
            stats.stop_reason,
            stats.elapsed_secs
        );

        let result = assemble(Some(tour), &matrices, Some(stats));
        let m = &result.metrics;
        log::info!(
            "metrics: route={} distance_km={:.2} time_hr={:.2} co2_kg={:.2} congestion_index={:.2}",
            result.route_string(),
            m.distance_km,
            m.time_hr,
            m.co2_kg,
            m.congestion_index
        );
        Ok(result)
    }
}
