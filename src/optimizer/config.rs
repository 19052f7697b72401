//! Optimizer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::FirstSolutionStrategy;
use crate::distance::{CongestionParams, PhysicalParams};
use crate::error::{Error, Result};
use crate::evaluation::ObjectiveScaling;
use crate::local_search::GuidedSearchConfig;
use crate::models::KpiWeights;
use crate::nodes::{DEFAULT_HALF_WIDTH, DEFAULT_MOCK_CUSTOMERS};

/// Every option of a route optimization, with documented defaults.
///
/// | option            | default                          |
/// |-------------------|----------------------------------|
/// | `use_mock`        | `true`                           |
/// | `coordinates`     | `None`                           |
/// | `vehicle_count`   | `1`                              |
/// | `physics`         | 0.25 kg/km, 40 km/h              |
/// | `weights`         | `{1, 1, 1, 1}`                   |
/// | `scaling`         | distance 1, time 10, CO₂ 0.1, congestion 10 |
/// | `congestion`      | base 0.1, spread 0.5             |
/// | `seed`            | `42`                             |
/// | `mock_customers`  | `8`                              |
/// | `mock_half_width` | `10.0`                           |
/// | `first_solution`  | cheapest insertion               |
/// | `search`          | 3 s budget, α 0.2, 256 stale rounds |
///
/// Synthetic nodes are used when `use_mock` is set or no coordinates are
/// given. [`with_coordinates`](Self::with_coordinates) clears `use_mock`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_ecoroute::models::KpiWeights;
/// use u_ecoroute::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_coordinates(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])
///     .with_weights(KpiWeights::new(2.0, 0.0, 1.0, 0.5))
///     .with_time_limit(Duration::from_millis(250));
/// assert!(!config.uses_synthetic_nodes());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Generate synthetic nodes even if coordinates are present.
    pub use_mock: bool,
    /// Caller coordinates; index 0 is the depot.
    pub coordinates: Option<Vec<(f64, f64)>>,
    /// Vehicles available. Must be at least 1.
    pub vehicle_count: usize,
    /// Emission factor and average speed.
    pub physics: PhysicalParams,
    /// Raw KPI weights; normalized before use.
    pub weights: KpiWeights,
    /// Per-objective multipliers applied before weighting.
    pub scaling: ObjectiveScaling,
    /// Synthetic congestion model.
    pub congestion: CongestionParams,
    /// Seed for synthetic nodes and congestion.
    pub seed: u64,
    /// Number of synthetic customers.
    pub mock_customers: usize,
    /// Half-width of the synthetic bounding square.
    pub mock_half_width: f64,
    /// Constructive heuristic for the initial tour.
    pub first_solution: FirstSolutionStrategy,
    /// Guided local search settings.
    pub search: GuidedSearchConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            use_mock: true,
            coordinates: None,
            vehicle_count: 1,
            physics: PhysicalParams::default(),
            weights: KpiWeights::default(),
            scaling: ObjectiveScaling::default(),
            congestion: CongestionParams::default(),
            seed: 42,
            mock_customers: DEFAULT_MOCK_CUSTOMERS,
            mock_half_width: DEFAULT_HALF_WIDTH,
            first_solution: FirstSolutionStrategy::default(),
            search: GuidedSearchConfig::default(),
        }
    }
}

impl OptimizerConfig {
    /// Routes over caller coordinates (index 0 = depot) and disables mock mode.
    pub fn with_coordinates(mut self, coords: Vec<(f64, f64)>) -> Self {
        self.coordinates = Some(coords);
        self.use_mock = false;
        self
    }

    /// Forces or releases synthetic node generation.
    pub fn with_mock(mut self, use_mock: bool) -> Self {
        self.use_mock = use_mock;
        self
    }

    /// Sets the number of vehicles.
    pub fn with_vehicle_count(mut self, n: usize) -> Self {
        self.vehicle_count = n;
        self
    }

    /// Sets the emission factor (kg CO₂ per km).
    pub fn with_emission_factor(mut self, kg_per_km: f64) -> Self {
        self.physics.emission_factor_kg_per_km = kg_per_km;
        self
    }

    /// Sets the average speed (km/h).
    pub fn with_avg_speed(mut self, kmph: f64) -> Self {
        self.physics.avg_speed_kmph = kmph;
        self
    }

    /// Sets the raw KPI weights.
    pub fn with_weights(mut self, weights: KpiWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the objective scaling constants.
    pub fn with_scaling(mut self, scaling: ObjectiveScaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Sets the congestion model.
    pub fn with_congestion(mut self, congestion: CongestionParams) -> Self {
        self.congestion = congestion;
        self
    }

    /// Sets the seed for synthetic data.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of synthetic customers.
    pub fn with_mock_customers(mut self, n: usize) -> Self {
        self.mock_customers = n;
        self
    }

    /// Sets the half-width of the synthetic bounding square.
    pub fn with_mock_half_width(mut self, half_width: f64) -> Self {
        self.mock_half_width = half_width;
        self
    }

    /// Sets the constructive heuristic.
    pub fn with_first_solution(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution = strategy;
        self
    }

    /// Sets the improvement loop's wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.search.time_limit = limit;
        self
    }

    /// Replaces the guided search settings.
    pub fn with_search(mut self, search: GuidedSearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Returns `true` when nodes will be generated rather than taken from
    /// `coordinates`.
    pub fn uses_synthetic_nodes(&self) -> bool {
        self.use_mock || self.coordinates.is_none()
    }

    /// Checks every option that can be checked without building nodes.
    pub fn validate(&self) -> Result<()> {
        if self.vehicle_count == 0 {
            return Err(Error::invalid_input("vehicle count must be at least 1"));
        }
        self.weights.validate()?;
        self.physics.validate()?;
        self.scaling.validate()?;
        self.congestion.validate()?;
        if !self.search.alpha.is_finite() || self.search.alpha < 0.0 {
            return Err(Error::invalid_input(format!(
                "guided search alpha must be finite and non-negative, got {}",
                self.search.alpha
            )));
        }
        Ok(())
    }
}
