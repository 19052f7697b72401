//! Route metrics and the optimizer's result type.

use serde::{Deserialize, Serialize};

use super::Tour;

/// Label returned in place of a route when no tour could be produced.
pub const NO_FEASIBLE_ROUTE: &str = "No feasible route";

/// Raw (unscaled) objective totals along a tour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Total travelled distance.
    pub distance_km: f64,
    /// Total driving time.
    pub time_hr: f64,
    /// Total CO₂ emitted.
    pub co2_kg: f64,
    /// Summed congestion exposure over all legs.
    pub congestion_index: f64,
}

impl RouteMetrics {
    /// All-zero metrics, as reported with the no-route sentinel.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Metrics rounded to two decimals for presentation.
    pub fn rounded(&self) -> Self {
        let r2 = |v: f64| (v * 100.0).round() / 100.0;
        Self {
            distance_km: r2(self.distance_km),
            time_hr: r2(self.time_hr),
            co2_kg: r2(self.co2_kg),
            congestion_index: r2(self.congestion_index),
        }
    }
}

/// Why the improvement loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The wall-clock budget ran out.
    TimeExpired,
    /// No better tour was found for the configured number of penalty rounds,
    /// or the iteration cap was reached.
    Converged,
    /// The external cancellation flag was raised.
    Cancelled,
    /// There was nothing to improve (a single customer).
    Trivial,
}

/// Counters describing one improvement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Combined cost of the constructed tour.
    pub initial_cost: f64,
    /// Combined cost of the returned tour.
    pub best_cost: f64,
    /// Local-search moves applied.
    pub moves: usize,
    /// Guided-search penalty rounds performed.
    pub penalty_rounds: usize,
    /// Round at which the best tour was found.
    pub best_round: usize,
    /// Why the search stopped.
    pub stop_reason: StopReason,
    /// Wall-clock seconds spent improving.
    pub elapsed_secs: f64,
}

/// What the optimizer hands back to the caller.
///
/// Either a route (labels depot-to-depot plus its metrics) or the
/// [`no_feasible_route`](Self::no_feasible_route) sentinel, which callers
/// must check with [`is_feasible`](Self::is_feasible) before rendering.
///
/// # Examples
///
/// ```
/// use u_ecoroute::models::{RouteResult, RouteMetrics};
///
/// let none = RouteResult::no_feasible_route();
/// assert!(!none.is_feasible());
/// assert_eq!(none.labels, vec!["No feasible route".to_string()]);
/// assert_eq!(none.metrics, RouteMetrics::zero());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// `"N<i>"` labels in visiting order, or the single sentinel label.
    pub labels: Vec<String>,
    /// Raw totals along the route.
    pub metrics: RouteMetrics,
    /// The underlying tour, absent for the sentinel.
    pub tour: Option<Tour>,
    /// Search counters, absent for the sentinel.
    pub stats: Option<SearchStats>,
}

impl RouteResult {
    /// The well-formed "no solution" value.
    pub fn no_feasible_route() -> Self {
        Self {
            labels: vec![NO_FEASIBLE_ROUTE.to_string()],
            metrics: RouteMetrics::zero(),
            tour: None,
            stats: None,
        }
    }

    /// Returns `false` for the sentinel.
    pub fn is_feasible(&self) -> bool {
        self.tour.is_some()
    }

    /// Human-readable route, e.g. `"N0 → N3 → N1 → N0"`.
    pub fn route_string(&self) -> String {
        self.labels.join(" → ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded() {
        let m = RouteMetrics {
            distance_km: 12.3456,
            time_hr: 0.30864,
            co2_kg: 3.0864,
            congestion_index: 2.999,
        };
        let r = m.rounded();
        assert_eq!(r.distance_km, 12.35);
        assert_eq!(r.time_hr, 0.31);
        assert_eq!(r.co2_kg, 3.09);
        assert_eq!(r.congestion_index, 3.0);
    }

    #[test]
    fn test_sentinel() {
        let r = RouteResult::no_feasible_route();
        assert!(!r.is_feasible());
        assert!(r.stats.is_none());
        assert_eq!(r.route_string(), NO_FEASIBLE_ROUTE);
    }

    #[test]
    fn test_sentinel_json_shape() {
        let r = RouteResult::no_feasible_route();
        let v = serde_json::to_value(&r).expect("serializable");
        assert_eq!(v["labels"][0], NO_FEASIBLE_ROUTE);
        assert_eq!(v["metrics"]["co2_kg"], 0.0);
        assert!(v["tour"].is_null());
    }
}
