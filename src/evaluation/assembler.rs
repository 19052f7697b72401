//! Projects a final tour into the caller-facing result.

use crate::distance::ObjectiveMatrices;
use crate::models::{RouteMetrics, RouteResult, SearchStats, Tour};

/// Sums each raw objective matrix along the tour.
///
/// # Examples
///
/// ```
/// use u_ecoroute::distance::{CongestionParams, ObjectiveMatrices, PhysicalParams};
/// use u_ecoroute::evaluation::route_metrics;
/// use u_ecoroute::models::{Node, Tour};
///
/// let nodes = vec![Node::depot(0.0, 0.0), Node::new(1, 3.0, 4.0)];
/// let m = ObjectiveMatrices::build(
///     &nodes,
///     &PhysicalParams::default(),
///     &CongestionParams::default(),
///     42,
/// ).unwrap();
/// let tour = Tour::from_customers(vec![1], 1).unwrap();
/// let metrics = route_metrics(&tour, &m);
/// assert!((metrics.distance_km - 10.0).abs() < 1e-10);
/// assert!((metrics.co2_kg - 2.5).abs() < 1e-10);
/// ```
pub fn route_metrics(tour: &Tour, matrices: &ObjectiveMatrices) -> RouteMetrics {
    let mut metrics = RouteMetrics::zero();
    for (i, j) in tour.edges() {
        metrics.distance_km += matrices.distance.get(i, j);
        metrics.time_hr += matrices.time.get(i, j);
        metrics.co2_kg += matrices.co2.get(i, j);
        metrics.congestion_index += matrices.congestion.get(i, j);
    }
    metrics
}

/// Builds the result for a finished run, or the sentinel when `tour` is `None`.
pub fn assemble(
    tour: Option<Tour>,
    matrices: &ObjectiveMatrices,
    stats: Option<SearchStats>,
) -> RouteResult {
    match tour {
        Some(tour) => RouteResult {
            labels: tour.labels(),
            metrics: route_metrics(&tour, matrices),
            tour: Some(tour),
            stats,
        },
        None => RouteResult::no_feasible_route(),
    }
}
