//! Cheapest-insertion constructive heuristic.
//!
//! Starts from the empty depot→depot tour and repeatedly inserts the
//! unvisited node whose best insertion adds the least cost:
//!
//! ```text
//! delta(u, p) = c(prev_p, u) + c(u, next_p) - c(prev_p, next_p)
//! ```
//!
//! Ties are broken by lowest node index, then earliest position, so the
//! result is fully deterministic. Works on asymmetric costs.
//!
//! # Complexity
//!
//! O(n³) where n = number of customers.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use crate::evaluation::ArcCost;
use crate::models::{Tour, DEPOT};

/// Builds a tour by cheapest insertion.
///
/// Returns `None` when the cost model has no customers.
///
/// # Examples
///
/// ```
/// use u_ecoroute::models::Node;
/// use u_ecoroute::distance::CostMatrix;
/// use u_ecoroute::constructive::cheapest_insertion;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 0.0),
///     Node::new(2, 2.0, 0.0),
///     Node::new(3, 3.0, 0.0),
/// ];
/// let dm = CostMatrix::euclidean(&nodes);
/// let tour = cheapest_insertion(&dm).unwrap();
/// assert_eq!(tour.num_customers(), 3);
/// ```
pub fn cheapest_insertion<C: ArcCost + ?Sized>(cost: &C) -> Option<Tour> {
    let n = cost.size();
    if n < 2 {
        return None;
    }
    let num_customers = n - 1;

    let mut route: Vec<usize> = Vec::with_capacity(num_customers);
    let mut inserted = vec![false; n];
    inserted[DEPOT] = true;

    while route.len() < num_customers {
        let mut best: Option<(usize, usize, f64)> = None;

        for u in 1..n {
            if inserted[u] {
                continue;
            }
            for pos in 0..=route.len() {
                let prev = if pos == 0 { DEPOT } else { route[pos - 1] };
                let next = if pos == route.len() { DEPOT } else { route[pos] };
                let delta = cost.cost(prev, u) + cost.cost(u, next) - cost.cost(prev, next);
                if best.is_none_or(|b| delta < b.2) {
                    best = Some((u, pos, delta));
                }
            }
        }

        let (u, pos, _) = best?;
        route.insert(pos, u);
        inserted[u] = true;
    }

    Tour::from_customers(route, num_customers).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::models::Node;

    fn line() -> CostMatrix {
        CostMatrix::euclidean(&[
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 2.0, 0.0),
            Node::new(3, 3.0, 0.0),
        ])
    }

    #[test]
    fn test_line_is_optimal() {
        let dm = line();
        let tour = cheapest_insertion(&dm).expect("tour");
        assert!((dm.path_cost(tour.nodes()) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_visits_all() {
        let nodes: Vec<Node> = std::iter::once(Node::depot(0.0, 0.0))
            .chain((1..=12).map(|i| Node::new(i, (i as f64 * 1.7).sin() * 5.0, (i as f64).cos() * 5.0)))
            .collect();
        let dm = CostMatrix::euclidean(&nodes);
        let tour = cheapest_insertion(&dm).expect("tour");
        let mut seen = tour.customers().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_tie_breaks_lowest_index() {
        // Customers 1 and 2 share a location: both insertions cost the same.
        let dm = CostMatrix::euclidean(&[
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 1.0, 0.0),
        ]);
        let tour = cheapest_insertion(&dm).expect("tour");
        // 1 goes in first; 2 is then cheapest right before it (earliest position).
        assert_eq!(tour.customers(), &[2, 1]);
    }

    #[test]
    fn test_single_customer() {
        let dm = CostMatrix::euclidean(&[Node::depot(0.0, 0.0), Node::new(1, 5.0, 5.0)]);
        let tour = cheapest_insertion(&dm).expect("tour");
        assert_eq!(tour.nodes(), &[0, 1, 0]);
    }

    #[test]
    fn test_no_customers() {
        let dm = CostMatrix::euclidean(&[Node::depot(0.0, 0.0)]);
        assert!(cheapest_insertion(&dm).is_none());
    }

    #[test]
    fn test_asymmetric_direction() {
        // Going 0→1→2→0 is cheap; the reverse is expensive.
        let dm = CostMatrix::from_data(
            3,
            vec![
                0.0, 1.0, 9.0, //
                9.0, 0.0, 1.0, //
                1.0, 9.0, 0.0,
            ],
        )
        .expect("valid");
        let tour = cheapest_insertion(&dm).expect("tour");
        assert_eq!(tour.customers(), &[1, 2]);
        assert!((dm.path_cost(tour.nodes()) - 3.0).abs() < 1e-10);
    }
}
