//! Path-cheapest-arc constructive heuristic.
//!
//! Builds the tour as a path: starting from the depot, always follow the
//! cheapest arc to an unvisited node, then close back to the depot.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use crate::evaluation::ArcCost;
use crate::models::{Tour, DEPOT};

/// Constructs a tour by repeatedly extending the path along its cheapest
/// outgoing arc.
///
/// Ties are broken by lowest node index. Returns `None` when there are no
/// customers.
///
/// # Examples
///
/// ```
/// use u_ecoroute::models::Node;
/// use u_ecoroute::distance::CostMatrix;
/// use u_ecoroute::constructive::path_cheapest_arc;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 10.0, 0.0),
///     Node::new(2, 1.0, 0.0),
/// ];
/// let dm = CostMatrix::euclidean(&nodes);
/// let tour = path_cheapest_arc(&dm).unwrap();
/// assert_eq!(tour.customers(), &[2, 1]);
/// ```
pub fn path_cheapest_arc<C: ArcCost + ?Sized>(cost: &C) -> Option<Tour> {
    let n = cost.size();
    if n < 2 {
        return None;
    }

    let mut visited = vec![false; n];
    visited[DEPOT] = true;
    let mut current = DEPOT;
    let mut path = Vec::with_capacity(n - 1);

    loop {
        let mut best: Option<(usize, f64)> = None;
        for i in 1..n {
            if visited[i] {
                continue;
            }
            let c = cost.cost(current, i);
            if best.is_none_or(|b| c < b.1) {
                best = Some((i, c));
            }
        }

        match best {
            Some((next, _)) => {
                visited[next] = true;
                path.push(next);
                current = next;
            }
            None => break,
        }
    }

    Tour::from_customers(path, n - 1).ok()
}
