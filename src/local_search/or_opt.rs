//! Or-opt segment relocation.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive customers to another
//! position in the tour, keeping their orientation. Only the three arcs
//! around the removal point and the insertion point change, so the delta is
//! exact for asymmetric costs too.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::two_opt::route_cost;
use super::IMPROVEMENT_EPS;
use crate::evaluation::ArcCost;

/// Longest segment Or-opt relocates.
pub const MAX_SEGMENT_LEN: usize = 3;

/// Applies Or-opt until no improving relocation remains.
///
/// Returns the improved customer sequence and its closed-tour cost.
///
/// # Examples
///
/// ```
/// use u_ecoroute::models::Node;
/// use u_ecoroute::distance::CostMatrix;
/// use u_ecoroute::local_search::{or_opt_improve, route_cost};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 0.0),
///     Node::new(2, 2.0, 0.0),
///     Node::new(3, 3.0, 0.0),
/// ];
/// let dm = CostMatrix::euclidean(&nodes);
///
/// let (improved, cost) = or_opt_improve(&[2, 1, 3], 0, &dm);
/// assert!(cost <= route_cost(&[2, 1, 3], 0, &dm));
/// assert!((cost - 6.0).abs() < 1e-10);
/// ```
pub fn or_opt_improve<C: ArcCost + ?Sized>(
    route: &[usize],
    depot: usize,
    cost: &C,
) -> (Vec<usize>, f64) {
    let mut current = route.to_vec();
    while or_opt_step(&mut current, depot, cost) {}
    let total = route_cost(&current, depot, cost);
    (current, total)
}

/// Applies the best relocation for the first segment length that has an
/// improving one. Returns `true` if a move was applied.
pub(crate) fn or_opt_step<C: ArcCost + ?Sized>(
    route: &mut Vec<usize>,
    depot: usize,
    cost: &C,
) -> bool {
    (1..=MAX_SEGMENT_LEN.min(route.len())).any(|seg_len| try_or_opt_pass(route, depot, cost, seg_len))
}

/// One pass of Or-opt for a given segment length. Returns true if improved.
fn try_or_opt_pass<C: ArcCost + ?Sized>(
    route: &mut Vec<usize>,
    depot: usize,
    cost: &C,
    seg_len: usize,
) -> bool {
    let n = route.len();
    if n < seg_len + 1 {
        return false;
    }

    let mut best_delta = -IMPROVEMENT_EPS;
    let mut best_move: Option<(usize, usize)> = None;

    for from in 0..=(n - seg_len) {
        let prev = if from == 0 { depot } else { route[from - 1] };
        let after = if from + seg_len >= n {
            depot
        } else {
            route[from + seg_len]
        };
        let seg_first = route[from];
        let seg_last = route[from + seg_len - 1];

        let removal_gain =
            cost.cost(prev, seg_first) + cost.cost(seg_last, after) - cost.cost(prev, after);

        // `to` is the index in the original route the segment goes in front of
        // (`n` means before the closing depot).
        for to in 0..=n {
            if to >= from && to <= from + seg_len {
                continue;
            }

            let ins_prev = if to == 0 { depot } else { route[to - 1] };
            let ins_next = if to == n { depot } else { route[to] };

            let insertion_cost = cost.cost(ins_prev, seg_first) + cost.cost(seg_last, ins_next)
                - cost.cost(ins_prev, ins_next);

            let delta = insertion_cost - removal_gain;
            if delta < best_delta {
                best_delta = delta;
                best_move = Some((from, to));
            }
        }
    }

    match best_move {
        Some((from, to)) => {
            let segment: Vec<usize> = route.drain(from..from + seg_len).collect();
            let insert_pos = if to > from { to - seg_len } else { to };
            for (i, &cid) in segment.iter().enumerate() {
                route.insert(insert_pos + i, cid);
            }
            true
        }
        None => false,
    }
}
