//! Guided local search over 2-opt and Or-opt.
//!
//! # Algorithm
//!
//! 1. Descend from the constructed tour with 2-opt and Or-opt moves under the
//!    augmented cost `h(i, j) = c(i, j) + λ·p(i, j)` until no move improves it.
//! 2. At that local optimum, compute the utility `c(e) / (1 + p(e))` of every
//!    tour arc and increment the penalty `p` of the arcs with maximal utility.
//! 3. Repeat. λ is fixed at the first local optimum as
//!    `α · cost(local optimum) / arcs in tour`.
//!
//! Penalties make persistent expensive arcs look worse than they are, pushing
//! the descent out of the basin it just settled in. The best tour under the
//! true cost `c` is tracked after every move and returned when the budget
//! expires, the search stalls, or the caller cancels.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::or_opt::or_opt_step;
use super::two_opt::{route_cost, two_opt_step};
use super::IMPROVEMENT_EPS;
use crate::evaluation::ArcCost;
use crate::models::{SearchStats, StopReason, Tour, DEPOT};

/// Configuration for [`GuidedLocalSearch`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_ecoroute::local_search::GuidedSearchConfig;
///
/// let config = GuidedSearchConfig::default()
///     .with_time_limit(Duration::from_millis(500))
///     .with_alpha(0.3)
///     .with_max_no_improve(100);
/// assert_eq!(config.time_limit, Duration::from_millis(500));
/// assert_eq!(config.max_iterations, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidedSearchConfig {
    /// Hard wall-clock budget for the improvement loop.
    pub time_limit: Duration,
    /// Penalty scaling factor α used to derive λ.
    pub alpha: f64,
    /// Penalty rounds without a new best tour before stopping.
    pub max_no_improve: usize,
    /// Optional cap on the total number of penalty rounds.
    pub max_iterations: Option<usize>,
}

impl Default for GuidedSearchConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(3),
            alpha: 0.2,
            max_no_improve: 256,
            max_iterations: None,
        }
    }
}

impl GuidedSearchConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the penalty factor α.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the stagnation limit in penalty rounds.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Caps the number of penalty rounds.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }
}

/// Arc cost with guided-search penalties added on top.
struct PenalizedCost<'a, C: ?Sized> {
    base: &'a C,
    penalties: &'a [u32],
    lambda: f64,
}

impl<C: ArcCost + ?Sized> ArcCost for PenalizedCost<'_, C> {
    fn cost(&self, from: usize, to: usize) -> f64 {
        let p = self.penalties[from * self.base.size() + to];
        self.base.cost(from, to) + self.lambda * f64::from(p)
    }

    fn size(&self) -> usize {
        self.base.size()
    }
}

/// Time-bounded guided local search engine.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_ecoroute::models::{Node, Tour};
/// use u_ecoroute::distance::CostMatrix;
/// use u_ecoroute::local_search::{GuidedLocalSearch, GuidedSearchConfig};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 1.0, 1.0),
///     Node::new(2, 2.0, 0.0),
///     Node::new(3, 1.0, -1.0),
/// ];
/// let dm = CostMatrix::euclidean(&nodes);
/// let initial = Tour::from_customers(vec![1, 3, 2], 3).unwrap();
///
/// let gls = GuidedLocalSearch::new(
///     GuidedSearchConfig::default().with_time_limit(Duration::from_millis(200)),
/// );
/// let (best, stats) = gls.run(&dm, initial);
/// assert!((stats.best_cost - 4.0 * 2f64.sqrt()).abs() < 1e-9);
/// assert!(stats.best_cost <= stats.initial_cost);
/// assert_eq!(best.num_customers(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GuidedLocalSearch {
    config: GuidedSearchConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl GuidedLocalSearch {
    /// Creates an engine with the given configuration.
    pub fn new(config: GuidedSearchConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stops the search early once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The engine's configuration.
    pub fn config(&self) -> &GuidedSearchConfig {
        &self.config
    }

    /// Improves `initial` under `cost` and returns the best tour found with
    /// the run's counters.
    ///
    /// Never fails: running out of time returns the best tour so far.
    pub fn run<C: ArcCost + ?Sized>(&self, cost: &C, initial: Tour) -> (Tour, SearchStats) {
        let started = Instant::now();
        // `None` when the budget is too large to represent: no deadline.
        let deadline = started.checked_add(self.config.time_limit);
        let num_customers = initial.num_customers();

        let initial_cost = cost.path_cost(initial.nodes());
        let mut current = initial.customers().to_vec();
        let mut best = current.clone();
        let mut best_cost = initial_cost;

        let mut stats = SearchStats {
            initial_cost,
            best_cost,
            moves: 0,
            penalty_rounds: 0,
            best_round: 0,
            stop_reason: StopReason::Trivial,
            elapsed_secs: 0.0,
        };

        if num_customers < 2 {
            stats.elapsed_secs = started.elapsed().as_secs_f64();
            return (initial, stats);
        }

        let n = cost.size();
        let mut penalties = vec![0u32; n * n];
        let mut lambda = 0.0;
        let mut no_improve = 0;

        let stop_reason = 'search: loop {
            let mut improved = false;
            // Descend to a local optimum of the augmented cost.
            loop {
                if let Some(reason) = self.interrupted(deadline) {
                    break 'search reason;
                }
                let augmented = PenalizedCost {
                    base: cost,
                    penalties: &penalties,
                    lambda,
                };
                let moved = two_opt_step(&mut current, DEPOT, &augmented)
                    || or_opt_step(&mut current, DEPOT, &augmented);
                if !moved {
                    break;
                }
                stats.moves += 1;

                let c = route_cost(&current, DEPOT, cost);
                if c < best_cost - IMPROVEMENT_EPS {
                    best_cost = c;
                    best.clone_from(&current);
                    stats.best_round = stats.penalty_rounds;
                    improved = true;
                }
            }

            let local_cost = route_cost(&current, DEPOT, cost);
            if improved {
                no_improve = 0;
            } else {
                no_improve += 1;
            }

            if no_improve >= self.config.max_no_improve {
                break 'search StopReason::Converged;
            }
            if self
                .config
                .max_iterations
                .is_some_and(|max| stats.penalty_rounds >= max)
            {
                break 'search StopReason::Converged;
            }

            if stats.penalty_rounds == 0 {
                lambda = self.config.alpha * local_cost / (num_customers + 1) as f64;
            }
            penalize_max_utility(&current, cost, &mut penalties);
            stats.penalty_rounds += 1;

            log::debug!(
                "gls round {}: local_cost={local_cost:.4} best_cost={best_cost:.4} lambda={lambda:.4}",
                stats.penalty_rounds
            );
        };

        stats.best_cost = best_cost;
        stats.stop_reason = stop_reason;
        stats.elapsed_secs = started.elapsed().as_secs_f64();

        let tour = Tour::from_customers(best, num_customers);
        debug_assert!(tour.is_ok(), "moves must only permute customers");
        let tour = tour.unwrap_or_else(|e| {
            log::error!("gls: best sequence is not a tour ({e}); returning the initial tour");
            initial
        });
        (tour, stats)
    }

    fn interrupted(&self, deadline: Option<Instant>) -> Option<StopReason> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Some(StopReason::Cancelled);
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(StopReason::TimeExpired);
        }
        None
    }
}

/// Increments the penalty of every tour arc whose utility
/// `c(e) / (1 + p(e))` is maximal.
fn penalize_max_utility<C: ArcCost + ?Sized>(route: &[usize], cost: &C, penalties: &mut [u32]) {
    let n = cost.size();
    let mut path = Vec::with_capacity(route.len() + 2);
    path.push(DEPOT);
    path.extend_from_slice(route);
    path.push(DEPOT);
    let arcs: Vec<(usize, usize)> = path.windows(2).map(|w| (w[0], w[1])).collect();

    let utility = |(i, j): (usize, usize), p: &[u32]| cost.cost(i, j) / (1.0 + f64::from(p[i * n + j]));

    let max_util = arcs
        .iter()
        .map(|&a| utility(a, penalties))
        .fold(f64::NEG_INFINITY, f64::max);

    let targets: Vec<(usize, usize)> = arcs
        .iter()
        .copied()
        .filter(|&a| utility(a, penalties) >= max_util - IMPROVEMENT_EPS)
        .collect();
    for (i, j) in targets {
        penalties[i * n + j] = penalties[i * n + j].saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::cheapest_insertion;
    use crate::distance::CostMatrix;
    use crate::models::Node;

    fn ring(n: usize) -> CostMatrix {
        let nodes: Vec<Node> = std::iter::once(Node::depot(0.0, 0.0))
            .chain((1..=n).map(|i| {
                let a = i as f64 * 2.399_963; // golden angle scatters points
                let r = 1.0 + (i as f64).sqrt();
                Node::new(i, r * a.cos(), r * a.sin())
            }))
            .collect();
        CostMatrix::euclidean(&nodes)
    }

    fn fast() -> GuidedSearchConfig {
        GuidedSearchConfig::default()
            .with_time_limit(Duration::from_secs(2))
            .with_max_no_improve(50)
    }

    #[test]
    fn test_never_worse_than_initial() {
        let dm = ring(25);
        let initial = Tour::from_customers((1..=25).rev().collect(), 25).expect("valid");
        let (best, stats) = GuidedLocalSearch::new(fast()).run(&dm, initial);
        assert!(stats.best_cost <= stats.initial_cost + 1e-10);
        assert!((dm.path_cost(best.nodes()) - stats.best_cost).abs() < 1e-9);
        assert_eq!(best.num_customers(), 25);
    }

    #[test]
    fn test_improves_bad_start() {
        let dm = ring(20);
        // Interleaved order is far from optimal.
        let order: Vec<usize> = (1..=20).step_by(2).chain((2..=20).step_by(2)).collect();
        let initial = Tour::from_customers(order, 20).expect("valid");
        let (_, stats) = GuidedLocalSearch::new(fast()).run(&dm, initial);
        assert!(stats.best_cost < stats.initial_cost);
        assert!(stats.moves > 0);
    }

    #[test]
    fn test_single_customer_is_trivial() {
        let dm = ring(1);
        let initial = Tour::from_customers(vec![1], 1).expect("valid");
        let (best, stats) = GuidedLocalSearch::new(fast()).run(&dm, initial.clone());
        assert_eq!(best, initial);
        assert_eq!(stats.stop_reason, StopReason::Trivial);
        assert_eq!(stats.penalty_rounds, 0);
    }

    #[test]
    fn test_converges_on_small_instance() {
        let dm = ring(6);
        let initial = cheapest_insertion(&dm).expect("tour");
        let config = fast().with_time_limit(Duration::from_secs(30));
        let (_, stats) = GuidedLocalSearch::new(config).run(&dm, initial);
        assert_eq!(stats.stop_reason, StopReason::Converged);
        assert!(stats.penalty_rounds >= 49);
    }

    #[test]
    fn test_iteration_cap() {
        let dm = ring(10);
        let initial = cheapest_insertion(&dm).expect("tour");
        let config = GuidedSearchConfig::default()
            .with_time_limit(Duration::from_secs(30))
            .with_max_no_improve(usize::MAX)
            .with_max_iterations(5);
        let (_, stats) = GuidedLocalSearch::new(config).run(&dm, initial);
        assert_eq!(stats.stop_reason, StopReason::Converged);
        assert_eq!(stats.penalty_rounds, 5);
    }

    #[test]
    fn test_respects_time_limit() {
        let dm = ring(150);
        let initial = cheapest_insertion(&dm).expect("tour");
        let config = GuidedSearchConfig::default()
            .with_time_limit(Duration::from_millis(100))
            .with_max_no_improve(usize::MAX);
        let started = Instant::now();
        let (_, stats) = GuidedLocalSearch::new(config).run(&dm, initial);
        assert_eq!(stats.stop_reason, StopReason::TimeExpired);
        assert!(started.elapsed() < Duration::from_millis(100) + Duration::from_millis(500));
    }

    #[test]
    fn test_unbounded_time_limit() {
        let dm = ring(10);
        let initial = cheapest_insertion(&dm).expect("tour");
        let config = GuidedSearchConfig::default()
            .with_time_limit(Duration::MAX)
            .with_max_no_improve(usize::MAX)
            .with_max_iterations(5);
        let (best, stats) = GuidedLocalSearch::new(config).run(&dm, initial);
        assert_eq!(stats.stop_reason, StopReason::Converged);
        assert_eq!(stats.penalty_rounds, 5);
        assert_eq!(best.num_customers(), 10);
    }

    #[test]
    fn test_cancel_flag() {
        let dm = ring(30);
        let initial = cheapest_insertion(&dm).expect("tour");
        let flag = Arc::new(AtomicBool::new(true));
        let gls = GuidedLocalSearch::new(fast()).with_cancel_flag(flag);
        let (best, stats) = gls.run(&dm, initial.clone());
        assert_eq!(stats.stop_reason, StopReason::Cancelled);
        assert_eq!(best, initial);
    }

    #[test]
    fn test_deterministic() {
        let dm = ring(12);
        let initial = cheapest_insertion(&dm).expect("tour");
        let config = fast().with_time_limit(Duration::from_secs(30));
        let (a, sa) = GuidedLocalSearch::new(config.clone()).run(&dm, initial.clone());
        let (b, sb) = GuidedLocalSearch::new(config).run(&dm, initial);
        assert_eq!(a, b);
        assert_eq!(sa.best_cost, sb.best_cost);
        assert_eq!(sa.penalty_rounds, sb.penalty_rounds);
    }

    #[test]
    fn test_penalize_max_utility() {
        let dm = CostMatrix::euclidean(&[
            Node::depot(0.0, 0.0),
            Node::new(1, 1.0, 0.0),
            Node::new(2, 1.0, 5.0),
        ]);
        let mut penalties = vec![0u32; 9];
        // Arcs: 0→1 (1), 1→2 (5), 2→0 (√26): 2→0 has the highest utility.
        penalize_max_utility(&[1, 2], &dm, &mut penalties);
        assert_eq!(penalties[2 * 3], 1);
        assert_eq!(penalties[3 + 2], 0);
        // After one penalty, 2→0 utility is √26/2 ≈ 2.55 < 5, so 1→2 is next.
        penalize_max_utility(&[1, 2], &dm, &mut penalties);
        assert_eq!(penalties[3 + 2], 1);
    }

    #[test]
    fn test_penalized_cost() {
        let dm = CostMatrix::from_data(2, vec![0.0, 2.0, 3.0, 0.0]).expect("valid");
        let penalties = vec![0, 4, 0, 0];
        let aug = PenalizedCost {
            base: &dm,
            penalties: &penalties,
            lambda: 0.5,
        };
        assert!((aug.cost(0, 1) - 4.0).abs() < 1e-10);
        assert!((aug.cost(1, 0) - 3.0).abs() < 1e-10);
    }
}
