//! Combined edge cost.
//!
//! The optimizer minimizes a single scalar per directed arc:
//!
//! ```text
//! c(i, j) = w_d·s_d·dist(i, j) + w_t·s_t·time(i, j) + w_c·s_c·co2(i, j) + w_g·s_g·cong(i, j)
//! ```
//!
//! where `w_*` are normalized [`KpiWeights`] and `s_*` the
//! [`ObjectiveScaling`] factors that bring km, hours, kg and a unit-less index
//! into comparable magnitude.

use serde::{Deserialize, Serialize};

use crate::distance::{CostMatrix, ObjectiveMatrices};
use crate::error::{Error, Result};
use crate::models::KpiWeights;

/// A directed arc cost that construction and local search minimize.
///
/// Implemented by raw [`CostMatrix`] values, the weighted multi-objective
/// [`WeightedCost`], and the penalty-augmented cost used inside guided search.
pub trait ArcCost {
    /// Cost of travelling `from → to`.
    fn cost(&self, from: usize, to: usize) -> f64;

    /// Number of nodes (depot included).
    fn size(&self) -> usize;

    /// Total cost along a node sequence.
    fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }
}

impl ArcCost for CostMatrix {
    fn cost(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }

    fn size(&self) -> usize {
        CostMatrix::size(self)
    }
}

/// Per-objective multipliers applied before weighting.
///
/// The defaults are distance ×1, time ×10, CO₂ ×0.1, congestion ×10. With the
/// default 40 km/h speed and 0.25 kg/km emission factor this puts time at
/// 0.25 and CO₂ at 0.025 per km, while a congestion index in `[0.1, 0.6]`
/// weighs like one to six kilometres per leg.
///
/// # Examples
///
/// ```
/// use u_ecoroute::evaluation::ObjectiveScaling;
///
/// let s = ObjectiveScaling::default().with_congestion(5.0);
/// assert_eq!(s.time, 10.0);
/// assert_eq!(s.congestion, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveScaling {
    /// Multiplier on kilometres.
    pub distance: f64,
    /// Multiplier on hours.
    pub time: f64,
    /// Multiplier on kilograms of CO₂.
    pub co2: f64,
    /// Multiplier on the congestion index.
    pub congestion: f64,
}

impl Default for ObjectiveScaling {
    fn default() -> Self {
        Self {
            distance: 1.0,
            time: 10.0,
            co2: 0.1,
            congestion: 10.0,
        }
    }
}

impl ObjectiveScaling {
    /// Sets the distance multiplier.
    pub fn with_distance(mut self, s: f64) -> Self {
        self.distance = s;
        self
    }

    /// Sets the time multiplier.
    pub fn with_time(mut self, s: f64) -> Self {
        self.time = s;
        self
    }

    /// Sets the CO₂ multiplier.
    pub fn with_co2(mut self, s: f64) -> Self {
        self.co2 = s;
        self
    }

    /// Sets the congestion multiplier.
    pub fn with_congestion(mut self, s: f64) -> Self {
        self.congestion = s;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, s) in [
            ("distance", self.distance),
            ("time", self.time),
            ("co2", self.co2),
            ("congestion", self.congestion),
        ] {
            if !s.is_finite() || s < 0.0 {
                return Err(Error::invalid_input(format!(
                    "scaling for `{name}` must be finite and non-negative, got {s}"
                )));
            }
        }
        Ok(())
    }
}

/// Weighted multi-objective arc cost, precomputed into a single matrix.
///
/// # Examples
///
/// ```
/// use u_ecoroute::distance::{CongestionParams, ObjectiveMatrices, PhysicalParams};
/// use u_ecoroute::evaluation::{ArcCost, ObjectiveScaling, WeightedCost};
/// use u_ecoroute::models::{KpiWeights, Node};
///
/// let nodes = vec![Node::depot(0.0, 0.0), Node::new(1, 4.0, 0.0)];
/// let m = ObjectiveMatrices::build(
///     &nodes,
///     &PhysicalParams::default(),
///     &CongestionParams::default(),
///     42,
/// ).unwrap();
///
/// // Distance only: cost equals kilometres.
/// let w = KpiWeights::new(1.0, 0.0, 0.0, 0.0);
/// let cost = WeightedCost::new(&m, &w, &ObjectiveScaling::default()).unwrap();
/// assert!((cost.cost(0, 1) - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedCost {
    combined: CostMatrix,
    weights: KpiWeights,
}

impl WeightedCost {
    /// Combines the matrices under the given weights.
    ///
    /// Raw weights are normalized first. Fails with [`Error::Config`] if any
    /// combined entry is not finite.
    pub fn new(
        matrices: &ObjectiveMatrices,
        weights: &KpiWeights,
        scaling: &ObjectiveScaling,
    ) -> Result<Self> {
        let w = weights.normalized()?;
        scaling.validate()?;

        let kd = w.distance * scaling.distance;
        let kt = w.time * scaling.time;
        let kc = w.co2 * scaling.co2;
        let kg = w.congestion * scaling.congestion;

        let n = matrices.size();
        let mut combined = CostMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let c = kd * matrices.distance.get(i, j)
                    + kt * matrices.time.get(i, j)
                    + kc * matrices.co2.get(i, j)
                    + kg * matrices.congestion.get(i, j);
                if !c.is_finite() {
                    return Err(Error::config(format!(
                        "combined cost of arc {i}→{j} is not finite"
                    )));
                }
                combined.set(i, j, c);
            }
        }

        Ok(Self {
            combined,
            weights: w,
        })
    }

    /// The normalized weights this cost was built with.
    pub fn weights(&self) -> &KpiWeights {
        &self.weights
    }

    /// The combined matrix.
    pub fn matrix(&self) -> &CostMatrix {
        &self.combined
    }
}

impl ArcCost for WeightedCost {
    fn cost(&self, from: usize, to: usize) -> f64 {
        self.combined.get(from, to)
    }

    fn size(&self) -> usize {
        self.combined.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{CongestionParams, PhysicalParams};
    use crate::models::Node;

    fn matrices() -> ObjectiveMatrices {
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 4.0, 0.0),
            Node::new(2, 4.0, 3.0),
        ];
        ObjectiveMatrices::build(
            &nodes,
            &PhysicalParams::default(),
            &CongestionParams::default(),
            42,
        )
        .expect("valid")
    }

    #[test]
    fn test_linear_combination() {
        let m = matrices();
        let w = KpiWeights::default();
        let cost = WeightedCost::new(&m, &w, &ObjectiveScaling::default()).expect("valid");
        let expected = 0.25 * m.distance.get(1, 2)
            + 0.25 * 10.0 * m.time.get(1, 2)
            + 0.25 * 0.1 * m.co2.get(1, 2)
            + 0.25 * 10.0 * m.congestion.get(1, 2);
        assert!((cost.cost(1, 2) - expected).abs() < 1e-10);
        assert_eq!(cost.cost(2, 2), 0.0);
    }

    #[test]
    fn test_uses_normalized_weights() {
        let m = matrices();
        let a = WeightedCost::new(&m, &KpiWeights::new(2.0, 0.0, 0.0, 2.0), &ObjectiveScaling::default())
            .expect("valid");
        let b = WeightedCost::new(&m, &KpiWeights::new(1.0, 0.0, 0.0, 1.0), &ObjectiveScaling::default())
            .expect("valid");
        assert!((a.cost(0, 2) - b.cost(0, 2)).abs() < 1e-10);
        assert!((a.weights().sum() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_congestion_only_is_directional() {
        let m = matrices();
        let w = KpiWeights::new(0.0, 0.0, 0.0, 1.0);
        let cost = WeightedCost::new(&m, &w, &ObjectiveScaling::default()).expect("valid");
        assert!((cost.cost(0, 1) - 10.0 * m.congestion.get(0, 1)).abs() < 1e-10);
        assert!((cost.cost(1, 0) - 10.0 * m.congestion.get(1, 0)).abs() < 1e-10);
    }

    #[test]
    fn test_path_cost() {
        let m = matrices();
        // 0→1 (4) + 1→2 (3) + 2→0 (5)
        assert!((m.distance.path_cost(&[0, 1, 2, 0]) - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_bad_scaling() {
        let m = matrices();
        let s = ObjectiveScaling::default().with_time(f64::INFINITY);
        assert!(matches!(
            WeightedCost::new(&m, &KpiWeights::default(), &s),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_bad_weights() {
        let m = matrices();
        let w = KpiWeights::new(-1.0, 1.0, 1.0, 1.0);
        assert!(WeightedCost::new(&m, &w, &ObjectiveScaling::default()).is_err());
    }
}
