//! The four raw objective matrices and the physical parameters behind them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::CostMatrix;
use crate::error::{Error, Result};
use crate::models::Node;
use crate::random::create_rng;

/// Vehicle physics used to derive time and CO₂ from distance.
///
/// # Examples
///
/// ```
/// use u_ecoroute::distance::PhysicalParams;
///
/// let p = PhysicalParams::default();
/// assert_eq!(p.emission_factor_kg_per_km, 0.25);
/// assert_eq!(p.avg_speed_kmph, 40.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParams {
    /// CO₂ emitted per kilometre (kg/km). Zero is allowed.
    pub emission_factor_kg_per_km: f64,
    /// Average driving speed (km/h). Must be positive.
    pub avg_speed_kmph: f64,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            emission_factor_kg_per_km: 0.25,
            avg_speed_kmph: 40.0,
        }
    }
}

impl PhysicalParams {
    /// Sets the emission factor.
    pub fn with_emission_factor(mut self, kg_per_km: f64) -> Self {
        self.emission_factor_kg_per_km = kg_per_km;
        self
    }

    /// Sets the average speed.
    pub fn with_avg_speed(mut self, kmph: f64) -> Self {
        self.avg_speed_kmph = kmph;
        self
    }

    /// Rejects non-finite values, a negative emission factor, and a
    /// non-positive speed.
    pub fn validate(&self) -> Result<()> {
        let ef = self.emission_factor_kg_per_km;
        if !ef.is_finite() || ef < 0.0 {
            return Err(Error::invalid_input(format!(
                "emission factor must be finite and non-negative, got {ef}"
            )));
        }
        let v = self.avg_speed_kmph;
        if !v.is_finite() || v <= 0.0 {
            return Err(Error::invalid_input(format!(
                "average speed must be finite and positive, got {v}"
            )));
        }
        Ok(())
    }
}

/// Synthetic congestion model: `clamp(base + U(0, spread), 0, 1)` per
/// directed arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CongestionParams {
    /// Offset every arc starts from.
    pub base: f64,
    /// Width of the uniform perturbation added to `base`.
    pub spread: f64,
}

impl Default for CongestionParams {
    fn default() -> Self {
        Self {
            base: 0.1,
            spread: 0.5,
        }
    }
}

impl CongestionParams {
    /// Sets the base offset.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Sets the perturbation width.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base.is_finite() || !self.spread.is_finite() || self.spread < 0.0 {
            return Err(Error::invalid_input(format!(
                "congestion base must be finite and spread non-negative, got base={} spread={}",
                self.base, self.spread
            )));
        }
        Ok(())
    }

    /// Generates the directed congestion matrix for `size` nodes.
    ///
    /// Draws one value per off-diagonal arc in row-major order, so the
    /// result depends only on `size`, the parameters, and `seed`.
    pub fn generate(&self, size: usize, seed: u64) -> CostMatrix {
        let mut rng = create_rng(seed);
        let mut m = CostMatrix::new(size);
        for i in 0..size {
            for j in 0..size {
                if i == j {
                    continue;
                }
                let noise = if self.spread > 0.0 {
                    rng.random_range(0.0..self.spread)
                } else {
                    0.0
                };
                m.set(i, j, (self.base + noise).clamp(0.0, 1.0));
            }
        }
        m
    }
}

/// Distance, time, CO₂ and congestion matrices for one node set.
///
/// Geometry and physics are kept separate from weighting so any objective
/// can be reweighted without recomputing the matrices.
///
/// # Examples
///
/// ```
/// use u_ecoroute::distance::{CongestionParams, ObjectiveMatrices, PhysicalParams};
/// use u_ecoroute::models::Node;
///
/// let nodes = vec![Node::depot(0.0, 0.0), Node::new(1, 0.0, 40.0)];
/// let m = ObjectiveMatrices::build(
///     &nodes,
///     &PhysicalParams::default(),
///     &CongestionParams::default(),
///     42,
/// ).unwrap();
/// assert!((m.time.get(0, 1) - 1.0).abs() < 1e-10);
/// assert!((m.co2.get(0, 1) - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveMatrices {
    /// Euclidean distance (km).
    pub distance: CostMatrix,
    /// Travel time (hours).
    pub time: CostMatrix,
    /// CO₂ emission (kg).
    pub co2: CostMatrix,
    /// Congestion exposure in `[0, 1]`, possibly asymmetric.
    pub congestion: CostMatrix,
}

impl ObjectiveMatrices {
    /// Derives all four matrices from node coordinates.
    pub fn build(
        nodes: &[Node],
        physics: &PhysicalParams,
        congestion: &CongestionParams,
        seed: u64,
    ) -> Result<Self> {
        if nodes.len() < 2 {
            return Err(Error::invalid_input(
                "need a depot and at least one customer to build matrices",
            ));
        }
        physics.validate()?;
        congestion.validate()?;

        let distance = CostMatrix::euclidean(nodes);
        let speed = physics.avg_speed_kmph;
        let factor = physics.emission_factor_kg_per_km;
        let time = distance.map(|d| d / speed);
        let co2 = distance.map(|d| d * factor);
        let congestion = congestion.generate(nodes.len(), seed);

        let matrices = Self {
            distance,
            time,
            co2,
            congestion,
        };
        matrices.check()?;
        Ok(matrices)
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.distance.size()
    }

    fn check(&self) -> Result<()> {
        for (name, m) in [
            ("distance", &self.distance),
            ("time", &self.time),
            ("co2", &self.co2),
            ("congestion", &self.congestion),
        ] {
            if !m.is_well_formed() {
                return Err(Error::config(format!(
                    "{name} matrix has a negative, non-finite, or non-zero diagonal entry"
                )));
            }
        }
        Ok(())
    }
}
