//! KPI weights and their normalization.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Relative importance of the four route objectives.
///
/// Raw weights come straight from the caller (a UI slider typically ranges
/// over 0.0–3.0, but any non-negative value is accepted). The optimizer
/// always works with [`normalized`](Self::normalized) weights.
///
/// # Examples
///
/// ```
/// use u_ecoroute::models::KpiWeights;
///
/// let w = KpiWeights::new(3.0, 1.0, 0.0, 0.0).normalized().unwrap();
/// assert!((w.distance - 0.75).abs() < 1e-10);
/// assert!((w.sum() - 1.0).abs() < 1e-10);
///
/// let uniform = KpiWeights::new(0.0, 0.0, 0.0, 0.0).normalized().unwrap();
/// assert_eq!(uniform, KpiWeights::uniform());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiWeights {
    /// Weight of travelled distance.
    pub distance: f64,
    /// Weight of travel time.
    pub time: f64,
    /// Weight of CO₂ emission.
    pub co2: f64,
    /// Weight of congestion exposure.
    pub congestion: f64,
}

impl KpiWeights {
    /// Creates raw weights.
    pub fn new(distance: f64, time: f64, co2: f64, congestion: f64) -> Self {
        Self {
            distance,
            time,
            co2,
            congestion,
        }
    }

    /// The uniform convex combination (0.25 each).
    pub fn uniform() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }

    /// Sum of the four weights.
    pub fn sum(&self) -> f64 {
        self.distance + self.time + self.co2 + self.congestion
    }

    fn as_array(&self) -> [f64; 4] {
        [self.distance, self.time, self.co2, self.congestion]
    }

    /// Checks that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let names = ["distance", "time", "co2", "congestion"];
        for (name, w) in names.iter().zip(self.as_array()) {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::invalid_input(format!(
                    "weight `{name}` must be finite and non-negative, got {w}"
                )));
            }
        }
        Ok(())
    }

    /// Returns the weights rescaled to sum to 1.
    ///
    /// A zero sum yields [`KpiWeights::uniform`] instead of dividing by zero.
    /// Weights are first scaled by their maximum so the sum stays finite for
    /// any finite input.
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;
        let max = self.as_array().into_iter().fold(0.0, f64::max);
        if max == 0.0 {
            return Ok(Self::uniform());
        }
        let [d, t, c, g] = self.as_array().map(|w| w / max);
        let s = d + t + c + g;
        Ok(Self::new(d / s, t / s, c / s, g / s))
    }
}

impl Default for KpiWeights {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_normalizes_to_uniform() {
        let w = KpiWeights::default().normalized().expect("valid");
        assert_eq!(w, KpiWeights::uniform());
    }

    #[test]
    fn test_zero_sum_fallback() {
        let w = KpiWeights::new(0.0, 0.0, 0.0, 0.0)
            .normalized()
            .expect("valid");
        assert_eq!(w, KpiWeights::new(0.25, 0.25, 0.25, 0.25));
    }

    #[test]
    fn test_single_weight() {
        let w = KpiWeights::new(0.0, 0.0, 2.5, 0.0)
            .normalized()
            .expect("valid");
        assert_eq!(w.co2, 1.0);
        assert_eq!(w.distance, 0.0);
        assert_eq!(w.time, 0.0);
        assert_eq!(w.congestion, 0.0);
    }

    #[test]
    fn test_rejects_negative() {
        let err = KpiWeights::new(1.0, -0.1, 1.0, 1.0).normalized();
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_nan() {
        let err = KpiWeights::new(f64::NAN, 1.0, 1.0, 1.0).normalized();
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_huge_weights_stay_normalized() {
        let w = KpiWeights::new(f64::MAX, f64::MAX, 1.0, 0.0)
            .normalized()
            .expect("valid");
        assert!((w.sum() - 1.0).abs() < 1e-10);
        assert!((w.distance - 0.5).abs() < 1e-10);
        assert!((w.time - 0.5).abs() < 1e-10);
        assert_eq!(w.congestion, 0.0);
    }

    #[test]
    fn test_tiny_weights_stay_normalized() {
        let w = KpiWeights::new(f64::MIN_POSITIVE, 0.0, 0.0, f64::MIN_POSITIVE)
            .normalized()
            .expect("valid");
        assert!((w.distance - 0.5).abs() < 1e-10);
        assert!((w.congestion - 0.5).abs() < 1e-10);
    }

    proptest! {
        #[test]
        fn prop_normalized_sums_to_one(
            d in 0.0f64..f64::MAX,
            t in 0.0f64..f64::MAX,
            c in 0.0f64..3.0,
            g in 0.0f64..1e300,
        ) {
            let w = KpiWeights::new(d, t, c, g).normalized().expect("valid");
            prop_assert!((w.sum() - 1.0).abs() < 1e-9);
            prop_assert!(w.distance >= 0.0 && w.time >= 0.0);
            prop_assert!(w.co2 >= 0.0 && w.congestion >= 0.0);
        }

        #[test]
        fn prop_normalization_is_scale_invariant(
            d in 0.01f64..3.0,
            t in 0.01f64..3.0,
            k in 0.1f64..10.0,
        ) {
            let a = KpiWeights::new(d, t, 1.0, 0.5).normalized().expect("valid");
            let b = KpiWeights::new(d * k, t * k, k, 0.5 * k).normalized().expect("valid");
            prop_assert!((a.distance - b.distance).abs() < 1e-9);
            prop_assert!((a.congestion - b.congestion).abs() < 1e-9);
        }
    }
}
