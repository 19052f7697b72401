//! Local search for improving a tour.
//!
//! - [`two_opt`](two_opt_improve) — Segment reversal, asymmetric-aware
//! - [`or_opt`](or_opt_improve) — Relocation of 1–3 consecutive customers
//! - [`GuidedLocalSearch`] — Time-bounded penalty-guided descent over both

mod guided;
mod or_opt;
mod two_opt;

pub use guided::{GuidedLocalSearch, GuidedSearchConfig};
pub use or_opt::{or_opt_improve, MAX_SEGMENT_LEN};
pub use two_opt::{route_cost, two_opt_improve};

/// Minimum cost decrease for a move to count as an improvement.
pub(crate) const IMPROVEMENT_EPS: f64 = 1e-10;
