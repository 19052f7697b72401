//! Constructive heuristics for building an initial tour.
//!
//! - [`cheapest_insertion`] — Greedy cheapest insertion, O(n³)
//! - [`path_cheapest_arc`] — Extend the path along its cheapest arc, O(n²)

mod cheapest_arc;
mod cheapest_insertion;

use serde::{Deserialize, Serialize};

use crate::evaluation::ArcCost;
use crate::models::Tour;

pub use cheapest_arc::path_cheapest_arc;
pub use cheapest_insertion::cheapest_insertion;

/// Which constructive heuristic seeds the improvement loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FirstSolutionStrategy {
    /// [`cheapest_insertion`].
    #[default]
    CheapestInsertion,
    /// [`path_cheapest_arc`].
    PathCheapestArc,
}

impl FirstSolutionStrategy {
    /// Builds the initial tour with this strategy.
    pub fn construct<C: ArcCost + ?Sized>(&self, cost: &C) -> Option<Tour> {
        match self {
            Self::CheapestInsertion => cheapest_insertion(cost),
            Self::PathCheapestArc => path_cheapest_arc(cost),
        }
    }
}
