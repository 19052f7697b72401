//! Raw objective matrices.
//!
//! Provides a dense cost matrix and the builder that derives distance,
//! travel time, CO₂ and congestion matrices from node coordinates.

mod matrix;
mod objectives;

pub use matrix::CostMatrix;
pub use objectives::{CongestionParams, ObjectiveMatrices, PhysicalParams};
