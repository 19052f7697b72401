//! Node set construction.
//!
//! Produces the depot + customer list for one optimization run, either from
//! caller-supplied coordinates or from a seeded synthetic generator.

mod builder;

pub use builder::{NodeSet, DEFAULT_HALF_WIDTH, DEFAULT_MOCK_CUSTOMERS};
