//! Closed depot-to-depot tour.

use serde::{Deserialize, Serialize};

use super::node::{node_label, DEPOT};
use crate::error::{Error, Result};

/// An ordered visiting sequence that starts and ends at the depot.
///
/// The stored sequence always has length N+2: the depot, each of the N
/// customers exactly once, and the depot again. Construction validates this,
/// so any `Tour` value in hand is well-formed.
///
/// # Examples
///
/// ```
/// use u_ecoroute::models::Tour;
///
/// let tour = Tour::from_customers(vec![3, 1, 2], 3).unwrap();
/// assert_eq!(tour.nodes(), &[0, 3, 1, 2, 0]);
/// assert_eq!(tour.customers(), &[3, 1, 2]);
/// assert_eq!(tour.to_string(), "N0 → N3 → N1 → N2 → N0");
///
/// assert!(Tour::from_customers(vec![1, 1], 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    /// Builds a tour from the customer visiting order (depot excluded).
    ///
    /// Fails unless `customers` is a permutation of `1..=num_customers`.
    pub fn from_customers(customers: Vec<usize>, num_customers: usize) -> Result<Self> {
        if num_customers == 0 {
            return Err(Error::invalid_input("a tour needs at least one customer"));
        }
        if customers.len() != num_customers {
            return Err(Error::invalid_input(format!(
                "tour visits {} customers, expected {num_customers}",
                customers.len()
            )));
        }
        let mut seen = vec![false; num_customers + 1];
        for &c in &customers {
            if c == DEPOT || c > num_customers {
                return Err(Error::invalid_input(format!(
                    "node {c} is not a customer index in 1..={num_customers}"
                )));
            }
            if seen[c] {
                return Err(Error::invalid_input(format!("customer {c} visited twice")));
            }
            seen[c] = true;
        }

        let mut nodes = Vec::with_capacity(num_customers + 2);
        nodes.push(DEPOT);
        nodes.extend(customers);
        nodes.push(DEPOT);
        Ok(Self { nodes })
    }

    /// Builds a tour from a full depot-to-depot sequence.
    pub fn from_nodes(nodes: &[usize]) -> Result<Self> {
        match nodes {
            [DEPOT, inner @ .., DEPOT] if !inner.is_empty() => {
                Self::from_customers(inner.to_vec(), inner.len())
            }
            _ => Err(Error::invalid_input(
                "a tour must start and end at the depot and visit at least one customer",
            )),
        }
    }

    /// The full node sequence, depot at both ends.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// The customers in visiting order (depot excluded).
    pub fn customers(&self) -> &[usize] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Number of customers visited.
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 2
    }

    /// Directed edges `(from, to)` in travel order, including both depot legs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// Output labels, e.g. `["N0", "N2", "N1", "N0"]`.
    pub fn labels(&self) -> Vec<String> {
        self.nodes.iter().map(|&n| node_label(n)).collect()
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = Error;

    fn try_from(nodes: Vec<usize>) -> Result<Self> {
        Self::from_nodes(&nodes)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.nodes
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.labels().join(" → "))
    }
}
