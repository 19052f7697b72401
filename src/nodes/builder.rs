//! Explicit and synthetic node sets.

use rand::Rng;

use crate::error::{Error, Result};
use crate::models::Node;
use crate::random::create_rng;

/// Number of customers generated when no coordinates are supplied.
pub const DEFAULT_MOCK_CUSTOMERS: usize = 8;

/// Half-width of the square synthetic customers are drawn from.
pub const DEFAULT_HALF_WIDTH: f64 = 10.0;

/// The depot and customers of one optimization run (index 0 = depot).
///
/// # Examples
///
/// ```
/// use u_ecoroute::nodes::NodeSet;
///
/// let a = NodeSet::synthetic(8, 42, 10.0).unwrap();
/// let b = NodeSet::synthetic(8, 42, 10.0).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 9);
/// assert_eq!(a.num_customers(), 8);
///
/// let explicit = NodeSet::from_coordinates(&[(0.0, 0.0), (1.0, 0.0)]).unwrap();
/// assert_eq!(explicit.num_customers(), 1);
///
/// assert!(NodeSet::from_coordinates(&[(0.0, 0.0)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSet {
    nodes: Vec<Node>,
}

impl NodeSet {
    /// Builds a node set from caller coordinates.
    ///
    /// The first coordinate is the depot; the rest are customers in order.
    pub fn from_coordinates(coords: &[(f64, f64)]) -> Result<Self> {
        if coords.len() < 2 {
            return Err(Error::invalid_input(format!(
                "need a depot and at least one customer, got {} coordinate(s)",
                coords.len()
            )));
        }
        let nodes: Vec<Node> = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Node::new(i, x, y))
            .collect();
        if let Some(bad) = nodes.iter().find(|n| !n.is_finite()) {
            return Err(Error::invalid_input(format!(
                "node {} has non-finite coordinates ({}, {})",
                bad.id(),
                bad.x(),
                bad.y()
            )));
        }
        Ok(Self { nodes })
    }

    /// Generates `customers` nodes uniformly in `[-half_width, half_width]²`
    /// around a depot at the origin.
    ///
    /// The same `(customers, seed, half_width)` always yields the same set.
    pub fn synthetic(customers: usize, seed: u64, half_width: f64) -> Result<Self> {
        if customers == 0 {
            return Err(Error::invalid_input("need at least one customer to route"));
        }
        if !half_width.is_finite() || half_width <= 0.0 {
            return Err(Error::invalid_input(format!(
                "synthetic half-width must be positive, got {half_width}"
            )));
        }

        let mut rng = create_rng(seed);
        let mut nodes = Vec::with_capacity(customers + 1);
        nodes.push(Node::depot(0.0, 0.0));
        for id in 1..=customers {
            let x = rng.random_range(-half_width..half_width);
            let y = rng.random_range(-half_width..half_width);
            nodes.push(Node::new(id, x, y));
        }
        Ok(Self { nodes })
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The depot.
    pub fn depot(&self) -> &Node {
        &self.nodes[0]
    }

    /// Number of nodes including the depot.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a node set holds the depot and at least one customer.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_depot_at_origin() {
        let ns = NodeSet::synthetic(5, 1, DEFAULT_HALF_WIDTH).expect("valid");
        assert_eq!(ns.depot().x(), 0.0);
        assert_eq!(ns.depot().y(), 0.0);
        assert!(ns.depot().is_depot());
    }

    #[test]
    fn test_synthetic_within_bounds() {
        let ns = NodeSet::synthetic(200, 7, 10.0).expect("valid");
        for n in &ns.nodes()[1..] {
            assert!(n.x() >= -10.0 && n.x() < 10.0);
            assert!(n.y() >= -10.0 && n.y() < 10.0);
        }
    }

    #[test]
    fn test_synthetic_ids_sequential() {
        let ns = NodeSet::synthetic(4, 3, 10.0).expect("valid");
        let ids: Vec<usize> = ns.nodes().iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_synthetic_seed_changes_layout() {
        let a = NodeSet::synthetic(8, 1, 10.0).expect("valid");
        let b = NodeSet::synthetic(8, 2, 10.0).expect("valid");
        assert_ne!(a, b);
    }

    #[test]
    fn test_synthetic_zero_customers() {
        assert!(matches!(
            NodeSet::synthetic(0, 42, 10.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_synthetic_bad_half_width() {
        assert!(NodeSet::synthetic(3, 42, 0.0).is_err());
        assert!(NodeSet::synthetic(3, 42, f64::NAN).is_err());
    }

    #[test]
    fn test_explicit_keeps_order() {
        let ns = NodeSet::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).expect("valid");
        assert_eq!(ns.num_customers(), 2);
        assert_eq!(ns.nodes()[2].y(), 1.0);
    }

    #[test]
    fn test_explicit_empty() {
        assert!(matches!(
            NodeSet::from_coordinates(&[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_explicit_non_finite() {
        let err = NodeSet::from_coordinates(&[(0.0, 0.0), (f64::NAN, 1.0)]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }
}
