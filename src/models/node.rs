//! Depot and customer locations.

use serde::{Deserialize, Serialize};

/// Index of the depot in every node set.
pub const DEPOT: usize = 0;

/// A location in a routing problem.
///
/// Node 0 is always the depot; nodes 1..=N are customers (deliveries or
/// pickups). Coordinates live in an arbitrary planar unit standing in for
/// kilometres.
///
/// # Examples
///
/// ```
/// use u_ecoroute::models::Node;
///
/// let depot = Node::depot(0.0, 0.0);
/// assert!(depot.is_depot());
///
/// let c = Node::new(1, 3.0, 4.0);
/// assert!((depot.distance_to(&c) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
}

impl Node {
    /// Creates a node.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Creates the depot (id 0) at the given coordinates.
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(DEPOT, x, y)
    }

    /// Node ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.id == DEPOT
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Output label, e.g. `"N3"`.
    pub fn label(&self) -> String {
        node_label(self.id)
    }
}

/// Formats a node index as its output label.
pub fn node_label(id: usize) -> String {
    format!("N{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_new() {
        let n = Node::new(4, 1.5, -2.0);
        assert_eq!(n.id(), 4);
        assert_eq!(n.x(), 1.5);
        assert_eq!(n.y(), -2.0);
        assert!(!n.is_depot());
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Node::new(1, 1.0, 2.0);
        let b = Node::new(2, 4.0, 6.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
    }

    #[test]
    fn test_label() {
        assert_eq!(Node::depot(0.0, 0.0).label(), "N0");
        assert_eq!(node_label(12), "N12");
    }

    #[test]
    fn test_non_finite() {
        assert!(!Node::new(1, f64::NAN, 0.0).is_finite());
        assert!(!Node::new(1, 0.0, f64::INFINITY).is_finite());
        assert!(Node::new(1, 0.0, 0.0).is_finite());
    }
}
