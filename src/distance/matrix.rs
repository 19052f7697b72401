//! Dense cost matrix.

use crate::models::Node;

/// A dense n×n matrix of non-negative arc values stored in row-major order.
///
/// Used for each raw objective (distance, time, CO₂, congestion).
///
/// # Examples
///
/// ```
/// use u_ecoroute::models::Node;
/// use u_ecoroute::distance::CostMatrix;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::new(1, 3.0, 4.0),
///     Node::new(2, 6.0, 8.0),
/// ];
/// let dm = CostMatrix::euclidean(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the Euclidean distance matrix of the given nodes.
    pub fn euclidean(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns a new matrix with `f` applied to every entry.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            size: self.size,
        }
    }

    /// Returns the value of the arc `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the value of the arc `from → to`.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every entry is finite and `>= 0` and the diagonal is zero.
    pub fn is_well_formed(&self) -> bool {
        self.data.iter().all(|v| v.is_finite() && *v >= 0.0)
            && (0..self.size).all(|i| self.get(i, i) == 0.0)
    }

    /// Sums the matrix values along a node sequence.
    pub fn path_sum(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::depot(0.0, 0.0),
            Node::new(1, 3.0, 4.0),
            Node::new(2, 0.0, 8.0),
        ]
    }

    #[test]
    fn test_euclidean() {
        let dm = CostMatrix::euclidean(&sample_nodes());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
        assert!(dm.is_symmetric(1e-10));
        assert!(dm.is_well_formed());
    }

    #[test]
    fn test_from_data() {
        let dm = CostMatrix::from_data(2, vec![0.0, 5.0, 7.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 7.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(CostMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_map() {
        let dm = CostMatrix::euclidean(&sample_nodes()).map(|d| d / 40.0);
        assert!((dm.get(1, 0) - 0.125).abs() < 1e-10);
        assert_eq!(dm.get(2, 2), 0.0);
    }

    #[test]
    fn test_well_formed_rejects_negative() {
        let dm = CostMatrix::from_data(2, vec![0.0, -1.0, 1.0, 0.0]).expect("valid");
        assert!(!dm.is_well_formed());
        let dm = CostMatrix::from_data(2, vec![1.0, 1.0, 1.0, 0.0]).expect("valid");
        assert!(!dm.is_well_formed());
    }

    #[test]
    fn test_path_sum() {
        let dm = CostMatrix::euclidean(&sample_nodes());
        // 0→1 (5) + 1→2 (5) + 2→0 (8)
        assert!((dm.path_sum(&[0, 1, 2, 0]) - 18.0).abs() < 1e-10);
        assert_eq!(dm.path_sum(&[0]), 0.0);
    }
}
