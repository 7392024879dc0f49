use crate::error::{Error, Result};

/// Minkowski distance of order `p`.
///
/// Computes `(Σ_j |a_j - b_j|^p)^(1/p)` between feature vectors. Order 1 is
/// the Manhattan distance, order 2 the Euclidean distance. The exponent is
/// fixed at construction time; the value is `Copy`, stateless, and reusable
/// across any number of queries.
///
/// There is no special case for `p = ∞` (Chebyshev): orders other than
/// positive finite reals are rejected by [`Minkowski::new`].
///
/// # Example
///
/// ```
/// use knn::Minkowski;
///
/// let metric = Minkowski::new(2.0).unwrap();
/// let d = metric.distance(&[0.0, 0.0], &[3.0, 4.0]);
/// assert_eq!(d, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minkowski {
    p: f64,
}

impl Minkowski {
    /// Creates a metric of order `p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `p <= 0` or `p` is NaN.
    pub fn new(p: f64) -> Result<Self> {
        if !(p > 0.0) {
            return Err(Error::InvalidParameter {
                name: "p",
                message: "must be positive",
            });
        }
        Ok(Self { p })
    }

    /// Manhattan distance (order 1).
    pub fn manhattan() -> Self {
        Self { p: 1.0 }
    }

    /// Euclidean distance (order 2).
    pub fn euclidean() -> Self {
        Self { p: 2.0 }
    }

    /// The exponent this metric was constructed with.
    pub fn order(&self) -> f64 {
        self.p
    }

    /// Distance between two feature vectors.
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).abs().powf(self.p))
            .sum::<f64>()
            .powf(1.0 / self.p)
    }

    /// Distances from `sample` to every row of `data`, in row order.
    ///
    /// An empty matrix yields an empty vector. A row identical to `sample`
    /// yields exactly `0.0` at that row's position.
    pub fn distances(&self, data: &[Vec<f64>], sample: &[f64]) -> Vec<f64> {
        data.iter().map(|row| self.distance(row, sample)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euclidean_distance() {
        let metric = Minkowski::euclidean();
        // 3-4-5 triangle
        assert_relative_eq!(
            metric.distance(&[0.0, 0.0], &[3.0, 4.0]),
            5.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_manhattan_distance() {
        let metric = Minkowski::manhattan();
        assert_relative_eq!(
            metric.distance(&[0.0, 0.0], &[3.0, 4.0]),
            7.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_higher_order() {
        let metric = Minkowski::new(3.0).unwrap();
        // (1^3 + 1^3)^(1/3)
        assert_relative_eq!(
            metric.distance(&[0.0, 0.0], &[1.0, 1.0]),
            2.0_f64.powf(1.0 / 3.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_symmetry() {
        let a = [1.5, -2.0, 0.25];
        let b = [4.0, 0.5, -1.0];
        for p in [1.0, 2.0, 3.5] {
            let metric = Minkowski::new(p).unwrap();
            assert_relative_eq!(
                metric.distance(&a, &b),
                metric.distance(&b, &a),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_zero_self_distance() {
        let data = vec![vec![1.0, 2.0], vec![3.0, -4.0], vec![0.0, 0.0]];
        let metric = Minkowski::euclidean();
        let dists = metric.distances(&data, &[3.0, -4.0]);
        assert_eq!(dists[1], 0.0);
    }

    #[test]
    fn test_distances_row_order() {
        let data = vec![vec![0.0], vec![1.0], vec![2.0]];
        let metric = Minkowski::manhattan();
        let dists = metric.distances(&data, &[0.0]);
        assert_eq!(dists, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_empty_matrix() {
        let metric = Minkowski::euclidean();
        let dists = metric.distances(&[], &[1.0, 2.0]);
        assert!(dists.is_empty());
    }

    #[test]
    fn test_rejects_nonpositive_order() {
        for p in [0.0, -1.0, f64::NAN] {
            let err = Minkowski::new(p).unwrap_err();
            assert_eq!(
                err,
                Error::InvalidParameter {
                    name: "p",
                    message: "must be positive",
                }
            );
        }
    }
}
