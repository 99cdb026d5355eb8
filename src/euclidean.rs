//! Straight-line distance matrix provider for planar city coordinates.

use crate::traits::DistanceMatrixProvider;

/// Euclidean distance matrix provider.
///
/// Coordinates are treated as points on a plane; the unit is whatever the
/// caller's coordinates are in.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanMatrix;

impl EuclideanMatrix {
    pub fn new() -> Self {
        Self
    }

    /// Straight-line distance between two points.
    pub fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        dx.hypot(dy)
    }
}

impl DistanceMatrixProvider for EuclideanMatrix {
    fn matrix_for(&self, points: &[(f64, f64)]) -> Vec<Vec<f64>> {
        let n = points.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for (i, from) in points.iter().enumerate() {
            for (j, to) in points.iter().enumerate() {
                if i != j {
                    matrix[i][j] = Self::distance(*from, *to);
                }
            }
        }

        matrix
    }
}
