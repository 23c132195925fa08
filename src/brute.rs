//! Exhaustive nearest neighbor search.

use crate::distance::{Proximity, Value};
use crate::heap::CappedMaxHeap;
use crate::matrix::Matrix;
use crate::Neighborhood;

use log::debug;

/// A [`Neighborhood`] that compares every query against every point.
///
/// Each query costs `$O(N \cdot D)$`, but the answer is always exact and any [Proximity] works,
/// including ones that can't bound distances to a region.
#[derive(Debug)]
pub struct BruteNeighborhood<T, P> {
    proximity: P,
    entries: Matrix<T>,
}

impl<T: Value, P: Proximity<T>> BruteNeighborhood<T, P> {
    /// Create an index over the rows of `entries`.
    pub fn new(proximity: P, entries: Matrix<T>) -> Self {
        debug!(
            "built brute-force index: {} points, {} dims, {} distance",
            entries.rows(),
            entries.cols(),
            proximity.name(),
        );

        Self { proximity, entries }
    }

    /// The indexed points.
    pub fn entries(&self) -> &Matrix<T> {
        &self.entries
    }

    /// Unwrap the indexed points.
    pub fn into_entries(self) -> Matrix<T> {
        self.entries
    }
}

impl<T: Value, P: Proximity<T>> Neighborhood<T> for BruteNeighborhood<T, P> {
    fn len(&self) -> usize {
        self.entries.rows()
    }

    fn dims(&self) -> usize {
        self.entries.cols()
    }

    fn proximity(&self) -> &dyn Proximity<T> {
        &self.proximity
    }

    fn search(&self, query: &[T], bound: Option<T>, heap: &mut CappedMaxHeap<T, usize>) {
        for (i, point) in self.entries.rows_iter().enumerate() {
            let distance = self.proximity.reduced_distance(query, point);
            if bound.map_or(true, |bound| distance <= bound) {
                heap.add(distance, i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cos::{Angular, Cosine};
    use crate::euclid::Euclidean;
    use crate::tests::test_neighborhood;
    use crate::Neighbor;

    #[test]
    fn test_brute_neighborhood() {
        test_neighborhood(|entries| BruteNeighborhood::new(Euclidean, entries));
    }

    #[test]
    fn test_non_metric() {
        let entries = Matrix::from_rows([[1.0, 0.0], [0.0, 2.0], [-1.0, -1.0], [5.0, 0.5]]).unwrap();
        let brute = BruteNeighborhood::new(Cosine, entries);

        let neighbors = brute.k_nearest_to(2, &[2.0, 0.0]).unwrap();
        assert_eq!(neighbors[0].index, 0);
        assert_eq!(neighbors[0].distance, 0.0);
        assert_eq!(neighbors[1].index, 3);
    }

    #[test]
    fn test_angular_within() {
        let entries = Matrix::from_rows([[1.0, 0.0], [-1.0, 0.0], [0.0, 1.0]]).unwrap();
        let brute = BruteNeighborhood::new(Angular, entries);

        let neighbors = brute.k_nearest_within(3, &[1.0, 0.0], 4.0).unwrap();
        let indices: Vec<_> = neighbors.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![0, 2, 1]);
        assert!((neighbors[2].distance - std::f64::consts::PI).abs() < 1e-12);

        let neighbors = brute.k_nearest_within(3, &[1.0, 0.0], 2.0).unwrap();
        assert_eq!(neighbors.len(), 2);

        assert!(brute.k_nearest_within(3, &[1.0, 0.0], f64::NAN).unwrap().is_empty());
    }

    #[test]
    fn test_nan_entries() {
        let entries = Matrix::from_rows([[f64::NAN, 0.0], [0.0, 0.0], [1.0, 1.0]]).unwrap();
        let brute = BruteNeighborhood::new(Euclidean, entries);

        assert_eq!(brute.nearest(&[0.0, 0.0]).unwrap(), Some(Neighbor::new(1, 0.0)));

        let neighbors = brute.k_nearest_to(3, &[0.0, 0.0]).unwrap();
        let indices: Vec<_> = neighbors.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![1, 2, 0]);
        assert!(neighbors[2].distance.is_nan());
    }
}
