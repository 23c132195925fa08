//! Exact [k-nearest-neighbor search] over dense point sets.
//!
//! A [Neighborhood] is built once from a distance function and a [Matrix] of points, then
//! answers "which `k` points are nearest to `q`?" as often as needed.  Two implementations are
//! provided:
//!
//! * [KdTree], a flat k-d tree searched by branch and bound.  It needs a [BoxMetric], i.e. a
//!   metric that can bound the distance from a point to a bounding box.
//! * [BruteNeighborhood], which compares every query against every point and works with any
//!   [Proximity].
//!
//! ```
//! use knear::{Euclidean, KdTree, Matrix, Neighborhood};
//!
//! let entries = Matrix::from_rows([[-1.0, 0.0], [0.0, 0.0], [5.0, 0.0]])?;
//! let tree = KdTree::new(Euclidean, entries)?;
//!
//! let queries = Matrix::from_rows([[1.0, 0.0], [4.0, 0.0], [-5.0, 0.0]])?;
//! let neighbors = tree.k_nearest(1, &queries)?;
//! assert_eq!(neighbors.indices.as_slice(), &[1, 2, 0]);
//! assert_eq!(neighbors.distances.as_slice(), &[1.0, 1.0, 4.0]);
//! # Ok::<(), knear::Error>(())
//! ```
//!
//! [k-nearest-neighbor search]: https://en.wikipedia.org/wiki/Nearest_neighbor_search

pub mod algorithm;
pub mod brute;
pub mod chebyshev;
pub mod coords;
pub mod cos;
pub mod distance;
pub mod error;
pub mod euclid;
pub mod heap;
pub mod kd;
pub mod lp;
pub mod matrix;
pub mod nary;
pub mod taxi;

pub use algorithm::{build, Algorithm, MetricKind};
pub use brute::BruteNeighborhood;
pub use chebyshev::{chebyshev_distance, Chebyshev};
pub use coords::{Bounds, Coordinates};
pub use cos::{angular_distance, cosine_distance, cosine_similarity, Angular, Cosine};
pub use distance::{BoxMetric, Metric, Proximity, Value};
pub use error::{Error, Result};
pub use euclid::{euclidean_distance, squared_euclidean_distance, Euclidean};
pub use heap::CappedMaxHeap;
pub use kd::{KdOptions, KdTree, SplitAxis, Traversal};
pub use lp::{lp_distance, Minkowski};
pub use matrix::Matrix;
pub use nary::NAryHeap;
pub use taxi::{taxicab_distance, Taxicab};

use log::trace;
use num_traits::zero;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A nearest neighbor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor<T> {
    /// The neighbor's row in the indexed point set.
    pub index: usize,
    /// The distance to the neighbor.
    pub distance: T,
}

impl<T> Neighbor<T> {
    /// Create a new Neighbor.
    pub fn new(index: usize, distance: T) -> Self {
        Self { index, distance }
    }
}

/// The `k` nearest neighbors of every query in a batch.
///
/// Row `q` of both matrices describes query `q`, nearest neighbor first.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbors<T> {
    /// `distances[q][j]` is the distance from query `q` to its `j`th nearest neighbor.
    pub distances: Matrix<T>,
    /// `indices[q][j]` is the row of query `q`'s `j`th nearest neighbor in the point set.
    pub indices: Matrix<usize>,
}

impl<T: Copy> Neighbors<T> {
    /// The number of queries.
    pub fn len(&self) -> usize {
        self.distances.rows()
    }

    /// Check whether there were no queries.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// The number of neighbors per query.
    pub fn k(&self) -> usize {
        self.distances.cols()
    }

    /// Iterate over the neighbors of query `q`, nearest first.
    ///
    /// # Panics
    ///
    /// If `q >= self.len()`.
    pub fn row(&self, q: usize) -> impl Iterator<Item = Neighbor<T>> + '_ {
        self.indices
            .row(q)
            .iter()
            .zip(self.distances.row(q))
            .map(|(&index, &distance)| Neighbor::new(index, distance))
    }
}

/// A k-nearest-neighbor index over a fixed set of points.
///
/// Implementations provide [search](Self::search), which offers candidates to a heap; the
/// query methods are built on top of it.  Every query allocates its own heap and never mutates
/// the index, so one index can serve many threads.
pub trait Neighborhood<T: Value>: Send + Sync {
    /// The number of indexed points.
    fn len(&self) -> usize;

    /// Check whether no points are indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The dimensionality of the indexed points.
    fn dims(&self) -> usize;

    /// The distance function this index searches with.
    fn proximity(&self) -> &dyn Proximity<T>;

    /// Offer `heap` every point that might be among the nearest neighbors of `query`, keyed by
    /// [reduced distance](Proximity::reduced_distance) and valued by row index.
    ///
    /// Points whose reduced distance exceeds `bound` must not be offered.  Implementations may
    /// skip points that the heap would reject anyway, but must offer every point it would keep.
    fn search(&self, query: &[T], bound: Option<T>, heap: &mut CappedMaxHeap<T, usize>);

    /// Find the `k` nearest neighbors of `query`, nearest first.
    ///
    /// `k` is clamped to [len](Self::len).  Ties are reported in no particular order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShapeMismatch`] if `query` doesn't have [dims](Self::dims) coordinates.
    fn k_nearest_to(&self, k: usize, query: &[T]) -> Result<Vec<Neighbor<T>>> {
        bounded_search(self, k, query, None)
    }

    /// Find the nearest neighbor of `query`, or `None` if no points are indexed.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShapeMismatch`] if `query` doesn't have [dims](Self::dims) coordinates.
    fn nearest(&self, query: &[T]) -> Result<Option<Neighbor<T>>> {
        Ok(self.k_nearest_to(1, query)?.into_iter().next())
    }

    /// Find up to `k` nearest neighbors of `query` that are at most `radius` away, nearest first.
    ///
    /// A negative or NaN `radius` finds nothing.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShapeMismatch`] if `query` doesn't have [dims](Self::dims) coordinates.
    fn k_nearest_within(&self, k: usize, query: &[T], radius: T) -> Result<Vec<Neighbor<T>>> {
        // Negative and NaN radii contain nothing
        if !(radius >= zero()) {
            check_dims(self.dims(), query.len())?;
            return Ok(Vec::new());
        }

        let bound = self.proximity().to_reduced(radius);
        bounded_search(self, k, query, Some(bound))
    }

    /// Find the `k` nearest neighbors of every row of `queries`.
    ///
    /// `k` is clamped to [len](Self::len), so every query gets exactly `min(k, len)` neighbors.
    /// With the `parallel` feature, queries are spread over the rayon thread pool.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShapeMismatch`] if `queries` doesn't have [dims](Self::dims) columns.
    fn k_nearest(&self, k: usize, queries: &Matrix<T>) -> Result<Neighbors<T>> {
        check_dims(self.dims(), queries.cols())?;

        let k = k.min(self.len());
        let rows = queries.rows();
        trace!("k_nearest: {} queries, k = {}", rows, k);

        let mut distances = Matrix::filled(rows, k, zero());
        let mut indices = Matrix::filled(rows, k, 0);
        if k == 0 {
            return Ok(Neighbors { distances, indices });
        }

        let answer = |heap: &mut CappedMaxHeap<T, usize>, q: usize, d: &mut [T], i: &mut [usize]| {
            heap.clear();
            self.search(queries.row(q), None, heap);
            write_sorted(self.proximity(), heap, d, i);
        };

        #[cfg(feature = "parallel")]
        {
            (0..rows)
                .into_par_iter()
                .zip(distances.as_mut_slice().par_chunks_mut(k))
                .zip(indices.as_mut_slice().par_chunks_mut(k))
                .for_each_init(|| new_heap(k), |heap, ((q, d), i)| answer(heap, q, d, i));
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut heap = new_heap(k);
            let chunks = distances
                .as_mut_slice()
                .chunks_mut(k)
                .zip(indices.as_mut_slice().chunks_mut(k));
            for (q, (d, i)) in chunks.enumerate() {
                answer(&mut heap, q, d, i);
            }
        }

        Ok(Neighbors { distances, indices })
    }
}

/// Blanket [Neighborhood] implementation for boxes, so [build] results can be used directly.
impl<T: Value, N: Neighborhood<T> + ?Sized> Neighborhood<T> for Box<N> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn dims(&self) -> usize {
        (**self).dims()
    }

    fn proximity(&self) -> &dyn Proximity<T> {
        (**self).proximity()
    }

    fn search(&self, query: &[T], bound: Option<T>, heap: &mut CappedMaxHeap<T, usize>) {
        (**self).search(query, bound, heap)
    }
}

/// Answer a single query, keeping only candidates within `bound`.
fn bounded_search<T, N>(index: &N, k: usize, query: &[T], bound: Option<T>) -> Result<Vec<Neighbor<T>>>
where
    T: Value,
    N: Neighborhood<T> + ?Sized,
{
    check_dims(index.dims(), query.len())?;

    let k = k.min(index.len());
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut heap = new_heap(k);
    index.search(query, bound, &mut heap);

    let proximity = index.proximity();
    let (keys, values) = heap.into_sorted();
    Ok(values
        .into_iter()
        .zip(keys)
        .map(|(i, reduced)| Neighbor::new(i, proximity.to_distance(reduced)))
        .collect())
}

fn check_dims(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::shape(expected, actual))
    }
}

/// A heap for `k >= 1` neighbors.
fn new_heap<T: Value>(k: usize) -> CappedMaxHeap<T, usize> {
    debug_assert!(k > 0);
    CappedMaxHeap::with_buffers(vec![zero(); k], vec![0; k])
        .unwrap_or_else(|_| unreachable!("heap buffers for k = {k}"))
}

/// Sort a full heap and write its true distances and indices into a result row.
fn write_sorted<T: Value>(
    proximity: &dyn Proximity<T>,
    heap: &mut CappedMaxHeap<T, usize>,
    distances: &mut [T],
    indices: &mut [usize],
) {
    heap.sort();
    debug_assert_eq!(heap.len(), distances.len());

    for (j, (reduced, &index)) in heap.iter().enumerate() {
        distances[j] = proximity.to_distance(reduced);
        indices[j] = index;
    }
}
