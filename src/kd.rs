//! k-d trees.

use crate::coords::Bounds;
use crate::distance::{BoxMetric, Proximity, Value};
use crate::error::{Error, Result};
use crate::heap::CappedMaxHeap;
use crate::matrix::Matrix;
use crate::nary::NAryHeap;
use crate::Neighborhood;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::ops::Range;

/// How a k-d tree picks the axis to split a node along.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SplitAxis {
    /// Split along the axis where the node's bounding box is widest.
    #[default]
    MaxSpread,
    /// Cycle through the axes by depth.
    RoundRobin,
}

/// The order a k-d tree visits nodes in while searching.
///
/// Both strategies report the same distances; they differ only in how much work they do.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Traversal {
    /// Recurse into the nearer child first, then the farther one.
    #[default]
    DepthFirst,
    /// Always expand the pending node with the smallest lower bound, using a priority queue.
    BestFirst,
}

/// Construction options for a [KdTree].
///
///     # use knear::{KdOptions, SplitAxis};
///     let options = KdOptions::default()
///         .leaf_size(32)
///         .seed(7)
///         .split(SplitAxis::RoundRobin);
///     assert_eq!(options.get_leaf_size(), 32);
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KdOptions {
    leaf_size: usize,
    seed: u64,
    split: SplitAxis,
    traversal: Traversal,
}

impl KdOptions {
    /// The default maximum number of points per leaf.
    pub const DEFAULT_LEAF_SIZE: usize = 16;

    /// Set the maximum number of points per leaf.  Must be at least 2.
    #[must_use]
    pub fn leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Seed the pivot choices made while building, so builds are reproducible.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the split axis policy.
    #[must_use]
    pub fn split(mut self, split: SplitAxis) -> Self {
        self.split = split;
        self
    }

    /// Set the search traversal strategy.
    #[must_use]
    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// The maximum number of points per leaf.
    pub fn get_leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The build seed.
    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    /// The split axis policy.
    pub fn get_split(&self) -> SplitAxis {
        self.split
    }

    /// The search traversal strategy.
    pub fn get_traversal(&self) -> Traversal {
        self.traversal
    }

    /// Check that these options can build a tree.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConfig`] if the leaf size is less than 2.
    pub fn validate(&self) -> Result<()> {
        if self.leaf_size <= 1 {
            return Err(Error::InvalidConfig(format!(
                "leaf size must be greater than 1, got {}",
                self.leaf_size
            )));
        }
        Ok(())
    }
}

impl Default for KdOptions {
    fn default() -> Self {
        Self {
            leaf_size: Self::DEFAULT_LEAF_SIZE,
            seed: 0,
            split: SplitAxis::default(),
            traversal: Traversal::default(),
        }
    }
}

/// The number of leaves for `n` points: a power of two, so the tree is complete.
fn leaf_count(n: usize, leaf_size: usize) -> usize {
    n.div_ceil(leaf_size).max(1).next_power_of_two()
}

/// A [k-d tree](https://en.wikipedia.org/wiki/K-d_tree) stored as a flat, implicit binary tree.
///
/// Node `i` has children `2i + 1` and `2i + 2`, and every node stores the bounding box of the
/// points below it.  All leaves sit at the same depth and own a contiguous run of at most
/// `leaf_size` points.  The tree is immutable once built, so it can be queried from many threads
/// at once; every query brings its own [CappedMaxHeap].
#[derive(Clone, Debug)]
pub struct KdTree<T, M> {
    metric: M,
    options: KdOptions,
    dims: usize,
    /// Point coordinates, reordered so each leaf's points are adjacent.
    data: Vec<T>,
    /// `index[slot]` is the original row of the point stored at `slot`.
    index: Vec<usize>,
    /// Lower then upper corner of each node's bounding box, `2 * dims` values per node.
    bounds: Vec<T>,
    /// Leaf `l` owns slots `offsets[l]..offsets[l + 1]`.
    offsets: Vec<usize>,
    leaves: usize,
}

impl<T: Value, M: BoxMetric<T>> KdTree<T, M> {
    /// Build a tree over the rows of `entries` with the default options.
    ///
    /// # Errors
    ///
    /// See [`KdTree::with_options`].
    pub fn new(metric: M, entries: Matrix<T>) -> Result<Self> {
        Self::with_options(metric, entries, KdOptions::default())
    }

    /// Build a tree over the rows of `entries`.
    ///
    /// Construction takes expected `$O(N \log N)$` time.  Each split partitions its points around
    /// the median with a randomized quickselect, whose pivots come from a PRNG seeded with
    /// [`KdOptions::seed`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConfig`] if the options are invalid.
    pub fn with_options(metric: M, entries: Matrix<T>, options: KdOptions) -> Result<Self> {
        options.validate()?;

        let n = entries.rows();
        let dims = entries.cols();
        let leaves = leaf_count(n, options.leaf_size);
        let nodes = 2 * leaves - 1;

        let mut builder = Builder {
            data: entries.as_slice(),
            dims,
            split: options.split,
            rng: ChaCha8Rng::seed_from_u64(options.seed),
            index: (0..n).collect(),
            bounds: empty_boxes(nodes, dims),
            offsets: vec![n; leaves + 1],
            leaves,
        };
        if n > 0 {
            builder.build(0, 0..n, 0);
        }

        let Builder {
            index,
            bounds,
            offsets,
            ..
        } = builder;

        let mut data = entries.into_vec();
        permute_rows(&mut data, &index, dims);

        debug!(
            "built k-d tree: {} points, {} dims, {} leaves, {:?} split, {} distance",
            n,
            dims,
            leaves,
            options.split,
            metric.name(),
        );

        Ok(Self {
            metric,
            options,
            dims,
            data,
            index,
            bounds,
            offsets,
            leaves,
        })
    }

    /// The metric this tree searches with.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The options this tree was built with.
    pub fn options(&self) -> &KdOptions {
        &self.options
    }

    /// The maximum number of points per leaf.
    pub fn leaf_size(&self) -> usize {
        self.options.leaf_size
    }

    /// The number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// The number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        2 * self.leaves - 1
    }

    /// The original row index of the point at each storage slot.
    pub fn permutation(&self) -> &[usize] {
        &self.index
    }

    /// The bounding box of a node, if it exists.
    ///
    /// An empty tree's root has an empty box, with lower corner `+∞` and upper corner `-∞`.
    pub fn bounds(&self, node: usize) -> Option<Bounds<'_, T>> {
        (node < self.node_count()).then(|| self.node_bounds(node))
    }

    /// The storage slots owned by a leaf, if it exists.
    pub fn leaf_slots(&self, leaf: usize) -> Option<Range<usize>> {
        (leaf < self.leaves).then(|| self.offsets[leaf]..self.offsets[leaf + 1])
    }

    /// The coordinates stored at a slot, if it exists.
    pub fn slot_point(&self, slot: usize) -> Option<&[T]> {
        (slot < self.index.len()).then(|| self.point(slot))
    }

    fn point(&self, slot: usize) -> &[T] {
        &self.data[slot * self.dims..(slot + 1) * self.dims]
    }

    fn node_bounds(&self, node: usize) -> Bounds<'_, T> {
        let start = 2 * self.dims * node;
        let (lower, upper) = self.bounds[start..start + 2 * self.dims].split_at(self.dims);
        Bounds::new(lower, upper)
    }

    fn is_leaf(&self, node: usize) -> bool {
        node >= self.leaves - 1
    }

    fn lower_bound(&self, query: &[T], node: usize) -> T {
        self.metric
            .reduced_distance_to_box(query, &self.node_bounds(node))
    }

    /// Whether nothing under a node with this lower bound can make it into the results.
    fn prunes(&self, lower: T, limit: Option<T>, heap: &CappedMaxHeap<T, usize>) -> bool {
        heap.max_key().is_some_and(|max| lower >= max) || limit.is_some_and(|limit| lower > limit)
    }

    fn scan_leaf(
        &self,
        node: usize,
        query: &[T],
        limit: Option<T>,
        heap: &mut CappedMaxHeap<T, usize>,
    ) {
        let leaf = node - (self.leaves - 1);
        for slot in self.offsets[leaf]..self.offsets[leaf + 1] {
            let distance = self.metric.reduced_distance(query, self.point(slot));
            if limit.map_or(true, |limit| distance <= limit) {
                heap.add(distance, self.index[slot]);
            }
        }
    }

    /// Depth-first branch and bound.
    fn visit(
        &self,
        node: usize,
        lower: T,
        query: &[T],
        limit: Option<T>,
        heap: &mut CappedMaxHeap<T, usize>,
    ) {
        if self.prunes(lower, limit, heap) {
            return;
        }

        if self.is_leaf(node) {
            self.scan_leaf(node, query, limit, heap);
            return;
        }

        let (left, right) = (2 * node + 1, 2 * node + 2);
        let left_lower = self.lower_bound(query, left);
        let right_lower = self.lower_bound(query, right);

        if left_lower <= right_lower {
            self.visit(left, left_lower, query, limit, heap);
            self.visit(right, right_lower, query, limit, heap);
        } else {
            self.visit(right, right_lower, query, limit, heap);
            self.visit(left, left_lower, query, limit, heap);
        }
    }

    /// Best-first branch and bound.
    fn expand(&self, query: &[T], limit: Option<T>, heap: &mut CappedMaxHeap<T, usize>) {
        let mut pending = NAryHeap::new();
        pending.push(self.lower_bound(query, 0), 0);

        while let Some((lower, node)) = pending.pop_min() {
            if self.prunes(lower, limit, heap) {
                continue;
            }

            if self.is_leaf(node) {
                self.scan_leaf(node, query, limit, heap);
                continue;
            }

            for child in [2 * node + 1, 2 * node + 2] {
                let child_lower = self.lower_bound(query, child);
                if !self.prunes(child_lower, limit, heap) {
                    pending.push(child_lower, child);
                }
            }
        }
    }
}

impl<T: Value, M: BoxMetric<T>> Neighborhood<T> for KdTree<T, M> {
    fn len(&self) -> usize {
        self.index.len()
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn proximity(&self) -> &dyn Proximity<T> {
        &self.metric
    }

    fn search(&self, query: &[T], bound: Option<T>, heap: &mut CappedMaxHeap<T, usize>) {
        if self.index.is_empty() {
            return;
        }

        match self.options.traversal {
            Traversal::DepthFirst => {
                let lower = self.lower_bound(query, 0);
                self.visit(0, lower, query, bound, heap);
            }
            Traversal::BestFirst => self.expand(query, bound, heap),
        }
    }
}

/// `nodes` empty bounding boxes, i.e. `[+∞, -∞]` on every axis.
fn empty_boxes<T: Value>(nodes: usize, dims: usize) -> Vec<T> {
    let mut bounds = Vec::with_capacity(2 * dims * nodes);
    for _ in 0..nodes {
        bounds.extend(std::iter::repeat(T::infinity()).take(dims));
        bounds.extend(std::iter::repeat(T::neg_infinity()).take(dims));
    }
    bounds
}

/// Mutable state for building a [KdTree].
struct Builder<'a, T> {
    data: &'a [T],
    dims: usize,
    split: SplitAxis,
    rng: ChaCha8Rng,
    index: Vec<usize>,
    bounds: Vec<T>,
    offsets: Vec<usize>,
    leaves: usize,
}

impl<T: Value> Builder<'_, T> {
    fn coord(&self, row: usize, axis: usize) -> T {
        self.data[row * self.dims + axis]
    }

    fn node_box(&mut self, node: usize) -> (&mut [T], &mut [T]) {
        let start = 2 * self.dims * node;
        self.bounds[start..start + 2 * self.dims].split_at_mut(self.dims)
    }

    /// Build the subtree rooted at `node` over the points in `slots`.
    fn build(&mut self, node: usize, slots: Range<usize>, depth: usize) {
        if node >= self.leaves - 1 {
            self.offsets[node - (self.leaves - 1)] = slots.start;
            self.scan_box(node, slots);
            return;
        }

        let mid = slots.start + slots.len() / 2;
        if self.dims > 0 {
            let axis = match self.split {
                SplitAxis::MaxSpread => {
                    self.scan_box(node, slots.clone());
                    self.widest_axis(node)
                }
                SplitAxis::RoundRobin => depth % self.dims,
            };
            self.select(slots.clone(), mid, axis);
        }

        let (left, right) = (2 * node + 1, 2 * node + 2);
        self.build(left, slots.start..mid, depth + 1);
        self.build(right, mid..slots.end, depth + 1);
        self.union_box(node, left, right);
    }

    /// Compute a node's bounding box from its points.
    fn scan_box(&mut self, node: usize, slots: Range<usize>) {
        let dims = self.dims;
        let start = 2 * dims * node;

        for slot in slots {
            let row = self.index[slot];
            let point = &self.data[row * dims..(row + 1) * dims];
            let (lower, upper) = self.bounds[start..start + 2 * dims].split_at_mut(dims);
            for (i, &x) in point.iter().enumerate() {
                if x < lower[i] {
                    lower[i] = x;
                }
                if x > upper[i] {
                    upper[i] = x;
                }
            }
        }
    }

    /// Set a node's bounding box to the union of its children's.
    fn union_box(&mut self, node: usize, left: usize, right: usize) {
        let dims = self.dims;
        for i in 0..dims {
            let (l, r) = (2 * dims * left, 2 * dims * right);
            let lower = min(self.bounds[l + i], self.bounds[r + i]);
            let upper = max(self.bounds[l + dims + i], self.bounds[r + dims + i]);

            let (node_lower, node_upper) = self.node_box(node);
            node_lower[i] = lower;
            node_upper[i] = upper;
        }
    }

    fn widest_axis(&mut self, node: usize) -> usize {
        let (lower, upper) = self.node_box(node);

        let mut axis = 0;
        let mut widest = T::neg_infinity();
        for (i, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            let extent = hi - lo;
            if extent > widest {
                axis = i;
                widest = extent;
            }
        }
        axis
    }

    /// Reorder `slots` so the point at `nth` is the one that belongs there in sorted order along
    /// `axis`, with no greater points before it and no smaller points after it.
    ///
    /// This is quickselect with a random pivot and a three-way partition, so runs of equal
    /// coordinates can't degrade it.
    fn select(&mut self, slots: Range<usize>, nth: usize, axis: usize) {
        let Range { mut start, mut end } = slots;

        while end - start > 1 {
            let pivot_slot = self.rng.random_range(start..end);
            let pivot = self.coord(self.index[pivot_slot], axis);

            // [start, lt) < pivot, [lt, i) == pivot, [gt, end) > pivot
            let mut lt = start;
            let mut i = start;
            let mut gt = end;
            while i < gt {
                let x = self.coord(self.index[i], axis);
                if x < pivot {
                    self.index.swap(lt, i);
                    lt += 1;
                    i += 1;
                } else if x > pivot {
                    gt -= 1;
                    self.index.swap(i, gt);
                } else {
                    i += 1;
                }
            }

            if nth < lt {
                end = lt;
            } else if nth >= gt {
                start = gt;
            } else {
                return;
            }
        }
    }
}

fn min<T: Value>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

fn max<T: Value>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// Reorder fixed-width rows so that row `slot` ends up holding what row `index[slot]` held.
///
/// Follows each cycle of the permutation once, so every row moves exactly once.
fn permute_rows<T: Copy>(data: &mut [T], index: &[usize], dims: usize) {
    let mut done = vec![false; index.len()];
    let mut saved = Vec::with_capacity(dims);

    for start in 0..index.len() {
        if done[start] {
            continue;
        }
        if index[start] == start {
            done[start] = true;
            continue;
        }

        saved.clear();
        saved.extend_from_slice(&data[start * dims..(start + 1) * dims]);

        let mut slot = start;
        loop {
            done[slot] = true;
            let src = index[slot];
            if src == start {
                data[slot * dims..(slot + 1) * dims].copy_from_slice(&saved);
                break;
            }
            data.copy_within(src * dims..(src + 1) * dims, slot * dims);
            slot = src;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::euclid::Euclidean;
    use crate::lp::Minkowski;
    use crate::taxi::Taxicab;
    use crate::tests::{random_matrix, test_neighborhood};
    use crate::{BruteNeighborhood, Neighbor};

    fn all_options() -> Vec<KdOptions> {
        let mut options = Vec::new();
        for split in [SplitAxis::MaxSpread, SplitAxis::RoundRobin] {
            for traversal in [Traversal::DepthFirst, Traversal::BestFirst] {
                for leaf_size in [2, 3, 16] {
                    options.push(
                        KdOptions::default()
                            .split(split)
                            .traversal(traversal)
                            .leaf_size(leaf_size),
                    );
                }
            }
        }
        options
    }

    /// Check the structural invariants of a built tree.
    fn check_structure<M: BoxMetric<f64>>(tree: &KdTree<f64, M>, entries: &Matrix<f64>) {
        let n = entries.rows();

        let mut seen = vec![false; n];
        for &row in tree.permutation() {
            assert!(!seen[row], "row {row} stored twice");
            seen[row] = true;
        }
        assert!(seen.iter().all(|&s| s));

        for (slot, &row) in tree.permutation().iter().enumerate() {
            assert_eq!(tree.slot_point(slot), Some(entries.row(row)));
        }

        for node in 0..tree.leaf_count() - 1 {
            let parent = tree.bounds(node).unwrap();
            for child in [2 * node + 1, 2 * node + 2] {
                let child = tree.bounds(child).unwrap();
                for i in 0..tree.dims() {
                    assert!(parent.lower()[i] <= child.lower()[i]);
                    assert!(parent.upper()[i] >= child.upper()[i]);
                }
            }
        }

        let mut covered = 0;
        for leaf in 0..tree.leaf_count() {
            let slots = tree.leaf_slots(leaf).unwrap();
            assert_eq!(slots.start, covered);
            assert!(slots.len() <= tree.leaf_size());
            covered = slots.end;

            let bounds = tree.bounds(tree.leaf_count() - 1 + leaf).unwrap();
            for slot in slots {
                assert!(bounds.contains(tree.slot_point(slot).unwrap()));
            }
        }
        assert_eq!(covered, n);
    }

    #[test]
    fn test_kd_tree() {
        for options in all_options() {
            test_neighborhood(|entries| KdTree::with_options(Euclidean, entries, options).unwrap());
        }
    }

    #[test]
    fn test_invalid_leaf_size() {
        let entries = Matrix::from_rows([[0.0], [1.0]]).unwrap();
        for leaf_size in [0, 1] {
            let options = KdOptions::default().leaf_size(leaf_size);
            assert!(matches!(
                KdTree::with_options(Euclidean, entries.clone(), options),
                Err(Error::InvalidConfig(_)),
            ));
        }
    }

    #[test]
    fn test_structure() {
        for options in all_options() {
            for n in [1, 2, 5, 16, 17, 100, 257] {
                let entries = random_matrix(n, 3, n as u64);
                let tree = KdTree::with_options(Euclidean, entries.clone(), options).unwrap();
                assert_eq!(tree.len(), n);
                assert_eq!(tree.slot_point(n), None);
                check_structure(&tree, &entries);
            }
        }
    }

    #[test]
    fn test_shape() {
        assert_eq!(leaf_count(0, 16), 1);
        assert_eq!(leaf_count(16, 16), 1);
        assert_eq!(leaf_count(17, 16), 2);
        assert_eq!(leaf_count(100, 16), 8);
        assert_eq!(leaf_count(5, 2), 4);

        let tree = KdTree::new(Euclidean, random_matrix(10, 2, 1)).unwrap();
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.node_count(), 1);

        let tree = KdTree::new(Euclidean, random_matrix(1000, 2, 1)).unwrap();
        assert_eq!(tree.leaf_count(), 64);
        assert_eq!(tree.node_count(), 127);
    }

    #[test]
    fn test_empty() {
        let tree = KdTree::new(Euclidean, Matrix::<f64>::empty(3)).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.dims(), 3);

        let root = tree.bounds(0).unwrap();
        assert_eq!(root.lower(), &[f64::INFINITY; 3]);
        assert!(tree.bounds(1).is_none());

        let queries = Matrix::from_rows([[0.0, 0.0, 0.0]]).unwrap();
        let neighbors = tree.k_nearest(3, &queries).unwrap();
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors.k(), 0);
    }

    #[test]
    fn test_reproducible() {
        let entries = random_matrix(500, 4, 99);
        let options = KdOptions::default().leaf_size(4).seed(1234);

        let a = KdTree::with_options(Euclidean, entries.clone(), options).unwrap();
        let b = KdTree::with_options(Euclidean, entries.clone(), options).unwrap();
        assert_eq!(a.permutation(), b.permutation());
        assert_eq!(a.bounds, b.bounds);
    }

    #[test]
    fn test_duplicates() {
        let mut rows = vec![[1.0, 1.0]; 40];
        rows.extend([[0.0, 0.0], [2.0, 2.0]]);
        let entries = Matrix::from_rows(rows).unwrap();

        let tree = KdTree::with_options(Euclidean, entries.clone(), KdOptions::default().leaf_size(2))
            .unwrap();
        check_structure(&tree, &entries);

        let neighbors = tree.k_nearest_to(3, &[-1.0, -1.0]).unwrap();
        assert_eq!(neighbors[0].index, 40);
        assert_eq!(neighbors[1].distance, 8.0f64.sqrt());
        assert_eq!(neighbors[2].distance, 8.0f64.sqrt());
    }

    #[test]
    fn test_other_metrics() {
        let entries = random_matrix(300, 3, 5);
        let queries = random_matrix(20, 3, 6);
        let options = KdOptions::default().leaf_size(4);

        macro_rules! check {
            ($metric:expr) => {
                let tree = KdTree::with_options($metric, entries.clone(), options).unwrap();
                let brute = BruteNeighborhood::new($metric, entries.clone());
                let expected = brute.k_nearest(7, &queries).unwrap();
                let actual = tree.k_nearest(7, &queries).unwrap();
                for (e, a) in expected.distances.as_slice().iter().zip(actual.distances.as_slice()) {
                    assert!((e - a).abs() <= 1e-12 * e.max(1.0), "{e} != {a}");
                }
            };
        }

        check!(Taxicab);
        check!(Euclidean);
        check!(Minkowski::new(3.0).unwrap());
        check!(Minkowski::chebyshev());
    }

    #[test]
    fn test_nan() {
        let entries = Matrix::from_rows([
            [0.0, 0.0],
            [f64::NAN, 1.0],
            [1.0, 1.0],
            [2.0, f64::NAN],
            [3.0, 3.0],
        ])
        .unwrap();

        let tree = KdTree::with_options(Euclidean, entries, KdOptions::default().leaf_size(2))
            .unwrap();
        assert_eq!(tree.len(), 5);

        let neighbors = tree.k_nearest_to(5, &[0.0, 0.0]).unwrap();
        assert_eq!(neighbors.len(), 5);

        let indices: Vec<_> = neighbors.iter().map(|n| n.index).collect();
        assert_eq!(&indices[..3], &[0, 2, 4]);
        assert!(neighbors[3..].iter().all(|n| n.distance.is_nan()));

        let neighbors = tree.k_nearest_to(2, &[f64::NAN, 0.0]).unwrap();
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn test_nan_identity() {
        for options in all_options() {
            let entries = Matrix::from_rows([[f64::NAN, 0.0], [0.0, 0.0], [1.0, 1.0]]).unwrap();
            let tree = KdTree::with_options(Euclidean, entries, options).unwrap();

            let nearest = tree.nearest(&[0.0, 0.0]).unwrap();
            assert_eq!(nearest, Some(Neighbor::new(1, 0.0)), "{options:?}");
            let nearest = tree.nearest(&[1.0, 1.0]).unwrap();
            assert_eq!(nearest, Some(Neighbor::new(2, 0.0)), "{options:?}");
        }
    }

    #[test]
    fn test_zero_dims() {
        let entries = Matrix::<f64>::new(20, 0, vec![]).unwrap();
        let tree = KdTree::with_options(Euclidean, entries, KdOptions::default().leaf_size(4))
            .unwrap();
        let neighbors = tree.k_nearest_to(3, &[]).unwrap();
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.iter().all(|n| n.distance == 0.0));
    }

    #[test]
    fn test_permute_rows() {
        let mut data = vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4];
        let index = [3, 0, 4, 1, 2];
        permute_rows(&mut data, &index, 2);
        assert_eq!(data, vec![3, 3, 0, 0, 4, 4, 1, 1, 2, 2]);
    }
}
