//! Bounded max-heaps for collecting the k best candidates.

use crate::error::{Error, Result};

use std::cmp::Ordering;

/// Below this length, [sort_pairs] switches to insertion sort.
const INSERTION_SORT_LEN: usize = 16;

/// A fixed-capacity max-heap that keeps the `capacity` smallest keys it has been offered.
///
/// Keys and values live in two parallel arrays.  While filling, every offer is accepted; once
/// full, an offer is accepted only if its key beats the current [maximum](Self::max_key), which
/// it then replaces.  Either way an offer costs `$O(\log k)$`.
///
/// Keys only need [PartialOrd].  Keys that aren't comparable to themselves (NaN) order above
/// every other key: a full heap rejects them, and a NaN at the root is evicted by the next
/// comparable offer.  Nothing panics.
///
///     # use knear::CappedMaxHeap;
///     let mut heap = CappedMaxHeap::new(2).unwrap();
///     for (key, value) in [(5.0, 'a'), (1.0, 'b'), (4.0, 'c'), (2.0, 'd')] {
///         heap.add(key, value);
///     }
///     heap.sort();
///     assert_eq!(heap.keys(), &[1.0, 2.0]);
///     assert_eq!(heap.values(), &['b', 'd']);
#[derive(Clone, Debug)]
pub struct CappedMaxHeap<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
    capacity: usize,
    /// Whether [sort](Self::sort) has replaced the heap order with ascending order.
    sorted: bool,
}

impl<K: Copy + PartialOrd, V> CappedMaxHeap<K, V> {
    /// Create an empty heap that retains up to `capacity` items.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConfig`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig("heap capacity must be positive".into()));
        }

        Ok(Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            capacity,
            sorted: false,
        })
    }

    /// Create an empty heap on top of existing buffers, whose common length becomes the capacity.
    ///
    /// The buffers' contents are discarded; only their allocations are reused.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShapeMismatch`] if the buffers differ in length, or with
    /// [`Error::InvalidConfig`] if they are empty.
    pub fn with_buffers(mut keys: Vec<K>, mut values: Vec<V>) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(Error::shape(keys.len(), values.len()));
        }

        let capacity = keys.len();
        if capacity == 0 {
            return Err(Error::InvalidConfig("heap capacity must be positive".into()));
        }

        keys.clear();
        values.clear();
        Ok(Self {
            keys,
            values,
            capacity,
            sorted: false,
        })
    }

    /// The maximum number of items this heap retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of items currently retained.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check whether nothing has been retained yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check whether `capacity` items are retained, i.e. whether offers can be rejected.
    pub fn is_full(&self) -> bool {
        self.keys.len() == self.capacity
    }

    /// The largest retained key, once the heap is full.
    ///
    /// Before `capacity` items have been added every offer is accepted, so there is no
    /// meaningful threshold yet and this returns `None`.
    pub fn max_key(&self) -> Option<K> {
        if !self.is_full() {
            None
        } else if self.sorted {
            self.keys.last().copied()
        } else {
            self.keys.first().copied()
        }
    }

    /// Offer a key/value pair.  Returns whether it was retained.
    pub fn add(&mut self, key: K, value: V) -> bool {
        if self.sorted {
            self.heapify();
        }

        if self.keys.len() < self.capacity {
            self.keys.push(key);
            self.values.push(value);
            self.sift_up(self.keys.len() - 1);
            true
        } else if greater(&self.keys[0], &key) {
            self.keys[0] = key;
            self.values[0] = value;
            self.sift_down(0);
            true
        } else {
            false
        }
    }

    /// Reorder the retained items by ascending key, permuting values in lock-step.
    ///
    /// Ties are not kept in any particular order.  Adding more items afterwards is allowed, but
    /// first pays `$O(k)$` to restore the heap order.
    pub fn sort(&mut self) {
        if !self.sorted {
            sort_pairs(&mut self.keys, &mut self.values);
            self.sorted = true;
        }
    }

    /// Sort the retained items and unwrap them.
    pub fn into_sorted(mut self) -> (Vec<K>, Vec<V>) {
        self.sort();
        (self.keys, self.values)
    }

    /// The retained keys, in heap order or, after [sort](Self::sort), ascending order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The retained values, in the same order as [keys](Self::keys).
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Iterate over the retained `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.keys.iter().copied().zip(&self.values)
    }

    /// Forget every retained item, keeping the capacity and the allocations.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
        self.sorted = false;
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.keys.swap(i, j);
        self.values.swap(i, j);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if greater(&self.keys[i], &self.keys[parent]) {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.keys.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;

            let mut largest = i;
            if left < len && greater(&self.keys[left], &self.keys[largest]) {
                largest = left;
            }
            if right < len && greater(&self.keys[right], &self.keys[largest]) {
                largest = right;
            }

            if largest == i {
                break;
            }
            self.swap(i, largest);
            i = largest;
        }
    }

    /// Restore the max-heap order after sorting.
    fn heapify(&mut self) {
        for i in (0..self.keys.len() / 2).rev() {
            self.sift_down(i);
        }
        self.sorted = false;
    }
}

/// `a > b`, with self-incomparable keys (NaN) above everything else.
fn greater<K: PartialOrd>(a: &K, b: &K) -> bool {
    match a.partial_cmp(b) {
        Some(order) => order == Ordering::Greater,
        None => b.partial_cmp(b).is_some(),
    }
}

fn less<K: PartialOrd>(a: &K, b: &K) -> bool {
    greater(b, a)
}

/// Sort `keys` ascending, applying the same permutation to `values`.
///
/// Quicksort with a median-of-three pivot and a Hoare partition, recursing into the smaller half
/// so the stack stays `$O(\log n)$` deep.  The median-of-three step leaves sentinels at both ends,
/// so the partition scans need no bounds checks of their own.  NaNs sort last.
fn sort_pairs<K: Copy + PartialOrd, V>(mut keys: &mut [K], mut values: &mut [V]) {
    debug_assert_eq!(keys.len(), values.len());

    loop {
        let n = keys.len();
        if n <= INSERTION_SORT_LEN {
            insertion_sort(keys, values);
            return;
        }

        let mid = n / 2;
        let last = n - 1;
        if less(&keys[mid], &keys[0]) {
            keys.swap(0, mid);
            values.swap(0, mid);
        }
        if less(&keys[last], &keys[0]) {
            keys.swap(0, last);
            values.swap(0, last);
        }
        if less(&keys[last], &keys[mid]) {
            keys.swap(mid, last);
            values.swap(mid, last);
        }
        let pivot = keys[mid];

        let mut i = 0;
        let mut j = last;
        loop {
            i += 1;
            while less(&keys[i], &pivot) {
                i += 1;
            }
            j -= 1;
            while less(&pivot, &keys[j]) {
                j -= 1;
            }
            if i >= j {
                break;
            }
            keys.swap(i, j);
            values.swap(i, j);
        }

        let (left_keys, right_keys) = std::mem::take(&mut keys).split_at_mut(j + 1);
        let (left_values, right_values) = std::mem::take(&mut values).split_at_mut(j + 1);
        if left_keys.len() < right_keys.len() {
            sort_pairs(left_keys, left_values);
            keys = right_keys;
            values = right_values;
        } else {
            sort_pairs(right_keys, right_values);
            keys = left_keys;
            values = left_values;
        }
    }
}

fn insertion_sort<K: Copy + PartialOrd, V>(keys: &mut [K], values: &mut [V]) {
    for i in 1..keys.len() {
        let mut j = i;
        while j > 0 && less(&keys[j], &keys[j - 1]) {
            keys.swap(j, j - 1);
            values.swap(j, j - 1);
            j -= 1;
        }
    }
}
