//! [d-ary heaps](https://en.wikipedia.org/wiki/D-ary_heap).

use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

/// A total order on heap keys.
pub trait KeyOrder<K> {
    /// Compare two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The keys' own [PartialOrd], with incomparable keys treated as equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<K: PartialOrd> KeyOrder<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }
}

/// Any comparison function is a [KeyOrder].
impl<K, F: Fn(&K, &K) -> Ordering> KeyOrder<K> for F {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// A min-priority queue stored as an `N`-ary heap.
///
/// Compared to a binary heap, a wider node means fewer levels to sift through, at the cost of
/// more comparisons per level.  The children of a node are adjacent in memory, so those extra
/// comparisons are cheap.  The default arity of 8 fits eight `(f64, usize)` entries in two cache
/// lines.
///
///     # use knear::NAryHeap;
///     let mut heap = NAryHeap::new();
///     heap.push(3.0, "c");
///     heap.push(1.0, "a");
///     heap.push(2.0, "b");
///     assert_eq!(heap.pop_min(), Some((1.0, "a")));
///     assert_eq!(heap.pop_min(), Some((2.0, "b")));
///     assert_eq!(heap.len(), 1);
pub struct NAryHeap<K, V, C = NaturalOrder, const N: usize = 8> {
    items: Vec<(K, V)>,
    order: C,
}

impl<K: PartialOrd, V> NAryHeap<K, V> {
    /// Create an empty heap ordered by the keys' natural order.
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }

    /// Create an empty heap with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut heap = Self::new();
        heap.items.reserve(capacity);
        heap
    }
}

impl<K: PartialOrd, V> Default for NAryHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: KeyOrder<K>, const N: usize> NAryHeap<K, V, C, N> {
    /// Create an empty heap ordered by `order`.
    pub fn with_order(order: C) -> Self {
        assert!(N >= 2, "heap arity must be at least 2");
        Self {
            items: Vec::new(),
            order,
        }
    }

    /// Get the number of items in the heap.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Add an item.
    pub fn push(&mut self, key: K, value: V) {
        self.items.push((key, value));
        self.sift_up(self.items.len() - 1);
    }

    /// Look at the item with the smallest key.
    pub fn peek_min(&self) -> Option<(&K, &V)> {
        self.items.first().map(|(k, v)| (k, v))
    }

    /// Remove and return the item with the smallest key.
    pub fn pop_min(&mut self) -> Option<(K, V)> {
        if self.items.is_empty() {
            return None;
        }

        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.order.compare(&self.items[i].0, &self.items[j].0) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / N;
            if self.less(i, parent) {
                self.items.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let first = N * i + 1;
            if first >= len {
                break;
            }

            let last = (first + N).min(len);
            let mut min = first;
            for child in first + 1..last {
                if self.less(child, min) {
                    min = child;
                }
            }

            if self.less(min, i) {
                self.items.swap(i, min);
                i = min;
            } else {
                break;
            }
        }
    }
}

// Can't derive(Debug) since comparison closures aren't Debug
impl<K: Debug, V: Debug, C, const N: usize> Debug for NAryHeap<K, V, C, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NAryHeap")
            .field("arity", &N)
            .field("items", &self.items)
            .finish()
    }
}
