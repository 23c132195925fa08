//! [Coordinate spaces](https://en.wikipedia.org/wiki/Cartesian_coordinate_system).

use crate::distance::Value;

use num_traits::zero;

/// A point given by its coordinates.
pub trait Coordinates {
    /// The type of individual coordinates.
    type Value: Value;

    /// Get the number of dims this point has.
    fn dims(&self) -> usize;

    /// Get the `i`th coordinate of this point.
    fn coord(&self, i: usize) -> Self::Value;

    /// Create a vector with this point's coordinates as values.
    fn as_vec(&self) -> Vec<Self::Value> {
        (0..self.dims()).map(|i| self.coord(i)).collect()
    }
}

/// [Coordinates] implementation for slices.
impl<T: Value> Coordinates for [T] {
    type Value = T;

    fn dims(&self) -> usize {
        self.len()
    }

    fn coord(&self, i: usize) -> T {
        self[i]
    }

    fn as_vec(&self) -> Vec<T> {
        self.to_vec()
    }
}

/// [Coordinates] implementation for arrays.
impl<T: Value, const N: usize> Coordinates for [T; N] {
    type Value = T;

    fn dims(&self) -> usize {
        N
    }

    fn coord(&self, i: usize) -> T {
        self[i]
    }
}

/// [Coordinates] implemention for vectors.
impl<T: Value> Coordinates for Vec<T> {
    type Value = T;

    fn dims(&self) -> usize {
        self.len()
    }

    fn coord(&self, i: usize) -> T {
        self[i]
    }
}

/// Blanket [Coordinates] implementation for references.
impl<T: ?Sized + Coordinates> Coordinates for &T {
    type Value = T::Value;

    fn dims(&self) -> usize {
        (*self).dims()
    }

    fn coord(&self, i: usize) -> Self::Value {
        (*self).coord(i)
    }
}

/// An axis-aligned bounding box, borrowed from wherever its corners are stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds<'a, T> {
    lower: &'a [T],
    upper: &'a [T],
}

impl<'a, T: Value> Bounds<'a, T> {
    /// Create a box from its lower and upper corners.
    pub fn new(lower: &'a [T], upper: &'a [T]) -> Self {
        debug_assert_eq!(lower.len(), upper.len());
        Self { lower, upper }
    }

    /// The minimum coordinate along every axis.
    pub fn lower(&self) -> &'a [T] {
        self.lower
    }

    /// The maximum coordinate along every axis.
    pub fn upper(&self) -> &'a [T] {
        self.upper
    }

    /// Get the number of dims of this box.
    pub fn dims(&self) -> usize {
        self.lower.len()
    }

    /// The width of this box along axis `i`.
    pub fn extent(&self, i: usize) -> T {
        self.upper[i] - self.lower[i]
    }

    /// How far `x` lies outside this box along axis `i`, or zero if it is within the box's range.
    ///
    /// This is `|x - clamp(x, lower, upper)|`, the building block of every region bound.
    #[inline]
    pub fn gap(&self, i: usize, x: T) -> T {
        let (lo, hi) = (self.lower[i], self.upper[i]);
        if x < lo {
            lo - x
        } else if x > hi {
            x - hi
        } else {
            zero()
        }
    }

    /// Check whether a point lies inside this box (boundary included).
    pub fn contains<C>(&self, point: C) -> bool
    where
        C: Coordinates<Value = T>,
    {
        debug_assert_eq!(point.dims(), self.dims());

        (0..self.dims()).all(|i| {
            let x = point.coord(i);
            self.lower[i] <= x && x <= self.upper[i]
        })
    }
}
