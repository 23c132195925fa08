//! Dense row-major matrices.

use crate::coords::Coordinates;
use crate::error::{Error, Result};

use std::slice::ChunksExact;

/// A dense, row-major matrix.
///
/// Point sets and query batches are matrices with one point per row.  Search results use
/// `Matrix<usize>` for neighbor indices.  A matrix with no rows still remembers its column count.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShapeMismatch`] if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::InvalidConfig(format!("{rows}x{cols} matrix is too large")))?;
        if data.len() != expected {
            return Err(Error::shape(expected, data.len()));
        }

        Ok(Self { rows, cols, data })
    }

    /// Create a matrix with no rows.
    pub fn empty(cols: usize) -> Self {
        Self {
            rows: 0,
            cols,
            data: Vec::new(),
        }
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check whether this matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Get the `i`th row.
    ///
    /// # Panics
    ///
    /// If `i >= self.rows()`.
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over the rows.
    pub fn rows_iter(&self) -> RowIter<'_, T> {
        RowIter {
            // chunks_exact() rejects zero-width chunks
            inner: self.data.chunks_exact(self.cols.max(1)),
            zero_width: if self.cols == 0 { self.rows } else { 0 },
        }
    }

    /// The underlying row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The underlying row-major buffer, mutably.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Unwrap the row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Matrix<T> {
    /// Create a matrix where every entry is `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T: crate::Value> Matrix<T> {
    /// Collect points into a matrix, one per row.
    ///
    /// The column count is taken from the first point, so an empty iterator produces a matrix
    /// with no rows and no columns; use [`Matrix::empty`] to keep a column count.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ShapeMismatch`] if the points disagree on their dimensionality.
    pub fn from_rows<I>(points: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Coordinates<Value = T>,
    {
        let mut rows = 0;
        let mut cols = None;
        let mut data = Vec::new();

        for point in points {
            let dims = point.dims();
            let cols = *cols.get_or_insert(dims);
            if dims != cols {
                return Err(Error::shape(cols, dims));
            }

            data.extend((0..dims).map(|i| point.coord(i)));
            rows += 1;
        }

        Ok(Self {
            rows,
            cols: cols.unwrap_or(0),
            data,
        })
    }
}

/// An iterator over the rows of a [Matrix].
#[derive(Debug)]
pub struct RowIter<'a, T> {
    inner: ChunksExact<'a, T>,
    zero_width: usize,
}

impl<'a, T> Iterator for RowIter<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<&'a [T]> {
        if self.zero_width > 0 {
            self.zero_width -= 1;
            Some(&[])
        } else {
            self.inner.next()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.inner.size_hint();
        (lo + self.zero_width, hi.map(|hi| hi + self.zero_width))
    }
}

impl<T> ExactSizeIterator for RowIter<'_, T> {}
