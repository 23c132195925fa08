//! [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance).

use crate::coords::{Bounds, Coordinates};
use crate::distance::{BoxMetric, Metric, Proximity, Value};

use num_traits::{zero, Float};

/// The [Chebyshev distance] metric, also known as L<sup>∞</sup> distance.
///
/// [Chebyshev distance]: https://en.wikipedia.org/wiki/Chebyshev_distance
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Chebyshev;

/// Compute the Chebyshev distance between two points.
///
/// ```math
/// \begin{aligned}
/// \mathrm{chebyshev\_distance}(x, y) &= \|x - y\|_\infty \\
/// &= \max_i |x_i - y_i|
/// \end{aligned}
/// ```
///
/// A NaN coordinate difference makes the whole distance NaN.
pub fn chebyshev_distance<T, U>(x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    debug_assert!(x.dims() == y.dims());

    let mut max = zero();

    for i in 0..x.dims() {
        let diff = (x.coord(i) - y.coord(i)).abs();
        if diff > max || diff.is_nan() {
            max = diff;
        }
    }

    max
}

/// The Chebyshev distance function.
impl<T: Value> Proximity<T> for Chebyshev {
    fn name(&self) -> &'static str {
        "chebyshev"
    }

    fn reduced_distance(&self, x: &[T], y: &[T]) -> T {
        chebyshev_distance(x, y)
    }
}

/// Chebyshev distance is a metric.
impl<T: Value> Metric<T> for Chebyshev {}

impl<T: Value> BoxMetric<T> for Chebyshev {
    fn reduced_distance_to_box(&self, point: &[T], bounds: &Bounds<'_, T>) -> T {
        debug_assert!(point.len() == bounds.dims());

        let mut max = zero();
        for (i, &x) in point.iter().enumerate() {
            let gap = bounds.gap(i, x);
            if gap > max {
                max = gap;
            }
        }
        max
    }
}
