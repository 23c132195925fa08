//! [Taxicab (Manhattan) distance](https://en.wikipedia.org/wiki/Taxicab_geometry).

use crate::coords::{Bounds, Coordinates};
use crate::distance::{BoxMetric, Metric, Proximity, Value};

use num_traits::{zero, Float};

/// The [taxicab distance metric], also known as Manhattan or L<sup>1</sup> distance.
///
/// [taxicab distance metric]: https://en.wikipedia.org/wiki/Taxicab_geometry
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Taxicab;

/// Compute the taxicab distance between two points.
///
/// ```math
/// \begin{aligned}
/// \mathrm{taxicab\_distance}(x, y) &= \|x - y\|_1 \\
/// &= \sum_i |x_i - y_i|
/// \end{aligned}
/// ```
pub fn taxicab_distance<T, U>(x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    debug_assert!(x.dims() == y.dims());

    let mut sum = zero();
    for i in 0..x.dims() {
        sum += (x.coord(i) - y.coord(i)).abs();
    }

    sum
}

/// The taxicab distance function.
impl<T: Value> Proximity<T> for Taxicab {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    fn reduced_distance(&self, x: &[T], y: &[T]) -> T {
        taxicab_distance(x, y)
    }
}

/// Taxicab distance is a metric.
impl<T: Value> Metric<T> for Taxicab {}

impl<T: Value> BoxMetric<T> for Taxicab {
    fn reduced_distance_to_box(&self, point: &[T], bounds: &Bounds<'_, T>) -> T {
        debug_assert!(point.len() == bounds.dims());

        let mut sum = zero();
        for (i, &x) in point.iter().enumerate() {
            sum += bounds.gap(i, x);
        }
        sum
    }
}
