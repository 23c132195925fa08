//! [Euclidean space](https://en.wikipedia.org/wiki/Euclidean_space).

use crate::coords::{Bounds, Coordinates};
use crate::distance::{BoxMetric, Metric, Proximity, Value};

use num_traits::{zero, Float};

/// The [Euclidean distance] metric, also known as L<sup>2</sup> distance.
///
/// Searches rank candidates by the squared distance, to avoid computing expensive square roots
/// until absolutely necessary.
///
///     # use knear::{Euclidean, Proximity};
///     let a = Euclidean.reduced_distance(&[0.0, 0.0], &[3.0, 4.0]);
///     assert_eq!(a, 25.0);
///     assert_eq!(Proximity::<f64>::to_distance(&Euclidean, a), 5.0);
///
/// [Euclidean distance]: https://en.wikipedia.org/wiki/Euclidean_distance
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Euclidean;

/// Compute the squared [Euclidean distance] between two points.
///
/// [Euclidean distance]: https://en.wikipedia.org/wiki/Euclidean_distance
pub fn squared_euclidean_distance<T, U>(x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    debug_assert!(x.dims() == y.dims());

    let mut sum = zero();
    for i in 0..x.dims() {
        let diff = x.coord(i) - y.coord(i);
        sum += diff * diff;
    }

    sum
}

/// Compute the [Euclidean distance] between two points.
///
/// ```math
/// \begin{aligned}
/// \mathrm{euclidean\_distance}(x, y) &= \|x - y\|_2 \\
/// &= \sqrt{\sum_i (x_i - y_i)^2}
/// \end{aligned}
/// ```
///
/// [Euclidean distance]: https://en.wikipedia.org/wiki/Euclidean_distance
pub fn euclidean_distance<T, U>(x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    squared_euclidean_distance(x, y).sqrt()
}

/// The Euclidean distance function.
impl<T: Value> Proximity<T> for Euclidean {
    fn name(&self) -> &'static str {
        "euclidean"
    }

    fn reduced_distance(&self, x: &[T], y: &[T]) -> T {
        squared_euclidean_distance(x, y)
    }

    fn to_distance(&self, reduced: T) -> T {
        reduced.sqrt()
    }

    fn to_reduced(&self, distance: T) -> T {
        distance * distance
    }
}

/// Euclidean distance is a metric.
impl<T: Value> Metric<T> for Euclidean {}

impl<T: Value> BoxMetric<T> for Euclidean {
    fn reduced_distance_to_box(&self, point: &[T], bounds: &Bounds<'_, T>) -> T {
        debug_assert!(point.len() == bounds.dims());

        let mut sum = zero();
        for (i, &x) in point.iter().enumerate() {
            let gap = bounds.gap(i, x);
            sum += gap * gap;
        }
        sum
    }
}
