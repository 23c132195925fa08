//! [Cosine distance](https://en.wikipedia.org/wiki/Cosine_similarity).
//!
//! Neither distance here can bound the distance to a box, so they only work with
//! [`BruteNeighborhood`](crate::BruteNeighborhood).

use crate::coords::Coordinates;
use crate::distance::{Metric, Proximity, Value};

use num_traits::{one, zero, Float};

/// Compute the [cosine *similarity*] between two points.
///
/// Use [cosine_distance] instead if you need a distance.
///
/// ```math
/// \begin{aligned}
/// \mathrm{cosine\_similarity}(x, y) &= \frac{x \cdot y}{\|x\| \|y\|} \\
/// &= \frac{\sum_i x_i y_i}{\sqrt{\sum_i x_i^2} \sqrt{\sum_i y_i^2}} \\
/// &= \cos \theta
/// \end{aligned}
/// ```
///
/// The similarity involving a zero vector is NaN.
///
/// [cosine *similarity*]: https://en.wikipedia.org/wiki/Cosine_similarity
pub fn cosine_similarity<T, U>(x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    debug_assert!(x.dims() == y.dims());

    let mut dot: T::Value = zero();
    let mut xx: T::Value = zero();
    let mut yy: T::Value = zero();

    for i in 0..x.dims() {
        let xi = x.coord(i);
        let yi = y.coord(i);
        dot += xi * yi;
        xx += xi * xi;
        yy += yi * yi;
    }

    // Rounding can push |cos θ| slightly past 1
    let one: T::Value = one();
    let cos = dot / (xx * yy).sqrt();
    if cos > one {
        one
    } else if cos < -one {
        -one
    } else {
        cos
    }
}

/// Compute the [cosine distance] between two points.
///
/// ```math
/// \begin{aligned}
/// \mathrm{cosine\_distance}(x, y) &= 1 - \mathrm{cosine\_similarity}(x, y) \\
/// &= 1 - \cos \theta
/// \end{aligned}
/// ```
///
/// [cosine distance]: https://en.wikipedia.org/wiki/Cosine_similarity
pub fn cosine_distance<T, U>(x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    let one: T::Value = one();
    one - cosine_similarity(x, y)
}

/// Compute the [angular distance] between two points.
///
/// ```math
/// \begin{aligned}
/// \mathrm{angular\_distance}(x, y) &= \arccos(\mathrm{cosine\_similarity}(x, y)) \\
/// &= \theta
/// \end{aligned}
/// ```
///
/// [angular distance]: https://en.wikipedia.org/wiki/Cosine_similarity#Angular_distance_and_similarity
pub fn angular_distance<T, U>(x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    cosine_similarity(x, y).acos()
}

/// The [cosine distance] function.
///
/// Cosine distance is not a metric: it breaks the triangle inequality.
///
/// [cosine distance]: cosine_distance
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cosine;

impl<T: Value> Proximity<T> for Cosine {
    fn name(&self) -> &'static str {
        "cosine"
    }

    fn reduced_distance(&self, x: &[T], y: &[T]) -> T {
        cosine_distance(x, y)
    }
}

/// The [angular distance] metric.
///
/// Candidates are ranked by [cosine distance](cosine_distance), which orders the same way as the
/// angle, and only reported neighbors pay for the `acos()`.
///
/// [angular distance]: angular_distance
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Angular;

impl<T: Value> Proximity<T> for Angular {
    fn name(&self) -> &'static str {
        "angular"
    }

    fn reduced_distance(&self, x: &[T], y: &[T]) -> T {
        cosine_distance(x, y)
    }

    fn to_distance(&self, reduced: T) -> T {
        (T::one() - reduced).acos()
    }

    fn to_reduced(&self, distance: T) -> T {
        // Angles never exceed π, and cos() stops being monotonic past it
        let pi = (-T::one()).acos();
        let distance = if distance > pi { pi } else { distance };
        T::one() - distance.cos()
    }
}

/// Angular distance is a metric.
impl<T: Value> Metric<T> for Angular {}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_cosine() {
        assert_close(cosine_distance([3.0, 4.0], [3.0, 4.0]), 0.0);
        assert_close(cosine_distance([3.0, 4.0], [-4.0, 3.0]), 1.0);
        assert_close(cosine_distance([3.0, 4.0], [-3.0, -4.0]), 2.0);
        assert_close(cosine_distance([3.0, 4.0], [6.0, 8.0]), 0.0);

        assert_close(Cosine.distance(&[1.0, 0.0], &[0.0, 1.0]), 1.0);
        assert!(cosine_distance([0.0, 0.0], [1.0, 1.0]).is_nan());
    }

    #[test]
    fn test_angular() {
        assert_close(angular_distance([3.0, 4.0], [3.0, 4.0]), 0.0);
        assert_close(angular_distance([3.0, 4.0], [-4.0, 3.0]), FRAC_PI_2);
        assert_close(angular_distance([3.0, 4.0], [-3.0, -4.0]), PI);
        assert_close(angular_distance([1.0, 0.0], [1.0, 1.0]), FRAC_PI_4);

        let reduced = Angular.reduced_distance(&[1.0, 0.0], &[1.0, 1.0]);
        assert_close(Angular.to_distance(reduced), FRAC_PI_4);
        assert_close(Angular.to_reduced(FRAC_PI_4), reduced);
        assert_close(Angular.distance(&[1.0, 0.0], &[0.0, -1.0]), FRAC_PI_2);

        let antipodal: f64 = Angular.reduced_distance(&[1.0, 0.0], &[-1.0, 0.0]);
        assert_eq!(antipodal, 2.0);
        assert_eq!(Angular.to_reduced(PI), 2.0);
        assert_eq!(Angular.to_reduced(4.0), 2.0);
        assert_eq!(Angular.to_reduced(100.0), 2.0);
        assert!(Proximity::<f64>::to_reduced(&Angular, f64::NAN).is_nan());
    }
}
