//! Abstract notions of distance.

use crate::coords::Bounds;

use num_traits::{Float, NumAssign};

use std::fmt::Debug;

/// A number type suitable for coordinates and distance values.
///
/// This trait is automatically implemented for all types that support the required operations,
/// which in practice means `f32` and `f64`.
pub trait Value: Float + NumAssign + Debug + Send + Sync + 'static {}

/// Blanket [Value] implementation.
impl<T: Float + NumAssign + Debug + Send + Sync + 'static> Value for T {}

/// A notion of distance between points given by their coordinates.
///
/// Distances don't need to obey any particular rules like symmetry or the [triangle inequality].
/// Searches never need the true distance to rank candidates, only something that sorts the same
/// way, so implementors provide a *reduced distance*: an [order embedding] of the true distance
/// that is cheaper to compute.  For [Euclidean distance] that is the squared distance, for
/// Minkowski distances it is the sum before the final root.  Implementors must satisfy, for all
/// reduced distances `$x$` and `$y$`:
///
/// ```math
/// x < y \iff \mathrm{to\_distance}(x) < \mathrm{to\_distance}(y)
/// ```
///
/// and `to_reduced` must invert `to_distance`.
///
/// [triangle inequality]: https://en.wikipedia.org/wiki/Triangle_inequality
/// [order embedding]: https://en.wikipedia.org/wiki/Order_embedding
/// [Euclidean distance]: crate::euclid::Euclidean
pub trait Proximity<T: Value>: Debug + Send + Sync {
    /// A short, stable name for this distance, used in error messages.
    fn name(&self) -> &'static str;

    /// Compute the reduced distance between two points.
    fn reduced_distance(&self, x: &[T], y: &[T]) -> T;

    /// Convert a reduced distance to a true distance.
    fn to_distance(&self, reduced: T) -> T {
        reduced
    }

    /// Convert a true distance to a reduced distance.
    fn to_reduced(&self, distance: T) -> T {
        distance
    }

    /// Compute the true distance between two points.
    fn distance(&self, x: &[T], y: &[T]) -> T {
        self.to_distance(self.reduced_distance(x, y))
    }
}

/// Marker trait for [metric spaces].
///
/// A metric must be symmetric and obey the [triangle inequality].  More precisely, let `$x$`,
/// `$y$`, and `$z$` be any points, and let `$d(x, y) = \mathrm{distance}(x, y)$`.  Then the
/// following rules must hold:
///
/// ```math
/// \begin{aligned}
/// d(x, x) &= 0 \\
/// d(x, y) &= d(y, x) & \text{(symmetry)} \\
/// d(x, z) &\le d(x, y) + d(y, z) & \text{(triangle inequality)}
/// \end{aligned}
/// ```
///
/// [metric spaces]: https://en.wikipedia.org/wiki/Metric_space
/// [triangle inequality]: https://en.wikipedia.org/wiki/Triangle_inequality
pub trait Metric<T: Value>: Proximity<T> {}

/// A [Metric] that can bound the distance from a point to an axis-aligned box.
///
/// This is what k-d trees need for pruning.  For every point `$p$` inside `bounds`, an
/// implementation must guarantee
///
/// ```math
/// \mathrm{distance}(x, p) \ge \mathrm{distance\_to\_box}(x, \mathrm{bounds})
/// ```
///
/// and likewise for the reduced forms.
pub trait BoxMetric<T: Value>: Metric<T> {
    /// Compute a lower bound on the reduced distance from `point` to anything inside `bounds`.
    fn reduced_distance_to_box(&self, point: &[T], bounds: &Bounds<'_, T>) -> T;

    /// Compute a lower bound on the true distance from `point` to anything inside `bounds`.
    fn distance_to_box(&self, point: &[T], bounds: &Bounds<'_, T>) -> T {
        self.to_distance(self.reduced_distance_to_box(point, bounds))
    }
}

/// Blanket [Proximity] implementation for references.
impl<T: Value, P: Proximity<T> + ?Sized> Proximity<T> for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn reduced_distance(&self, x: &[T], y: &[T]) -> T {
        (**self).reduced_distance(x, y)
    }

    fn to_distance(&self, reduced: T) -> T {
        (**self).to_distance(reduced)
    }

    fn to_reduced(&self, distance: T) -> T {
        (**self).to_reduced(distance)
    }

    fn distance(&self, x: &[T], y: &[T]) -> T {
        (**self).distance(x, y)
    }
}

/// Blanket [Metric] implementation for references.
impl<T: Value, M: Metric<T> + ?Sized> Metric<T> for &M {}

/// Blanket [BoxMetric] implementation for references.
impl<T: Value, M: BoxMetric<T> + ?Sized> BoxMetric<T> for &M {
    fn reduced_distance_to_box(&self, point: &[T], bounds: &Bounds<'_, T>) -> T {
        (**self).reduced_distance_to_box(point, bounds)
    }

    fn distance_to_box(&self, point: &[T], bounds: &Bounds<'_, T>) -> T {
        (**self).distance_to_box(point, bounds)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_point(rng: &mut ChaCha8Rng, dims: usize) -> Vec<f64> {
        (0..dims).map(|_| rng.random_range(-10.0..10.0)).collect()
    }

    fn assert_le(a: f64, b: f64) {
        assert!(a <= b + 1e-9 * b.abs().max(1.0), "{a} > {b}");
    }

    /// Check the metric axioms and the box lower bound on random points.
    pub fn test_metric<M: BoxMetric<f64>>(metric: M) {
        let mut rng = ChaCha8Rng::seed_from_u64(0xd157);

        for dims in [1, 2, 3, 8] {
            for _ in 0..200 {
                let u = random_point(&mut rng, dims);
                let v = random_point(&mut rng, dims);
                let w = random_point(&mut rng, dims);

                assert_eq!(metric.distance(&u, &u), 0.0);
                assert_eq!(metric.reduced_distance(&v, &v), 0.0);

                let uv = metric.distance(&u, &v);
                assert!(uv > 0.0, "{}: distinct points at distance {uv}", metric.name());
                assert_eq!(uv, metric.distance(&v, &u));
                let roundtrip = metric.to_distance(metric.reduced_distance(&u, &v));
                assert!((roundtrip - uv).abs() <= 1e-9 * uv);

                let uw = metric.distance(&u, &w);
                let vw = metric.distance(&v, &w);
                assert_le(uw, uv + vw);
                assert_le(uv, uw + vw);
                assert_le(vw, uv + uw);

                // A box around v and w, with a point p inside it
                let lower: Vec<f64> = v.iter().zip(&w).map(|(a, b)| a.min(*b)).collect();
                let upper: Vec<f64> = v.iter().zip(&w).map(|(a, b)| a.max(*b)).collect();
                let bounds = Bounds::new(&lower, &upper);
                let p: Vec<f64> = lower
                    .iter()
                    .zip(&upper)
                    .map(|(lo, hi)| (lo + rng.random_range(0.0..=1.0) * (hi - lo)).min(*hi))
                    .collect();
                assert!(bounds.contains(p.as_slice()));

                assert_eq!(metric.distance_to_box(&p, &bounds), 0.0);
                assert_le(metric.distance_to_box(&u, &bounds), metric.distance(&u, &p));
                assert_le(
                    metric.reduced_distance_to_box(&u, &bounds),
                    metric.reduced_distance(&u, &p),
                );
            }
        }
    }
}
