//! L<sup>p</sup> spaces.

use crate::coords::{Bounds, Coordinates};
use crate::distance::{BoxMetric, Metric, Proximity, Value};
use crate::error::{Error, Result};

use num_traits::{one, zero, Float};

/// The L<sup>1</sup> metric.
pub use crate::taxi::Taxicab as L1;

/// Compute the L<sup>1</sup> distance between two points.
pub use crate::taxi::taxicab_distance as l1_distance;

/// The L<sup>2</sup> metric.
pub use crate::euclid::Euclidean as L2;

/// Compute the L<sup>2</sup> distance between two points.
pub use crate::euclid::euclidean_distance as l2_distance;

/// The L<sup>∞</sup> metric.
pub use crate::chebyshev::Chebyshev as Linf;

/// Compute the L<sup>∞</sup> distance between two points.
pub use crate::chebyshev::chebyshev_distance as linf_distance;

/// Compute the [L<sup>p</sup> distance] between two points.
///
/// [L<sup>p</sup> distance]: https://en.wikipedia.org/wiki/Lp_space
pub fn lp_distance<T, U>(p: T::Value, x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    reduced_lp_distance(p, x, y).powf(p.recip())
}

/// Compute the L<sup>p</sup> distance between two points, raised to the `p`th power.
fn reduced_lp_distance<T, U>(p: T::Value, x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    debug_assert!(x.dims() == y.dims());

    let mut sum: T::Value = zero();
    for i in 0..x.dims() {
        sum += (x.coord(i) - y.coord(i)).abs().powf(p);
    }

    sum
}

/// Which closed form a [Minkowski] metric evaluates.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Form<T> {
    L1,
    L2,
    Linf,
    Lp(T),
}

/// The [Minkowski distance] of order `p`.
///
/// ```math
/// \mathrm{minkowski\_distance}(x, y) = \left( \sum_i |x_i - y_i|^p \right)^{1/p}
/// ```
///
/// Orders 1, 2, and ∞ are evaluated with the same closed forms as [L1], [L2], and [Linf], so
/// nothing is exponentiated for them.  Other orders rank candidates by the sum before the final
/// root.
///
/// [Minkowski distance]: https://en.wikipedia.org/wiki/Minkowski_distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minkowski<T> {
    p: T,
    form: Form<T>,
}

impl<T: Value> Minkowski<T> {
    /// Create a Minkowski metric of order `p`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConfig`] unless `p >= 1`.  Smaller orders break the triangle
    /// inequality.
    pub fn new(p: T) -> Result<Self> {
        if !(p >= one()) {
            return Err(Error::InvalidConfig(format!(
                "Minkowski order must be at least 1, got {p:?}"
            )));
        }

        let two = one::<T>() + one();
        let form = if p == one() {
            Form::L1
        } else if p == two {
            Form::L2
        } else if p.is_infinite() {
            Form::Linf
        } else {
            Form::Lp(p)
        };

        Ok(Self { p, form })
    }

    /// The taxicab metric, `p = 1`.
    pub fn manhattan() -> Self {
        Self {
            p: one(),
            form: Form::L1,
        }
    }

    /// The Euclidean metric, `p = 2`.
    pub fn euclidean() -> Self {
        Self {
            p: one::<T>() + one(),
            form: Form::L2,
        }
    }

    /// The Chebyshev metric, `p = ∞`.
    pub fn chebyshev() -> Self {
        Self {
            p: T::infinity(),
            form: Form::Linf,
        }
    }

    /// The order of this metric.
    pub fn p(&self) -> T {
        self.p
    }
}

impl<T: Value> Default for Minkowski<T> {
    fn default() -> Self {
        Self::euclidean()
    }
}

impl<T: Value> Proximity<T> for Minkowski<T> {
    fn name(&self) -> &'static str {
        match self.form {
            Form::L1 => "manhattan",
            Form::L2 => "euclidean",
            Form::Linf => "chebyshev",
            Form::Lp(_) => "minkowski",
        }
    }

    fn reduced_distance(&self, x: &[T], y: &[T]) -> T {
        match self.form {
            Form::L1 => L1.reduced_distance(x, y),
            Form::L2 => L2.reduced_distance(x, y),
            Form::Linf => Linf.reduced_distance(x, y),
            Form::Lp(p) => reduced_lp_distance(p, x, y),
        }
    }

    fn to_distance(&self, reduced: T) -> T {
        match self.form {
            Form::L1 | Form::Linf => reduced,
            Form::L2 => reduced.sqrt(),
            Form::Lp(p) => reduced.powf(p.recip()),
        }
    }

    fn to_reduced(&self, distance: T) -> T {
        match self.form {
            Form::L1 | Form::Linf => distance,
            Form::L2 => distance * distance,
            Form::Lp(p) => distance.powf(p),
        }
    }
}

/// Minkowski distance is a metric for `p >= 1`.
impl<T: Value> Metric<T> for Minkowski<T> {}

impl<T: Value> BoxMetric<T> for Minkowski<T> {
    fn reduced_distance_to_box(&self, point: &[T], bounds: &Bounds<'_, T>) -> T {
        match self.form {
            Form::L1 => L1.reduced_distance_to_box(point, bounds),
            Form::L2 => L2.reduced_distance_to_box(point, bounds),
            Form::Linf => Linf.reduced_distance_to_box(point, bounds),
            Form::Lp(p) => {
                let mut sum = zero();
                for (i, &x) in point.iter().enumerate() {
                    sum += bounds.gap(i, x).powf(p);
                }
                sum
            }
        }
    }
}
