//! Choosing distance functions and index structures at runtime.

use crate::brute::BruteNeighborhood;
use crate::chebyshev::Chebyshev;
use crate::cos::{Angular, Cosine};
use crate::distance::{Proximity, Value};
use crate::error::{Error, Result};
use crate::euclid::Euclidean;
use crate::kd::{KdOptions, KdTree};
use crate::lp::Minkowski;
use crate::matrix::Matrix;
use crate::taxi::Taxicab;
use crate::Neighborhood;

use log::debug;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A distance function picked by name.
///
/// Parsing is case-insensitive and accepts these spellings:
///
/// | Variant                  | Names                                    |
/// |--------------------------|------------------------------------------|
/// | [Manhattan](Self::Manhattan) | `manhattan`, `cityblock`, `taxicab`, `l1` |
/// | [Euclidean](Self::Euclidean) | `euclidean`, `l2`                    |
/// | [Chebyshev](Self::Chebyshev) | `chebyshev`, `linf`, `infinity`      |
/// | [Minkowski](Self::Minkowski) | `minkowski:<p>`, `l<p>`              |
/// | [Cosine](Self::Cosine)   | `cosine`                                 |
/// | [Angular](Self::Angular) | `angular`                                |
///
///     # use knear::MetricKind;
///     let metric: MetricKind<f64> = "L3".parse()?;
///     assert_eq!(metric, MetricKind::Minkowski(knear::Minkowski::new(3.0)?));
///     assert!(metric.is_tree_capable());
///     # Ok::<(), knear::Error>(())
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricKind<T> {
    /// [Taxicab].
    Manhattan,
    /// [Euclidean].
    Euclidean,
    /// [Chebyshev].
    Chebyshev,
    /// [Minkowski] of some order.
    Minkowski(Minkowski<T>),
    /// [Cosine].
    Cosine,
    /// [Angular].
    Angular,
}

impl<T: Value> MetricKind<T> {
    /// Check whether a [KdTree] can search with this distance.
    pub fn is_tree_capable(&self) -> bool {
        !matches!(self, Self::Cosine | Self::Angular)
    }

    fn as_proximity(&self) -> &dyn Proximity<T> {
        match self {
            Self::Manhattan => &Taxicab,
            Self::Euclidean => &Euclidean,
            Self::Chebyshev => &Chebyshev,
            Self::Minkowski(minkowski) => minkowski,
            Self::Cosine => &Cosine,
            Self::Angular => &Angular,
        }
    }
}

impl<T: Value> Default for MetricKind<T> {
    fn default() -> Self {
        Self::Euclidean
    }
}

impl<T: Value> FromStr for MetricKind<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let kind = match name.as_str() {
            "manhattan" | "cityblock" | "taxicab" | "l1" => Self::Manhattan,
            "euclidean" | "l2" => Self::Euclidean,
            "chebyshev" | "linf" | "infinity" => Self::Chebyshev,
            "cosine" => Self::Cosine,
            "angular" => Self::Angular,
            _ => {
                let order = name
                    .strip_prefix("minkowski:")
                    .or_else(|| name.strip_prefix('l'))
                    .ok_or_else(|| Error::UnknownMetric(s.to_owned()))?;
                let p = parse_order(order).ok_or_else(|| Error::UnknownMetric(s.to_owned()))?;
                Self::Minkowski(Minkowski::new(p)?)
            }
        };
        Ok(kind)
    }
}

fn parse_order<T: Value>(order: &str) -> Option<T> {
    let order = order.trim();
    if order == "inf" || order == "infinity" {
        return Some(T::infinity());
    }
    order.parse::<f64>().ok().and_then(T::from)
}

impl<T: Value> Proximity<T> for MetricKind<T> {
    fn name(&self) -> &'static str {
        self.as_proximity().name()
    }

    fn reduced_distance(&self, x: &[T], y: &[T]) -> T {
        self.as_proximity().reduced_distance(x, y)
    }

    fn to_distance(&self, reduced: T) -> T {
        self.as_proximity().to_distance(reduced)
    }

    fn to_reduced(&self, distance: T) -> T {
        self.as_proximity().to_reduced(distance)
    }
}

/// An index structure picked by name.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Algorithm {
    /// A [KdTree] when the metric supports one, otherwise brute force.
    #[default]
    Auto,
    /// A [KdTree].
    KdTree,
    /// A [BruteNeighborhood].
    Brute,
}

impl Algorithm {
    /// The canonical name of this algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::KdTree => "kd_tree",
            Self::Brute => "brute",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "kd_tree" | "kdtree" => Ok(Self::KdTree),
            "brute" => Ok(Self::Brute),
            _ => Err(Error::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Build an index over the rows of `entries`.
///
/// `options` configures k-d trees and is ignored by brute force.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedMetric`] if [`Algorithm::KdTree`] is asked for with a metric
/// that can't bound distances to a box, or with whatever [`KdTree::with_options`] reports.
///
///     # use knear::{build, Algorithm, KdOptions, Matrix, MetricKind, Neighborhood};
///     let entries = Matrix::from_rows([[0.0, 0.0], [3.0, 4.0]])?;
///     let metric: MetricKind<f64> = "euclidean".parse()?;
///     let index = build(Algorithm::Auto, metric, entries, KdOptions::default())?;
///     assert_eq!(index.nearest(&[3.0, 3.0])?.map(|n| n.index), Some(1));
///     # Ok::<(), knear::Error>(())
pub fn build<T: Value>(
    algorithm: Algorithm,
    metric: MetricKind<T>,
    entries: Matrix<T>,
    options: KdOptions,
) -> Result<Box<dyn Neighborhood<T>>> {
    let algorithm = match algorithm {
        Algorithm::Auto if metric.is_tree_capable() => Algorithm::KdTree,
        Algorithm::Auto => Algorithm::Brute,
        Algorithm::KdTree if !metric.is_tree_capable() => {
            return Err(Error::UnsupportedMetric {
                metric: metric.name(),
                algorithm: Algorithm::KdTree.name(),
            });
        }
        algorithm => algorithm,
    };
    debug!("building {} index with {} distance", algorithm, metric.name());

    let index: Box<dyn Neighborhood<T>> = match (algorithm, metric) {
        (Algorithm::KdTree, MetricKind::Manhattan) => {
            Box::new(KdTree::with_options(Taxicab, entries, options)?)
        }
        (Algorithm::KdTree, MetricKind::Euclidean) => {
            Box::new(KdTree::with_options(Euclidean, entries, options)?)
        }
        (Algorithm::KdTree, MetricKind::Chebyshev) => {
            Box::new(KdTree::with_options(Chebyshev, entries, options)?)
        }
        (Algorithm::KdTree, MetricKind::Minkowski(minkowski)) => {
            Box::new(KdTree::with_options(minkowski, entries, options)?)
        }
        (_, metric) => Box::new(BruteNeighborhood::new(metric, entries)),
    };
    Ok(index)
}
