//! Every index answers the same queries with the same distances.

use approx::assert_relative_eq;
use knear::{
    build, Algorithm, BoxMetric, BruteNeighborhood, Chebyshev, Euclidean, KdOptions, KdTree,
    Matrix, MetricKind, Minkowski, Neighborhood, SplitAxis, Taxicab, Traversal, Value,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_points<T: Value>(rows: usize, dims: usize, seed: u64) -> Matrix<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = (0..rows * dims)
        .map(|_| T::from(rng.random_range(-10.0..10.0)).unwrap())
        .collect();
    Matrix::new(rows, dims, data).unwrap()
}

/// Points on a few tight clusters, with many near-duplicates.
fn clustered_points(rows: usize, dims: usize, seed: u64) -> Matrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let centers: Vec<Vec<f64>> = (0..4)
        .map(|_| (0..dims).map(|_| rng.random_range(-100.0..100.0)).collect())
        .collect();

    let mut data = Vec::with_capacity(rows * dims);
    for _ in 0..rows {
        let center = &centers[rng.random_range(0..centers.len())];
        data.extend(center.iter().map(|c| c + rng.random_range(-0.01..0.01)));
    }
    Matrix::new(rows, dims, data).unwrap()
}

fn all_options() -> Vec<KdOptions> {
    let mut options = Vec::new();
    for split in [SplitAxis::MaxSpread, SplitAxis::RoundRobin] {
        for traversal in [Traversal::DepthFirst, Traversal::BestFirst] {
            for leaf_size in [2, 5, 40] {
                options.push(
                    KdOptions::default()
                        .split(split)
                        .traversal(traversal)
                        .leaf_size(leaf_size),
                );
            }
        }
    }
    options
}

fn assert_same_distances<T, A, B>(expected: &A, actual: &B, k: usize, queries: &Matrix<T>)
where
    T: Value + approx::RelativeEq<Epsilon = T>,
    A: Neighborhood<T>,
    B: Neighborhood<T>,
{
    let expected = expected.k_nearest(k, queries).unwrap();
    let actual = actual.k_nearest(k, queries).unwrap();
    assert_eq!(expected.k(), actual.k());

    for q in 0..queries.rows() {
        for (e, a) in expected.row(q).zip(actual.row(q)) {
            assert_relative_eq!(e.distance, a.distance);
        }
    }
}

fn check_metric<M>(metric: M)
where
    M: BoxMetric<f64> + Clone + 'static,
{
    for (seed, entries) in [
        (1, random_points::<f64>(500, 3, 1)),
        (2, clustered_points(500, 4, 2)),
    ] {
        let queries = random_points(30, entries.cols(), seed + 10);
        let brute = BruteNeighborhood::new(metric.clone(), entries.clone());

        for options in all_options() {
            let tree = KdTree::with_options(metric.clone(), entries.clone(), options).unwrap();
            for k in [1, 7, 600] {
                assert_same_distances(&brute, &tree, k, &queries);
            }
        }
    }
}

#[test]
fn test_taxicab() {
    check_metric(Taxicab);
}

#[test]
fn test_euclidean() {
    check_metric(Euclidean);
}

#[test]
fn test_chebyshev() {
    check_metric(Chebyshev);
}

#[test]
fn test_minkowski() {
    check_metric(Minkowski::new(1.5).unwrap());
    check_metric(Minkowski::new(4.0).unwrap());
}

#[test]
fn test_f32() {
    let entries = random_points::<f32>(1000, 5, 3);
    let queries = random_points::<f32>(50, 5, 4);

    let brute = BruteNeighborhood::new(Euclidean, entries.clone());
    for options in all_options() {
        let tree = KdTree::with_options(Euclidean, entries.clone(), options).unwrap();
        assert_same_distances(&brute, &tree, 10, &queries);
    }
}

#[test]
fn test_batch_matches_single() {
    let entries = random_points::<f64>(2000, 3, 5);
    let queries = random_points::<f64>(200, 3, 6);
    let tree = KdTree::new(Euclidean, entries).unwrap();

    let batch = tree.k_nearest(4, &queries).unwrap();
    assert_eq!(batch.len(), 200);
    for (q, query) in queries.rows_iter().enumerate() {
        let single = tree.k_nearest_to(4, query).unwrap();
        assert_eq!(batch.row(q).collect::<Vec<_>>(), single);
    }
}

#[test]
fn test_within() {
    let entries = random_points::<f64>(1000, 2, 7);
    let queries = random_points::<f64>(40, 2, 8);
    let brute = BruteNeighborhood::new(Chebyshev, entries.clone());
    let tree = KdTree::new(Chebyshev, entries).unwrap();

    for query in queries.rows_iter() {
        for radius in [0.0, 0.5, 2.0] {
            let expected = brute.k_nearest_within(25, query, radius).unwrap();
            let actual = tree.k_nearest_within(25, query, radius).unwrap();
            assert_eq!(expected.len(), actual.len());
            for (e, a) in expected.iter().zip(&actual) {
                assert_relative_eq!(e.distance, a.distance);
                assert!(a.distance <= radius);
            }
        }

        assert!(tree.k_nearest_within(5, query, -1.0).unwrap().is_empty());
    }
}

#[test]
fn test_reproducible() {
    let entries = random_points::<f64>(777, 3, 9);
    let options = KdOptions::default().seed(42).leaf_size(4);

    let a = KdTree::with_options(Euclidean, entries.clone(), options).unwrap();
    let b = KdTree::with_options(Euclidean, entries, options).unwrap();
    assert_eq!(a.permutation(), b.permutation());
}

#[test]
fn test_build_by_name() {
    let entries = random_points::<f64>(400, 3, 10);
    let queries = random_points::<f64>(20, 3, 11);

    for name in ["cityblock", "l2", "linf", "minkowski:3", "cosine", "angular"] {
        let metric: MetricKind<f64> = name.parse().unwrap();
        let options = KdOptions::default();

        let auto = build(Algorithm::Auto, metric, entries.clone(), options).unwrap();
        let brute = build(Algorithm::Brute, metric, entries.clone(), options).unwrap();
        assert_same_distances(&brute, &auto, 5, &queries);

        let kd = build(Algorithm::KdTree, metric, entries.clone(), options);
        assert_eq!(kd.is_ok(), metric.is_tree_capable(), "{name}");
    }
}
