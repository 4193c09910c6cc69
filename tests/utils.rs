#![allow(dead_code)]

//! Utility functions for tests.

use spanner_clustering::{Edge, PointSet};

/// Euclidean distance between two points.
pub fn euclidean(x: &[f64], y: &[f64]) -> f64 {
    distances::vectors::euclidean(x, y)
}

/// Generate random points with the given cardinality and dimensionality.
pub fn gen_points(cardinality: usize, dimensionality: usize, seed: u64) -> Vec<Vec<f64>> {
    symagen::random_data::random_tabular_seedable::<f64>(cardinality, dimensionality, -1.0, 1.0, seed)
}

/// Generate a `PointSet` of random points, with indices as payloads.
pub fn gen_point_set(cardinality: usize, dimensionality: usize, seed: u64) -> PointSet<usize> {
    let points = gen_points(cardinality, dimensionality, seed);
    PointSet::new(dimensionality, points, (0..cardinality).collect()).unwrap()
}

/// All-pairs shortest path distances along the given edges.
pub fn shortest_paths(order: usize, edges: &[Edge]) -> Vec<Vec<f64>> {
    let mut dist = vec![vec![f64::INFINITY; order]; order];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for e in edges {
        let (u, v) = (e.src as usize, e.dst as usize);
        if e.dist < dist[u][v] {
            dist[u][v] = e.dist;
            dist[v][u] = e.dist;
        }
    }
    for k in 0..order {
        for i in 0..order {
            for j in 0..order {
                let via = dist[i][k] + dist[k][j];
                if via < dist[i][j] {
                    dist[i][j] = via;
                }
            }
        }
    }
    dist
}

/// The four corners of the unit square.
pub fn unit_square() -> Vec<Vec<f64>> {
    vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]
}

/// Two tight triples of points far apart from each other.
pub fn two_far_triples() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![0.1, 0.0],
        vec![0.0, 0.1],
        vec![100.0, 100.0],
        vec![100.1, 100.0],
        vec![100.0, 100.1],
    ]
}
