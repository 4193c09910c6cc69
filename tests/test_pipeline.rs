//! End-to-end tests of the public pipeline: validation, determinism, and
//! the text output writers.

use std::fs;

use tempdir::TempDir;

use spanner_clustering::{
    build_spanner_and_clusters, separation_factor, Builder, Clustering, PointSet, SpannerError,
    Tree, Wspd,
};

mod utils;

#[test]
fn rejects_invalid_stretch() {
    let points = vec![vec![0.0], vec![1.0]];

    for stretch in [1.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
        let err = build_spanner_and_clusters(1, points.clone(), stretch).unwrap_err();
        assert!(matches!(err, SpannerError::InvalidStretch(_)), "stretch {stretch}");
    }
}

#[test]
fn rejects_empty_input() {
    assert_eq!(
        build_spanner_and_clusters(2, vec![], 2.0).unwrap_err(),
        SpannerError::EmptyInput
    );
    assert_eq!(
        build_spanner_and_clusters(0, vec![vec![]], 2.0).unwrap_err(),
        SpannerError::EmptyInput
    );
}

#[test]
fn rejects_ragged_rows() {
    let err = build_spanner_and_clusters(2, vec![vec![0.0, 0.0], vec![1.0]], 2.0).unwrap_err();
    assert!(matches!(err, SpannerError::InvalidShape(_)));
}

#[test]
fn rejects_non_finite_coordinates() {
    let err = build_spanner_and_clusters(2, vec![vec![0.0, f64::NEG_INFINITY]], 2.0).unwrap_err();
    assert_eq!(err, SpannerError::NonFinite { index: 0, dim: 1 });
}

#[test]
fn single_point_output() {
    let out = build_spanner_and_clusters(2, vec![vec![3.0, 4.0]], 2.0).unwrap();

    assert!(out.edges.is_empty());
    assert_eq!(out.membership, vec![0]);
    assert_eq!(out.number_of_clusters, 1);
}

#[test]
fn identical_inputs_produce_identical_outputs() {
    let points = utils::gen_points(120, 4, 99);
    let one = build_spanner_and_clusters(4, points.clone(), 1.5).unwrap();
    let two = build_spanner_and_clusters(4, points, 1.5).unwrap();

    assert_eq!(one.edges, two.edges);
    assert_eq!(one.membership, two.membership);
    assert_eq!(one.number_of_clusters, two.number_of_clusters);
}

#[test]
fn output_survives_serialization() {
    let out = build_spanner_and_clusters(1, vec![vec![0.0], vec![1.0], vec![10.0]], 2.0).unwrap();

    let json = serde_json::to_string(&out).unwrap();
    let back: spanner_clustering::ClusteredSpanner = serde_json::from_str(&json).unwrap();
    assert_eq!(out, back);
}

#[test]
fn writes_edge_csv() {
    let set = PointSet::new(1, vec![vec![0.0], vec![1.0], vec![10.0]], vec![0, 1, 2]).unwrap();
    let wspd = Wspd::new(Tree::new(&set), separation_factor(2.0).unwrap()).unwrap();
    let spanner = Builder::new(&set, &wspd).build();

    let dir = TempDir::new("edge_csv").unwrap();
    let path = dir.path().join("edges.csv");
    spanner.write_edges_csv(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "Source,Target,Distance,Weight,type\n0,2,10,0.01,undirected\n0,1,1,1,undirected\n"
    );
}

#[test]
fn writes_membership_csv() {
    let set = PointSet::new(
        1,
        vec![vec![0.0], vec![1.0], vec![10.0]],
        vec!["a", "b", "c"],
    )
    .unwrap();
    let mut wspd = Wspd::new(Tree::new(&set), separation_factor(2.0).unwrap()).unwrap();
    let clustering = Clustering::new(&set, &mut wspd).unwrap();

    let dir = TempDir::new("membership_csv").unwrap();
    let path = dir.path().join("membership.csv");
    clustering
        .write_membership_csv(&set, &path, |info| (*info).to_string())
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "Id,Label,Cluster\n0,a,0\n1,b,0\n2,c,1\n");
}

#[test]
fn writes_dot() {
    let set = PointSet::new(1, vec![vec![0.0], vec![1.0], vec![10.0]], vec![0, 1, 2]).unwrap();
    let mut wspd = Wspd::new(Tree::new(&set), separation_factor(2.0).unwrap()).unwrap();
    let spanner = Builder::new(&set, &wspd).build();
    let clustering = Clustering::new(&set, &mut wspd).unwrap();

    let dir = TempDir::new("dot").unwrap();
    let path = dir.path().join("spanner.dot");
    spanner.write_dot(clustering.membership(), &path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let expected = "graph {\n  vert0 [label=0 cluster=0];\n  vert1 [label=1 cluster=0];\n  vert2 [label=2 cluster=1];\n  vert0 -- vert2 [weight=0.01 dist=10];\n  vert0 -- vert1 [weight=1 dist=1];\n}\n";
    assert_eq!(contents, expected);
}

#[test]
fn stages_compose_like_the_pipeline() {
    let points = utils::gen_points(50, 2, 5);
    let set = PointSet::new(2, points.clone(), (0..50).collect()).unwrap();
    let mut wspd = Wspd::new(Tree::new(&set), separation_factor(3.0).unwrap()).unwrap();
    let spanner = Builder::new(&set, &wspd).build();
    let clustering = Clustering::new(&set, &mut wspd).unwrap();

    let out = build_spanner_and_clusters(2, points, 3.0).unwrap();
    assert_eq!(out.edges, spanner.edges());
    assert_eq!(out.membership, clustering.membership());
    assert_eq!(out.number_of_clusters, clustering.number_of_clusters());
}
