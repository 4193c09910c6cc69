//! Tests on the well-separated pair decomposition.

use spanner_clustering::{separation_factor, PointSet, Region, Tree, Wspd};

mod utils;

#[test]
fn every_point_pair_is_covered_exactly_once() {
    let cardinality = 50;
    let set = utils::gen_point_set(cardinality, 3, 42);
    let tree = Tree::new(&set);
    let wspd = Wspd::new(tree, separation_factor(2.0).unwrap()).unwrap();

    let mut covered = vec![vec![0_usize; cardinality]; cardinality];
    for pair in wspd.pairs() {
        for &p in wspd.tree().cell(pair.left).points() {
            for &q in wspd.tree().cell(pair.right).points() {
                covered[p][q] += 1;
                covered[q][p] += 1;
            }
        }
    }

    for (p, row) in covered.iter().enumerate() {
        for (q, &count) in row.iter().enumerate() {
            if p == q {
                assert_eq!(count, 0, "pair ({p}, {q}) must not be covered");
            } else {
                assert_eq!(count, 1, "pair ({p}, {q}) covered {count} times");
            }
        }
    }
}

#[test]
fn recorded_pairs_are_well_separated() {
    let set = utils::gen_point_set(80, 2, 7);
    let tree = Tree::new(&set);
    let sep = separation_factor(2.0).unwrap();
    let wspd = Wspd::new(tree, sep).unwrap();

    assert!(!wspd.pairs().is_empty());
    for pair in wspd.pairs() {
        let u = wspd.tree().cell(pair.left);
        let v = wspd.tree().cell(pair.right);
        assert!(u.dist(v) >= sep * u.radius().max(v.radius()));
        assert!(wspd.well_separated(u, v));
    }
}

#[test]
fn endpoints_are_marked() {
    let set = utils::gen_point_set(30, 2, 3);
    let tree = Tree::new(&set);
    let wspd = Wspd::new(tree, separation_factor(2.0).unwrap()).unwrap();

    for pair in wspd.pairs() {
        assert!(wspd.tree().cell(pair.left).is_in_pair());
        assert!(wspd.tree().cell(pair.right).is_in_pair());
    }
    // the root is never a pair endpoint
    assert!(!wspd.tree().cell(wspd.tree().root()).is_in_pair());
}

#[test]
fn collinear_triple_decomposes_into_two_pairs() {
    let points = vec![vec![0.0], vec![1.0], vec![10.0]];
    let set = PointSet::new(1, points, vec![0, 1, 2]).unwrap();
    let tree = Tree::new(&set);
    let wspd = Wspd::new(tree, separation_factor(2.0).unwrap()).unwrap();

    // {0, 1} vs {10}, then {0} vs {1}
    assert_eq!(wspd.pairs().len(), 2);
    let first = wspd.pairs()[0];
    assert_eq!(wspd.tree().cell(first.left).points(), &[0, 1]);
    assert_eq!(wspd.tree().cell(first.right).points(), &[2]);
}

#[test]
fn two_far_triples_decompose_coarsely_first() {
    let set = PointSet::new(2, utils::two_far_triples(), (0..6).collect()).unwrap();
    let tree = Tree::new(&set);
    let wspd = Wspd::new(tree, separation_factor(2.0).unwrap()).unwrap();

    // one triple-vs-triple pair, then three singleton pairs per side
    assert_eq!(wspd.pairs().len(), 7);
    let first = wspd.pairs()[0];
    assert_eq!(wspd.tree().cell(first.left).cardinality(), 3);
    assert_eq!(wspd.tree().cell(first.right).cardinality(), 3);
}

#[test]
fn duplicate_points_terminate() {
    // The duplicate pair shares a radius-zero leaf, which is never split.
    let points = vec![vec![0.0], vec![0.0], vec![1.0]];
    let set = PointSet::new(1, points, vec![0, 1, 2]).unwrap();
    let tree = Tree::new(&set);
    let wspd = Wspd::new(tree, separation_factor(2.0).unwrap()).unwrap();

    assert_eq!(wspd.pairs().len(), 1);
}

#[test]
fn single_point_has_no_pairs() {
    let set = PointSet::new(2, vec![vec![0.0, 0.0]], vec![0]).unwrap();
    let tree = Tree::new(&set);
    let wspd = Wspd::new(tree, separation_factor(2.0).unwrap()).unwrap();

    assert!(wspd.pairs().is_empty());
}
