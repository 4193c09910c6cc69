#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

mod core;
mod error;
pub(crate) mod utils;

use serde::{Deserialize, Serialize};

pub use crate::{
    core::{
        cluster::Clustering,
        dataset::PointSet,
        graph::{Builder, Edge, Spanner},
        tree::{seq_split, Cell, CellIndex, Region, Tree},
        wspd::{separation_factor, well_separated, Pair, Wspd},
    },
    error::SpannerError,
};

/// The current version of the crate.
pub const VERSION: &str = "0.1.0";

/// The observable output of the full pipeline.
///
/// This is the record a binding layer marshals out: the spanner edges in
/// decomposition order, the per-point cluster ids, and the cluster count.
/// Intermediate structures (the tree, the decomposition) are all dropped
/// before this value is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteredSpanner {
    /// The spanner edges, ordered by pair enumeration order.
    pub edges: Vec<Edge>,
    /// For each point, the id of its cluster, in `[0, number_of_clusters)`.
    pub membership: Vec<usize>,
    /// The number of distinct clusters.
    pub number_of_clusters: usize,
}

/// Runs the full pipeline: point set, fair-split tree, decomposition,
/// spanner edges, clustering.
///
/// # Arguments
///
/// * `dim`: the dimensionality of the points.
/// * `points`: the coordinates, one row of `dim` values per point.
/// * `stretch`: the spanner approximation factor `t`; must be finite and
///   greater than 1.
///
/// # Errors
///
/// * `EmptyInput` if `dim` is 0 or `points` is empty.
/// * `InvalidShape` if any row does not have exactly `dim` coordinates.
/// * `NonFinite` if any coordinate is NaN or infinite.
/// * `InvalidStretch` if `stretch` is not a finite value greater than 1.
/// * `Internal` if a structural invariant is violated while building.
pub fn build_spanner_and_clusters(
    dim: usize,
    points: Vec<Vec<f64>>,
    stretch: f64,
) -> Result<ClusteredSpanner, SpannerError> {
    let infos = (0..points.len()).collect::<Vec<_>>();
    let set = PointSet::new(dim, points, infos)?;
    let sep = separation_factor(stretch)?;

    let tree = Tree::new(&set);
    let mut wspd = Wspd::new(tree, sep)?;

    let spanner = Builder::new(&set, &wspd).build();
    let clustering = Clustering::new(&set, &mut wspd)?;

    let number_of_clusters = clustering.number_of_clusters();
    Ok(ClusteredSpanner {
        edges: spanner.into_edges(),
        membership: clustering.into_membership(),
        number_of_clusters,
    })
}
