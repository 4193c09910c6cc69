//! Provides the `Spanner` graph and its `Edge`s.

use std::{fs::File, io::Write, path::Path};

use serde::{Deserialize, Serialize};

/// An undirected spanner edge between two points, weighted by their
/// Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// The smaller endpoint.
    pub src: u32,
    /// The larger endpoint.
    pub dst: u32,
    /// The Euclidean distance between the two endpoints.
    pub dist: f64,
}

impl Edge {
    /// Creates a new `Edge`, normalizing the endpoints so that
    /// `src < dst`.
    #[must_use]
    pub const fn new(u: u32, v: u32, dist: f64) -> Self {
        if v < u {
            Self { src: v, dst: u, dist }
        } else {
            Self { src: u, dst: v, dist }
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} -- {}", self.src, self.dst)
    }
}

/// A t-spanner over a point set.
///
/// Holds one edge per decomposition pair, in pair enumeration order.
/// The edge list is a multiset: two pairs may select the same endpoints,
/// and both edges are kept.
#[derive(Debug, Clone)]
pub struct Spanner {
    /// The number of vertices, i.e. the cardinality of the point set.
    order: usize,
    /// The edges, in pair enumeration order.
    edges: Vec<Edge>,
}

impl Spanner {
    /// Creates a new `Spanner` from its parts.
    pub(crate) const fn new(order: usize, edges: Vec<Edge>) -> Self {
        Self { order, edges }
    }

    /// The number of vertices.
    pub const fn order(&self) -> usize {
        self.order
    }

    /// The edges, in pair enumeration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The number of edges.
    pub fn edge_cardinality(&self) -> usize {
        self.edges.len()
    }

    /// Consumes the spanner, returning its edges.
    #[must_use]
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Writes the edge list as CSV with header
    /// `Source,Target,Distance,Weight,type`, one `undirected` row per edge
    /// weighted by inverse squared distance.
    ///
    /// # Errors
    ///
    /// If the file cannot be created or written to.
    pub fn write_edges_csv<P: AsRef<Path>>(&self, path: &P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "Source,Target,Distance,Weight,type")?;
        for e in &self.edges {
            let weight = 1.0 / (e.dist * e.dist);
            writeln!(file, "{},{},{},{weight},undirected", e.src, e.dst, e.dist)?;
        }
        Ok(())
    }

    /// Writes the graph in DOT form: one `vert<i>` line per vertex labeled
    /// with its index and cluster, then one undirected edge line per edge.
    ///
    /// # Errors
    ///
    /// If the file cannot be created or written to.
    pub fn write_dot<P: AsRef<Path>>(&self, membership: &[usize], path: &P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "graph {{")?;
        for (i, cluster) in membership.iter().enumerate() {
            writeln!(file, "  vert{i} [label={i} cluster={cluster}];")?;
        }
        for e in &self.edges {
            let weight = 1.0 / (e.dist * e.dist);
            writeln!(file, "  vert{} -- vert{} [weight={weight} dist={}];", e.src, e.dst, e.dist)?;
        }
        writeln!(file, "}}")
    }
}
