//! Builds the spanner edges from the decomposition.

use crate::core::{dataset::PointSet, wspd::Wspd};

use super::{Edge, Spanner};

/// Turns each decomposition pair into one spanner edge by drawing one
/// representative point from each side.
///
/// Representatives are drawn round-robin through each cell's own cursor,
/// which spreads edges across the points of cells that appear in many
/// pairs. The cursors are rewound when a build starts, so they are scoped
/// to that build.
pub struct Builder<'a, M> {
    /// The point set, for edge distances.
    set: &'a PointSet<M>,
    /// The decomposition whose pairs become edges.
    wspd: &'a Wspd,
}

impl<'a, M> Builder<'a, M> {
    /// Creates a new `Builder` over a point set and its decomposition.
    pub const fn new(set: &'a PointSet<M>, wspd: &'a Wspd) -> Self {
        Self { set, wspd }
    }

    /// Emits one edge per pair, in pair enumeration order.
    ///
    /// Distinct pairs may select the same endpoints; the duplicate edges
    /// are preserved.
    #[must_use]
    pub fn build(&self) -> Spanner {
        let tree = self.wspd.tree();
        for cell in tree.cells() {
            cell.reset_cursor();
        }

        let mut edges = Vec::with_capacity(self.wspd.pairs().len());
        for pair in self.wspd.pairs() {
            let p = tree.cell(pair.left).next_point();
            let q = tree.cell(pair.right).next_point();
            #[allow(clippy::cast_possible_truncation)]
            let edge = Edge::new(p as u32, q as u32, self.set.dist(p, q));
            edges.push(edge);
        }
        Spanner::new(self.set.cardinality(), edges)
    }
}
