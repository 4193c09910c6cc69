//! Clustering of a point set from the structure of its decomposition.

mod union_find;

use std::{collections::HashMap, fs::File, io::Write, path::Path};

use crate::{
    core::{
        dataset::PointSet,
        tree::{CellIndex, Tree},
        wspd::{well_separated, Wspd},
    },
    error::SpannerError,
};

use union_find::UnionFind;

/// A clustering of a point set, derived from which tree cells the
/// decomposition recorded as pair endpoints.
///
/// Runs in three phases: find the heads (the topmost cells marked
/// `is_in_pair`, which form an antichain partitioning the points), merge
/// every pair of heads that is not well-separated, and assign each point
/// the dense id of its head's merged component.
#[derive(Debug)]
pub struct Clustering {
    /// The heads, in discovery order (pre-order over the tree).
    heads: Vec<CellIndex>,
    /// For each point, the id of its cluster.
    membership: Vec<usize>,
    /// The number of distinct clusters.
    number_of_clusters: usize,
    /// The mean radius over heads with positive radius; 0 if there are
    /// none.
    avg_radius: f64,
}

impl Clustering {
    /// Clusters `set` from the decomposition `wspd`.
    ///
    /// Sets `cluster_parent` on every cell of each head's subtree, which
    /// is why the decomposition is borrowed mutably.
    ///
    /// # Errors
    ///
    /// `Internal` if some leaf is covered by no head. The decomposition
    /// covers every point pair, so this cannot happen for `N > 1`; for a
    /// single point the childless root becomes the sole head.
    pub fn new<M>(set: &PointSet<M>, wspd: &mut Wspd) -> Result<Self, SpannerError> {
        let sep = wspd.sep();
        let tree = wspd.tree_mut();

        let mut heads = Vec::new();
        let mut radius_sum = 0.0;
        let mut positive = 0_usize;
        let root = tree.root();
        Self::find_heads(tree, root, &mut heads, &mut radius_sum, &mut positive)?;
        #[allow(clippy::cast_precision_loss)]
        let avg_radius = if positive > 0 { radius_sum / positive as f64 } else { 0.0 };

        let mut forest = UnionFind::new(heads.len());
        let mut number_of_clusters = heads.len();
        for i in 0..heads.len() {
            for j in (i + 1)..heads.len() {
                if !well_separated(tree.cell(heads[i]), tree.cell(heads[j]), sep) && forest.union(i, j) {
                    number_of_clusters -= 1;
                }
            }
        }

        let mut membership = vec![0_usize; set.cardinality()];
        let mut canonical = HashMap::new();
        for (h, &head) in heads.iter().enumerate() {
            let root = forest.find(h);
            let next = canonical.len();
            let id = *canonical.entry(root).or_insert(next);
            for &p in tree.cell(head).points() {
                membership[p] = id;
            }
        }
        debug_assert_eq!(canonical.len(), number_of_clusters);
        log::debug!("clustering: {} heads merged into {number_of_clusters} clusters", heads.len());

        Ok(Self {
            heads,
            membership,
            number_of_clusters,
            avg_radius,
        })
    }

    /// The heads, in discovery order.
    pub fn heads(&self) -> &[CellIndex] {
        &self.heads
    }

    /// For each point, the id of its cluster, in
    /// `[0, number_of_clusters)`.
    pub fn membership(&self) -> &[usize] {
        &self.membership
    }

    /// The number of distinct clusters.
    pub const fn number_of_clusters(&self) -> usize {
        self.number_of_clusters
    }

    /// The mean radius over heads with positive radius; 0 if every head is
    /// a single point. This is the stand-in radius the alternative
    /// `close_to` merge predicate uses for point-sized heads.
    pub const fn avg_radius(&self) -> f64 {
        self.avg_radius
    }

    /// Consumes the clustering, returning the membership vector.
    #[must_use]
    pub fn into_membership(self) -> Vec<usize> {
        self.membership
    }

    /// Writes the membership as CSV with header `Id,Label,Cluster`, one
    /// row per point labeled through `label`.
    ///
    /// # Errors
    ///
    /// If the file cannot be created or written to.
    pub fn write_membership_csv<M, P, F>(&self, set: &PointSet<M>, path: &P, label: F) -> std::io::Result<()>
    where
        P: AsRef<Path>,
        F: Fn(&M) -> String,
    {
        let mut file = File::create(path)?;
        writeln!(file, "Id,Label,Cluster")?;
        for (i, cluster) in self.membership.iter().enumerate() {
            writeln!(file, "{i},{},{cluster}", label(set.info(i)))?;
        }
        Ok(())
    }

    /// Finds the heads below `index`, top-down: a cell that is a pair
    /// endpoint is a head and its subtree is not descended into, so heads
    /// form an antichain. Each head is assigned as `cluster_parent` of its
    /// whole subtree.
    fn find_heads(
        tree: &mut Tree,
        index: CellIndex,
        heads: &mut Vec<CellIndex>,
        radius_sum: &mut f64,
        positive: &mut usize,
    ) -> Result<(), SpannerError> {
        let cell = tree.cell(index);
        // A childless root means a single-point input: no pairs exist, so
        // the root is the one head covering everything.
        if cell.is_in_pair() || (index == tree.root() && cell.is_leaf()) {
            let radius = cell.radius();
            *radius_sum += radius;
            if radius > 0.0 {
                *positive += 1;
            }
            heads.push(index);
            Self::assign_parent(tree, index, index);
            return Ok(());
        }
        let (left, right) = tree.cell(index).children().ok_or_else(|| {
            SpannerError::Internal(format!(
                "leaf cell {} is not covered by any well-separated pair",
                tree.cell(index).id()
            ))
        })?;
        Self::find_heads(tree, left, heads, radius_sum, positive)?;
        Self::find_heads(tree, right, heads, radius_sum, positive)
    }

    /// Sets `head` as the `cluster_parent` of `n`'s whole subtree,
    /// including `n` itself.
    fn assign_parent(tree: &mut Tree, n: CellIndex, head: CellIndex) {
        let mut stack = vec![n];
        while let Some(index) = stack.pop() {
            tree.cell_mut(index).cluster_parent = Some(head);
            if let Some((left, right)) = tree.cell(index).children() {
                stack.push(left);
                stack.push(right);
            }
        }
    }
}
