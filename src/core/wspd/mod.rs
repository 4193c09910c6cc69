//! The well-separated pair decomposition of a fair-split tree.

use crate::{
    core::tree::{CellIndex, Region, Tree},
    error::SpannerError,
};

/// Computes the separation factor `4(t+1)/(t-1)` for a stretch factor `t`.
///
/// This is the separation at which picking one representative pair of
/// points per decomposition pair yields a t-spanner.
///
/// # Errors
///
/// `InvalidStretch` if `stretch` is not a finite value greater than 1.
pub fn separation_factor(stretch: f64) -> Result<f64, SpannerError> {
    if stretch.is_finite() && stretch > 1.0 {
        Ok(4.0 * (stretch + 1.0) / (stretch - 1.0))
    } else {
        Err(SpannerError::InvalidStretch(stretch))
    }
}

/// Whether two regions are separated by at least `sep` times the larger of
/// their radii.
pub fn well_separated(b1: &dyn Region, b2: &dyn Region, sep: f64) -> bool {
    b1.dist(b2) >= sep * b1.radius().max(b2.radius())
}

/// One unordered pair of the decomposition.
///
/// The stored orientation is the discovery orientation; semantically the
/// pair is unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    /// One endpoint of the pair.
    pub left: CellIndex,
    /// The other endpoint of the pair.
    pub right: CellIndex,
}

/// A well-separated pair decomposition.
///
/// Owns the split tree it decomposes. The recorded pairs jointly cover
/// every unordered pair of distinct points exactly once, and every
/// recorded pair satisfies the separation test. Recording a pair marks
/// both of its endpoints `is_in_pair`, which is what the clusterer later
/// reads to find its heads.
#[derive(Debug)]
pub struct Wspd {
    /// The fair-split tree being decomposed.
    tree: Tree,
    /// The separation factor.
    sep: f64,
    /// The recorded pairs, in discovery order.
    pairs: Vec<Pair>,
}

impl Wspd {
    /// Decomposes `tree` with separation factor `sep`.
    ///
    /// # Errors
    ///
    /// `Internal` if the recursion is forced into a cell that can not be
    /// split further; this cannot happen for a tree built by [`Tree`]'s
    /// splitters and indicates a structural bug.
    pub fn new(tree: Tree, sep: f64) -> Result<Self, SpannerError> {
        let mut wspd = Self {
            tree,
            sep,
            pairs: Vec::new(),
        };
        let root = wspd.tree.root();
        wspd.decompose(root)?;
        log::debug!("decomposition: {} pairs at separation {}", wspd.pairs.len(), wspd.sep);
        Ok(wspd)
    }

    /// The fair-split tree being decomposed.
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the tree, for the clusterer's back-references.
    pub(crate) fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The separation factor.
    pub const fn sep(&self) -> f64 {
        self.sep
    }

    /// The recorded pairs, in discovery order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Whether two regions are separated by at least this decomposition's
    /// factor times the larger of their radii.
    pub fn well_separated(&self, b1: &dyn Region, b2: &dyn Region) -> bool {
        well_separated(b1, b2, self.sep)
    }

    /// Records `(b1, b2)` as a pair and marks both endpoints.
    fn add_pair(&mut self, b1: CellIndex, b2: CellIndex) {
        self.pairs.push(Pair { left: b1, right: b2 });
        self.tree.cell_mut(b1).is_in_pair = true;
        self.tree.cell_mut(b2).is_in_pair = true;
    }

    /// Covers every point pair spanning `b1` and `b2`: records the pair if
    /// the two cells are well-separated, otherwise splits the cell with
    /// the larger widest-dimension extent (ties keep the current
    /// orientation) and recurses.
    fn find_pairs(&mut self, mut b1: CellIndex, mut b2: CellIndex) -> Result<(), SpannerError> {
        if self.well_separated(self.tree.cell(b1), self.tree.cell(b2)) {
            self.add_pair(b1, b2);
            return Ok(());
        }
        let s1 = {
            let cell = self.tree.cell(b1);
            cell.sizes()[cell.widest_dim()]
        };
        let s2 = {
            let cell = self.tree.cell(b2);
            cell.sizes()[cell.widest_dim()]
        };
        if s1 > s2 {
            std::mem::swap(&mut b1, &mut b2);
        }
        let (left, right) = self.tree.cell(b2).children().ok_or_else(|| {
            SpannerError::Internal(format!(
                "cell {} is not well-separated from cell {} but has no children to recurse into",
                self.tree.cell(b2).id(),
                self.tree.cell(b1).id(),
            ))
        })?;
        self.find_pairs(b1, left)?;
        self.find_pairs(b1, right)
    }

    /// Decomposes the subtree rooted at `n`, pre-order.
    fn decompose(&mut self, n: CellIndex) -> Result<(), SpannerError> {
        let Some((left, right)) = self.tree.cell(n).children() else {
            return Ok(());
        };
        self.find_pairs(left, right)?;
        self.decompose(left)?;
        self.decompose(right)
    }
}
