//! A `Cell` is one box of the fair-split tree.

use std::sync::atomic::{AtomicUsize, Ordering};

use distances::vectors::euclidean;

use crate::{core::dataset::PointSet, utils};

/// A handle to a `Cell` within its owning `Tree`'s arena.
///
/// Handles are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex(pub(crate) usize);

/// The minimal box-like interface the decomposition needs.
///
/// Tree cells and the whole `PointSet` both satisfy it, as may any external
/// box representation a caller wants to test for separation.
pub trait Region {
    /// The center of the bounding box.
    fn center(&self) -> &[f64];

    /// The componentwise extents of the bounding box.
    fn sizes(&self) -> &[f64];

    /// Half the diagonal of the bounding box; 0 for a single point.
    fn radius(&self) -> f64;

    /// The distance between two regions: the distance between their
    /// centers minus both radii. Negative when the bounding spheres
    /// overlap.
    fn dist(&self, other: &dyn Region) -> f64 {
        euclidean::<f64, f64>(self.center(), other.center()) - self.radius() - other.radius()
    }

    /// The index of the widest dimension, earliest on ties.
    fn widest_dim(&self) -> usize {
        utils::arg_max(self.sizes()).unwrap_or(0)
    }
}

/// One node of the fair-split tree: an axis-aligned box together with the
/// points it contains and their per-dimension orderings.
#[derive(Debug)]
pub struct Cell {
    /// The id of the cell, unique within its tree; assigned in allocation
    /// order, with the root having id 1.
    pub(crate) id: usize,
    /// The indices of the points contained in this cell.
    pub(crate) points: Vec<usize>,
    /// For each dimension, this cell's points sorted by that coordinate.
    pub(crate) dimensions: Vec<Vec<usize>>,
    /// The componentwise minima of the cell's box.
    pub(crate) low: Vec<f64>,
    /// The componentwise maxima of the cell's box.
    pub(crate) upper: Vec<f64>,
    /// `upper - low`, componentwise.
    pub(crate) sizes: Vec<f64>,
    /// The center of the cell's box.
    pub(crate) center: Vec<f64>,
    /// Half the diagonal of the cell's box; 0 for a single point.
    pub(crate) radius: f64,
    /// The children of the cell, if it was split.
    pub(crate) children: Option<(CellIndex, CellIndex)>,
    /// Whether the decomposition recorded this cell as a pair endpoint.
    pub(crate) is_in_pair: bool,
    /// The head cell whose subtree contains this cell, set during
    /// clustering. A back-reference, so it cannot create ownership cycles.
    pub(crate) cluster_parent: Option<CellIndex>,
    /// Round-robin cursor for representative selection. This is the one
    /// intentionally shared mutable field on a cell: it is atomic so
    /// concurrent representative selection from the same cell is safe.
    pub(crate) next_point: AtomicUsize,
}

impl Cell {
    /// An empty cell with the given id for a `dim`-dimensional tree.
    pub(crate) fn new(id: usize, dim: usize) -> Self {
        Self {
            id,
            points: Vec::new(),
            dimensions: vec![Vec::new(); dim],
            low: vec![0.0; dim],
            upper: vec![0.0; dim],
            sizes: vec![0.0; dim],
            center: vec![0.0; dim],
            radius: 0.0,
            children: None,
            is_in_pair: false,
            cluster_parent: None,
            next_point: AtomicUsize::new(0),
        }
    }

    /// The id of the cell, unique within its tree.
    pub const fn id(&self) -> usize {
        self.id
    }

    /// The indices of the points contained in this cell.
    pub fn points(&self) -> &[usize] {
        &self.points
    }

    /// The number of points contained in this cell.
    pub fn cardinality(&self) -> usize {
        self.points.len()
    }

    /// The componentwise minima of the cell's box.
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// The componentwise maxima of the cell's box.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Half the diagonal of the cell's box; 0 for a single point.
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// The children of the cell, if it was split.
    pub const fn children(&self) -> Option<(CellIndex, CellIndex)> {
        self.children
    }

    /// Whether this cell has no children.
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether the decomposition recorded this cell as a pair endpoint.
    pub const fn is_in_pair(&self) -> bool {
        self.is_in_pair
    }

    /// The head cell covering this cell, set during clustering.
    pub const fn cluster_parent(&self) -> Option<CellIndex> {
        self.cluster_parent
    }

    /// The next representative of this cell, advancing the round-robin
    /// cursor. Spreads edges across the points of large cells instead of
    /// repeatedly picking the first one.
    pub fn next_point(&self) -> usize {
        let n = self.next_point.fetch_add(1, Ordering::Relaxed);
        self.points[n % self.points.len()]
    }

    /// Rewinds the round-robin cursor to the first point.
    pub(crate) fn reset_cursor(&self) {
        self.next_point.store(0, Ordering::Relaxed);
    }

    /// Whether this cell is close to `other`, with zero radii stood in for
    /// by `avg_radius`.
    ///
    /// This is the alternative head-merging predicate; the active rule
    /// merges heads that are not well-separated.
    pub fn close_to(&self, other: &Self, avg_radius: f64) -> bool {
        let d = euclidean::<f64, f64>(&self.center, &other.center);
        let mut r = if other.radius > 0.0 { other.radius } else { avg_radius };
        r += if self.radius > 0.0 { self.radius } else { avg_radius };
        d < r
    }

    /// The position in `dimensions[split_d]` of the first point that
    /// belongs to the right child when splitting at `split_val`.
    ///
    /// Points with coordinate exactly equal to `split_val` all go right:
    /// when the binary search lands on an equal value it walks left past
    /// any equal neighbors (stopping at the front of the list), so
    /// full-tie inputs split deterministically.
    pub(crate) fn split_point<M>(&self, set: &PointSet<M>, split_d: usize, split_val: f64) -> usize {
        let indices = &self.dimensions[split_d];
        let (mut l, mut r) = (0, indices.len());
        while l < r {
            let mut mid = l + (r - l) / 2;
            let value = set.get(split_d, indices[mid]);
            if value == split_val {
                while mid > 0 && set.get(split_d, indices[mid - 1]) == split_val {
                    mid -= 1;
                }
                return mid;
            }
            if split_val < value {
                r = mid;
            } else {
                l = mid + 1;
            }
        }
        l
    }
}

impl Region for Cell {
    fn center(&self) -> &[f64] {
        &self.center
    }

    fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
