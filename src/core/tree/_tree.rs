//! A `Tree` recursively splits a `PointSet` into boxes along the widest
//! coordinate at the geometric midpoint.

use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::core::dataset::PointSet;

use super::{Cell, CellIndex, Region};

/// The default splitter: sequential pre-order recursion from the root.
pub fn seq_split<M>(tree: &mut Tree, set: &PointSet<M>) {
    let root = tree.root();
    tree.split_recursive(set, root);
}

/// A fair-split tree over a `PointSet`.
///
/// The tree owns its cells in an arena; `CellIndex` handles carried by the
/// decomposition and the clusterer index into it. The split strategy is
/// pluggable through `with_splitter` so a caller may drive the recursion
/// itself (for instance in parallel); the default is [`seq_split`]. Both
/// produce identical trees modulo id assignment order.
#[derive(Debug)]
pub struct Tree {
    /// The cells of the tree, in allocation order.
    cells: Vec<Cell>,
    /// The handle of the root cell.
    root: CellIndex,
    /// The dimensionality of the underlying point set.
    dim: usize,
    /// The id source for cells. A single counter, atomic so that a
    /// parallel splitter can still allocate unique ids.
    next_id: AtomicUsize,
}

impl Tree {
    /// Builds the tree for `set` with the default sequential splitter.
    #[must_use]
    pub fn new<M>(set: &PointSet<M>) -> Self {
        Self::with_splitter(set, seq_split)
    }

    /// Builds the tree for `set`, delegating the recursive splitting to
    /// `splitter`.
    ///
    /// The splitter is handed the tree with only the root cell allocated
    /// and boxed; it is expected to call [`Tree::split_recursive`] (or
    /// [`Tree::split_once`] repeatedly) until no cell it cares about can
    /// be split further.
    #[must_use]
    pub fn with_splitter<M, S>(set: &PointSet<M>, splitter: S) -> Self
    where
        S: FnOnce(&mut Self, &PointSet<M>),
    {
        let mut tree = Self {
            cells: Vec::new(),
            root: CellIndex(0),
            dim: set.dim(),
            next_id: AtomicUsize::new(1),
        };
        let root = tree.alloc();
        tree.root = root;

        let cell = &mut tree.cells[root.0];
        cell.dimensions = set.orderings().to_vec();
        cell.points = (0..set.cardinality()).collect();
        set.update_box(&mut tree.cells[root.0]);

        splitter(&mut tree, set);
        log::debug!("fair-split tree: {} cells", tree.cells.len());
        tree
    }

    /// The handle of the root cell.
    pub const fn root(&self) -> CellIndex {
        self.root
    }

    /// The cell behind the given handle.
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.0]
    }

    /// Mutable access to the cell behind the given handle.
    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        &mut self.cells[index.0]
    }

    /// All cells, in allocation order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The number of cells in the tree.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the tree has no cells. Never true once constructed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Splits `index` and recurses into both children, pre-order.
    pub fn split_recursive<M>(&mut self, set: &PointSet<M>, index: CellIndex) {
        if let Some((left, right)) = self.split_once(set, index) {
            self.split_recursive(set, left);
            self.split_recursive(set, right);
        }
    }

    /// Splits the cell at `index` once, if it can be split.
    ///
    /// The split dimension is the widest (earliest on ties) and the split
    /// value is the geometric midpoint of that dimension, not the median.
    /// Returns the children, or `None` if the cell is a leaf. A cell with
    /// radius 0 is always a leaf; a cell whose midpoint split would leave
    /// one side empty is kept as a leaf with a diagnostic, since
    /// recursing on it could not terminate.
    pub fn split_once<M>(&mut self, set: &PointSet<M>, index: CellIndex) -> Option<(CellIndex, CellIndex)> {
        if self.cells[index.0].radius == 0.0 {
            return None;
        }
        let split_d = self.cells[index.0].widest_dim();
        let split_val = self.cells[index.0].low[split_d] + self.cells[index.0].sizes[split_d] / 2.0;
        let p = self.cells[index.0].split_point(set, split_d, split_val);
        let count = self.cells[index.0].dimensions[split_d].len();
        if p == 0 || p == count {
            log::warn!(
                "midpoint split of cell {} left one side empty; keeping it as a leaf",
                self.cells[index.0].id
            );
            return None;
        }

        let left = self.alloc();
        let right = self.alloc();

        let v_left = self.cells[index.0].dimensions[split_d][..p].to_vec();
        let v_right = self.cells[index.0].dimensions[split_d][p..].to_vec();
        self.cells[left.0].dimensions[split_d] = v_left.clone();
        self.cells[left.0].points = v_left;
        self.cells[right.0].dimensions[split_d] = v_right.clone();
        self.cells[right.0].points = v_right;

        self.distribute(set, index, left, right, split_d);
        self.cells[index.0].children = Some((left, right));
        Some((left, right))
    }

    /// Distributes the parent's remaining dimension orderings to the two
    /// children by membership, preserving sortedness per dimension, then
    /// recomputes both children's boxes.
    fn distribute<M>(
        &mut self,
        set: &PointSet<M>,
        parent: CellIndex,
        left: CellIndex,
        right: CellIndex,
        split_d: usize,
    ) {
        let in_left = self.cells[left.0].dimensions[split_d]
            .iter()
            .copied()
            .collect::<HashSet<_>>();
        for i in 0..self.dim {
            if i == split_d {
                continue;
            }
            let indices = self.cells[parent.0].dimensions[i].clone();
            for p in indices {
                if in_left.contains(&p) {
                    self.cells[left.0].dimensions[i].push(p);
                } else {
                    self.cells[right.0].dimensions[i].push(p);
                }
            }
        }
        set.update_box(&mut self.cells[left.0]);
        set.update_box(&mut self.cells[right.0]);
    }

    /// Allocates a fresh cell and returns its handle.
    fn alloc(&mut self) -> CellIndex {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.cells.push(Cell::new(id, self.dim));
        CellIndex(self.cells.len() - 1)
    }
}
