//! Provides the fair-split `Tree` and its `Cell` nodes.
//!
//! It also provides the `Region` trait, the minimal box-like interface the
//! decomposition needs from a node.

mod _tree;
mod cell;

pub use _tree::{seq_split, Tree};
pub use cell::{Cell, CellIndex, Region};
