//! Provides the `PointSet`, a validated set of points in d-dimensional
//! Euclidean space.

use std::cmp::Ordering;

use distances::vectors::euclidean;
use rayon::prelude::*;

use crate::{
    core::tree::{Cell, Region},
    error::SpannerError,
    utils,
};

/// An immutable-after-construction set of points in `dim` dimensions.
///
/// Alongside the raw coordinates, a `PointSet` keeps one index ordering per
/// dimension (ascending by that coordinate, with ties broken by original
/// index) and the axis-aligned bounding box of the whole set. The orderings
/// are what the fair-split tree slices when it partitions a box, so their
/// determinism is what makes the whole pipeline deterministic.
///
/// # Type Parameters
///
/// - `M`: an opaque per-point payload. The core algorithms never read it;
///   it is only carried through so that output writers can label points.
#[derive(Debug)]
pub struct PointSet<M> {
    /// The dimensionality of the points.
    dim: usize,
    /// The coordinates, one row per point.
    points: Vec<Vec<f64>>,
    /// The per-point payloads, one per row of `points`.
    infos: Vec<M>,
    /// For each dimension, the point indices sorted by that coordinate.
    dimensions: Vec<Vec<usize>>,
    /// The componentwise minima of the bounding box.
    low: Vec<f64>,
    /// The componentwise maxima of the bounding box.
    upper: Vec<f64>,
    /// `upper - low`, componentwise.
    sizes: Vec<f64>,
    /// The center of the bounding box.
    center: Vec<f64>,
    /// Half the diagonal of the bounding box; 0 for a single point.
    radius: f64,
}

impl<M> PointSet<M> {
    /// Creates a new `PointSet` after validating the input.
    ///
    /// The per-dimension orderings are computed here, in parallel across
    /// dimensions; each ordering is a stable ascending sort by that
    /// coordinate, so equal coordinates keep their original index order.
    ///
    /// # Arguments
    ///
    /// * `dim`: the dimensionality of the points.
    /// * `points`: the coordinates, one row of `dim` values per point.
    /// * `infos`: one payload per point.
    ///
    /// # Errors
    ///
    /// * `EmptyInput` if `dim` is 0 or `points` is empty.
    /// * `InvalidShape` if any row does not have exactly `dim` values, or
    ///   if `infos` and `points` have different lengths.
    /// * `NonFinite` if any coordinate is NaN or infinite.
    pub fn new(dim: usize, points: Vec<Vec<f64>>, infos: Vec<M>) -> Result<Self, SpannerError> {
        if dim == 0 || points.is_empty() {
            return Err(SpannerError::EmptyInput);
        }
        if infos.len() != points.len() {
            return Err(SpannerError::InvalidShape(format!(
                "{} points but {} infos",
                points.len(),
                infos.len()
            )));
        }
        for (index, row) in points.iter().enumerate() {
            if row.len() != dim {
                return Err(SpannerError::InvalidShape(format!(
                    "point {index} has {} coordinates, expected {dim}",
                    row.len()
                )));
            }
            for (d, value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(SpannerError::NonFinite { index, dim: d });
                }
            }
        }

        let mut dimensions = vec![(0..points.len()).collect::<Vec<_>>(); dim];
        dimensions.par_iter_mut().enumerate().for_each(|(i, indices)| {
            indices.sort_by(|&u, &v| points[u][i].partial_cmp(&points[v][i]).unwrap_or(Ordering::Equal));
        });

        let mut set = Self {
            dim,
            points,
            infos,
            dimensions,
            low: vec![0.0; dim],
            upper: vec![0.0; dim],
            sizes: vec![0.0; dim],
            center: vec![0.0; dim],
            radius: 0.0,
        };
        set.update_bounds();
        log::debug!(
            "point set: {} points in {} dimensions, radius {}",
            set.cardinality(),
            set.dim,
            set.radius
        );

        Ok(set)
    }

    /// The number of points in the set.
    pub fn cardinality(&self) -> usize {
        self.points.len()
    }

    /// The dimensionality of the points.
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// The Euclidean distance between the points at `u` and `v`.
    pub fn dist(&self, u: usize, v: usize) -> f64 {
        euclidean(&self.points[u], &self.points[v])
    }

    /// Coordinate `dim` of the point at `p`.
    pub fn get(&self, dim: usize, p: usize) -> f64 {
        self.points[p][dim]
    }

    /// The payload associated with the point at `p`.
    pub fn info(&self, p: usize) -> &M {
        &self.infos[p]
    }

    /// For each dimension, the point indices sorted ascending by that
    /// coordinate. Each is a permutation of `0..cardinality()`.
    pub fn orderings(&self) -> &[Vec<usize>] {
        &self.dimensions
    }

    /// Recomputes `cell`'s box from the extreme elements of its
    /// per-dimension index lists.
    ///
    /// The cell's radius is 0 when the cell holds a single point, and half
    /// the diagonal of its bounding box otherwise.
    ///
    /// # Preconditions
    ///
    /// Each of `cell.dimensions[i]` is non-empty and sorted ascending by
    /// coordinate `i`.
    pub(crate) fn update_box(&self, cell: &mut Cell) {
        for i in 0..self.dim {
            let indices = &cell.dimensions[i];
            cell.low[i] = self.get(i, indices[0]);
            cell.upper[i] = self.get(i, indices[indices.len() - 1]);
            cell.sizes[i] = cell.upper[i] - cell.low[i];
            cell.center[i] = cell.low[i] + cell.sizes[i] / 2.0;
        }
        cell.radius = if cell.dimensions[0].len() == 1 {
            0.0
        } else {
            utils::norm(&cell.sizes) / 2.0
        };
    }

    /// Recomputes the set's own bounding box from its orderings.
    fn update_bounds(&mut self) {
        for i in 0..self.dim {
            let indices = &self.dimensions[i];
            self.low[i] = self.get(i, indices[0]);
            self.upper[i] = self.get(i, indices[indices.len() - 1]);
            self.sizes[i] = self.upper[i] - self.low[i];
            self.center[i] = self.low[i] + self.sizes[i] / 2.0;
        }
        self.radius = if self.points.len() == 1 {
            0.0
        } else {
            utils::norm(&self.sizes) / 2.0
        };
    }
}

impl<M> Region for PointSet<M> {
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
