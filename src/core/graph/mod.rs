//! Provides the `Spanner` graph, its `Edge`s, and the `Builder` that
//! derives them from a decomposition.

mod _graph;
mod builder;

pub use _graph::{Edge, Spanner};
pub use builder::Builder;
