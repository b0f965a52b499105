//! Distance oracles.
//!
//! The search only needs [`Topology::distance`]; [`Topology::path`] is used
//! when a finished plan is turned into move instructions.
//!
//! - [`DistanceMatrix`] — Dense matrix, every pair directly connected
//! - [`RoadNetwork`] — Road graph with all-pairs shortest paths

mod matrix;
mod network;

pub use matrix::DistanceMatrix;
pub use network::RoadNetwork;

/// Location-to-location distance and path oracle.
///
/// Implementations must be pure: the same query always yields the same
/// answer.
pub trait Topology {
    /// Non-negative travel distance from `from` to `to`.
    fn distance(&self, from: usize, to: usize) -> f64;

    /// Stops traversed from `from` to `to`, excluding `from` and including
    /// `to`. Empty when `from == to`.
    fn path(&self, from: usize, to: usize) -> Vec<usize>;
}

impl<T: Topology + ?Sized> Topology for &T {
    fn distance(&self, from: usize, to: usize) -> f64 {
        (**self).distance(from, to)
    }

    fn path(&self, from: usize, to: usize) -> Vec<usize> {
        (**self).path(from, to)
    }
}
