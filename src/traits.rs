//! Core traits shared by the search engines and the event transport.
//!
//! These are intentionally small. The engines depend on them only at the
//! seams where a caller may want to substitute its own implementation.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Provides a pairwise distance matrix for a set of points.
///
/// The matrix is indexed by the provided point order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, points: &[(f64, f64)]) -> Vec<Vec<f64>>;
}

/// A record emitted by a search engine and carried over the event stream.
pub trait SearchEvent: Serialize + DeserializeOwned {
    /// True for the single event that ends a run.
    fn is_terminal(&self) -> bool;
}
