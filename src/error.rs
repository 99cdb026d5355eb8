//! Error types for request validation.
//!
//! Transport errors live next to the code that produces them
//! (`stream::StreamError`, `client::ClientError`).

use thiserror::Error;

/// Which endpoint of a maze run an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// A request that cannot be turned into a search run.
///
/// Reported before any event is streamed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid cell ({row}, {col}) has value {value}, expected 0 (open) or 1 (wall)")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("grid has {cells} cells, limit is {max}")]
    GridTooLarge { cells: usize, max: usize },

    #[error("{endpoint} ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        endpoint: Endpoint,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{endpoint} ({row}, {col}) is a wall")]
    WallEndpoint {
        endpoint: Endpoint,
        row: usize,
        col: usize,
    },

    #[error("city list is empty")]
    NoCities,

    #[error("{count} cities requested, limit is {max}")]
    TooManyCities { count: usize, max: usize },

    #[error("city at position {index} has id {found}, expected {index}")]
    CityIdMismatch { index: usize, found: usize },

    #[error("city {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: usize },
}
