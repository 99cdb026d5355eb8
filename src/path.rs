//! Grid paths as carried in maze events.
//!
//! A path is stored as its decoded cell sequence. The engine extends paths by
//! cloning and pushing, so every queued path owns its cells outright.

use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// An ordered run of grid cells from the start cell to some reached cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridPath {
    cells: Vec<Position>,
}

impl GridPath {
    /// Creates a new path from cells in visiting order.
    pub fn new(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// A path holding only its starting cell.
    pub fn single(start: Position) -> Self {
        Self { cells: vec![start] }
    }

    /// A copy of this path with one more cell appended.
    pub fn extended(&self, next: Position) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len() + 1);
        cells.extend_from_slice(&self.cells);
        cells.push(next);
        Self { cells }
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn last(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if every consecutive pair of cells is one axis-aligned step apart.
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .windows(2)
            .all(|pair| pair[0].manhattan(pair[1]) == 1)
    }

    /// True if no cell appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.cells.len());
        self.cells.iter().all(|cell| seen.insert(*cell))
    }
}
