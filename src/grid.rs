//! Grid model for maze runs.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Matrix value for an open cell.
pub const OPEN: u8 = 0;
/// Matrix value for a wall cell.
pub const WALL: u8 = 1;

/// A grid cell coordinate, 0-indexed.
///
/// Serialized as a `[row, col]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<[usize; 2]> for Position {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Position> for [usize; 2] {
    fn from(pos: Position) -> Self {
        [pos.row, pos.col]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four unit moves, in the order the maze engine tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

/// A rectangular matrix of open and wall cells.
///
/// Dimensions are fixed at construction and the grid is never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from a row-major matrix of `0` (open) and `1` (wall).
    pub fn from_matrix(matrix: &[Vec<u8>]) -> Result<Self, InputError> {
        let cols = matrix.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(InputError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(matrix.len() * cols);
        for (row, values) in matrix.iter().enumerate() {
            if values.len() != cols {
                return Err(InputError::RaggedGrid {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let cell = match value {
                    OPEN => Cell::Open,
                    WALL => Cell::Wall,
                    _ => return Err(InputError::InvalidCell { row, col, value }),
                };
                cells.push(cell);
            }
        }

        Ok(Self {
            rows: matrix.len(),
            cols,
            cells,
        })
    }

    /// An all-open grid.
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Open; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Cell state, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[pos.row * self.cols + pos.col])
        } else {
            None
        }
    }

    /// In bounds and not a wall.
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    pub fn set_wall(&mut self, pos: Position) {
        if self.contains(pos) {
            self.cells[pos.row * self.cols + pos.col] = Cell::Wall;
        }
    }

    /// The in-bounds cell one step from `pos`, if any.
    pub fn step(&self, pos: Position, direction: Direction) -> Option<Position> {
        let next = match direction {
            Direction::Up => Position::new(pos.row.checked_sub(1)?, pos.col),
            Direction::Right => Position::new(pos.row, pos.col + 1),
            Direction::Down => Position::new(pos.row + 1, pos.col),
            Direction::Left => Position::new(pos.row, pos.col.checked_sub(1)?),
        };
        self.contains(next).then_some(next)
    }

    /// Open neighbours of `pos` in engine order (up, right, down, left).
    pub fn open_neighbours(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(pos, direction))
            .filter(move |next| self.is_open(*next))
    }
}
