//! Request bodies for the two search endpoints and their validation.

use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::error::{Endpoint, InputError};
use crate::grid::{Grid, Position};
use crate::maze::MazeSearch;
use crate::tsp::{City, TspSearch};

/// A grid coordinate as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub r: usize,
    pub c: usize,
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Position::new(point.r, point.c)
    }
}

impl From<Position> for Point {
    fn from(pos: Position) -> Self {
        Point {
            r: pos.row,
            c: pos.col,
        }
    }
}

/// Maze run request: `0` is open, `1` is wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeRequest {
    pub grid: Vec<Vec<u8>>,
    pub start: Point,
    pub end: Point,
}

impl MazeRequest {
    /// Validates the request and sets up its run.
    pub fn into_search(self, limits: &Limits) -> Result<MazeSearch, InputError> {
        let rows = self.grid.len();
        let cols = self.grid.first().map(Vec::len).unwrap_or(0);
        let cells = rows.saturating_mul(cols);
        if cells > limits.max_grid_cells {
            return Err(InputError::GridTooLarge {
                cells,
                max: limits.max_grid_cells,
            });
        }

        let grid = Grid::from_matrix(&self.grid)?;
        let start = check_endpoint(&grid, Endpoint::Start, self.start.into())?;
        let end = check_endpoint(&grid, Endpoint::End, self.end.into())?;

        Ok(MazeSearch::new(grid, start, end))
    }
}

fn check_endpoint(grid: &Grid, endpoint: Endpoint, pos: Position) -> Result<Position, InputError> {
    if !grid.contains(pos) {
        return Err(InputError::OutOfBounds {
            endpoint,
            row: pos.row,
            col: pos.col,
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    if !grid.is_open(pos) {
        return Err(InputError::WallEndpoint {
            endpoint,
            row: pos.row,
            col: pos.col,
        });
    }
    Ok(pos)
}

/// TSP run request. City `i` must carry id `i`; city `0` is the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspRequest {
    pub cities: Vec<City>,
}

impl TspRequest {
    /// Validates the request and sets up its run.
    pub fn into_search(self, limits: &Limits) -> Result<TspSearch, InputError> {
        validate_cities(&self.cities, limits)?;
        Ok(TspSearch::new(&self.cities))
    }
}

pub fn validate_cities(cities: &[City], limits: &Limits) -> Result<(), InputError> {
    if cities.is_empty() {
        return Err(InputError::NoCities);
    }
    if cities.len() > limits.max_cities {
        return Err(InputError::TooManyCities {
            count: cities.len(),
            max: limits.max_cities,
        });
    }
    for (index, city) in cities.iter().enumerate() {
        if city.id != index {
            return Err(InputError::CityIdMismatch {
                index,
                found: city.id,
            });
        }
        if !city.x.is_finite() || !city.y.is_finite() {
            return Err(InputError::NonFiniteCoordinate { id: city.id });
        }
    }
    Ok(())
}
