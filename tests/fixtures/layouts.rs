//! Maze layouts and city sets shared by the integration suites.

use bfs_animator::grid::{Grid, Position};
use bfs_animator::request::{MazeRequest, Point};
use bfs_animator::tsp::City;

/// A maze parsed from ASCII art.
///
/// `#` is a wall, `S` the start, `E` the end, anything else open.
pub struct Layout {
    pub matrix: Vec<Vec<u8>>,
    pub start: Position,
    pub end: Position,
}

impl Layout {
    pub fn parse(art: &str) -> Self {
        let mut matrix = Vec::new();
        let mut start = Position::new(0, 0);
        let mut end = Position::new(0, 0);
        for (row, line) in art.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let mut values = Vec::new();
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => values.push(1),
                    'S' => {
                        start = Position::new(row, col);
                        values.push(0);
                    }
                    'E' => {
                        end = Position::new(row, col);
                        values.push(0);
                    }
                    _ => values.push(0),
                }
            }
            matrix.push(values);
        }
        Self { matrix, start, end }
    }

    pub fn grid(&self) -> Grid {
        Grid::from_matrix(&self.matrix).expect("fixture grid is valid")
    }

    pub fn request(&self) -> MazeRequest {
        MazeRequest {
            grid: self.matrix.clone(),
            start: Point::from(self.start),
            end: Point::from(self.end),
        }
    }
}

/// 3×3 open grid, corner to corner.
pub const OPEN_3X3: &str = "
    S..
    ...
    ..E
";

/// A full wall row between start and end.
pub const WALLED_OFF: &str = "
    S...
    ####
    ...E
";

/// Winding corridor with one dead end; the only path is 22 cells.
pub const SERPENTINE: &str = "
    S.....
    #####.
    ......
    .#####
    ...#.E
    .#...#
";

/// Two equally short routes around a block.
pub const TWO_ROUTES: &str = "
    S...
    .##.
    .##.
    ...E
";

/// Right triangle with legs of 10: optimal tour is the perimeter.
pub fn right_triangle() -> Vec<City> {
    vec![
        City::new(0, 0.0, 0.0),
        City::new(1, 10.0, 0.0),
        City::new(2, 0.0, 10.0),
    ]
}

/// Six cities on a hexagon, given out of angular order.
pub fn scrambled_hexagon() -> Vec<City> {
    let angles = [0usize, 3, 1, 5, 2, 4];
    angles
        .iter()
        .enumerate()
        .map(|(id, step)| {
            let theta = std::f64::consts::PI / 3.0 * *step as f64;
            City::new(id, 10.0 * theta.cos(), 10.0 * theta.sin())
        })
        .collect()
}
