//! Breadth-first maze search that reports its progress as events.
//!
//! Each queue entry carries its whole path, so a successful run can report
//! the shortest path without walking parent pointers.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::event::MazeEvent;
use crate::grid::{Grid, Position};
use crate::path::GridPath;

/// A single maze run.
///
/// Iterating yields the run's events in order and ends after the `complete`
/// event. Dropping the iterator abandons the run.
#[derive(Debug)]
pub struct MazeSearch {
    grid: Grid,
    end: Position,
    frontier: VecDeque<GridPath>,
    visited: HashSet<Position>,
    pending: VecDeque<MazeEvent>,
    expanded: usize,
    finished: bool,
}

impl MazeSearch {
    /// Sets up a run from `start` to `end`.
    ///
    /// A wall or out-of-bounds start is never seeded, so such a run ends with
    /// an unsuccessful `complete` event straight away.
    pub fn new(grid: Grid, start: Position, end: Position) -> Self {
        let mut frontier = VecDeque::new();
        let mut visited = HashSet::new();
        if grid.is_open(start) {
            frontier.push_back(GridPath::single(start));
            visited.insert(start);
        }

        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            %start,
            %end,
            "starting maze search"
        );

        Self {
            grid,
            end,
            frontier,
            visited,
            pending: VecDeque::new(),
            expanded: 0,
            finished: false,
        }
    }

    /// Cells discovered so far, including the start.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Paths dequeued and expanded so far.
    pub fn expanded_count(&self) -> usize {
        self.expanded
    }

    /// Dequeues one path and buffers the events it produces.
    fn advance(&mut self) {
        let Some(path) = self.frontier.pop_front() else {
            debug!(visited = self.visited.len(), "maze search exhausted");
            self.pending.push_back(MazeEvent::Complete {
                success: false,
                path: GridPath::default(),
                length: 0,
                message: format!("No path to {}", self.end),
            });
            self.finished = true;
            return;
        };
        let Some(current) = path.last() else {
            return;
        };
        self.expanded += 1;

        self.pending.push_back(MazeEvent::Visit {
            path: path.clone(),
            cell: current,
            message: format!("Visiting {}", current),
        });

        if current == self.end {
            let length = path.len();
            debug!(length, visited = self.visited.len(), "maze search reached end");
            self.pending.push_back(MazeEvent::Leaf {
                path: path.clone(),
                length,
                is_solution: true,
                message: format!("Reached {} in {} cells", current, length),
            });
            self.pending.push_back(MazeEvent::Complete {
                success: true,
                path,
                length,
                message: format!("Shortest path found: {} cells", length),
            });
            self.finished = true;
            return;
        }

        let neighbours: Vec<Position> = self.grid.open_neighbours(current).collect();
        for next in neighbours {
            if !self.visited.insert(next) {
                continue;
            }
            let extended = path.extended(next);
            self.pending.push_back(MazeEvent::Expand {
                parent_path: path.clone(),
                path: extended.clone(),
                child_node: next,
                message: format!("Discovered {}", next),
            });
            self.frontier.push_back(extended);
        }
    }
}

impl Iterator for MazeSearch {
    type Item = MazeEvent;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() && !self.finished {
            self.advance();
        }
        self.pending.pop_front()
    }
}

/// Length in cells of a shortest open path from `start` to `end`.
///
/// Plain level-by-level BFS with no event reporting; `None` when unreachable
/// or when either endpoint is not open.
pub fn shortest_path_len(grid: &Grid, start: Position, end: Position) -> Option<usize> {
    if !grid.is_open(start) || !grid.is_open(end) {
        return None;
    }

    let mut seen = vec![false; grid.len()];
    let index = |pos: Position| pos.row * grid.cols() + pos.col;
    seen[index(start)] = true;
    let mut level = vec![start];
    let mut cells = 1;

    while !level.is_empty() {
        if level.contains(&end) {
            return Some(cells);
        }
        let mut next_level = Vec::new();
        for pos in level {
            for next in grid.open_neighbours(pos) {
                if !seen[index(next)] {
                    seen[index(next)] = true;
                    next_level.push(next);
                }
            }
        }
        level = next_level;
        cells += 1;
    }

    None
}
