//! Client-side state rebuilt incrementally from an event stream.
//!
//! A view never re-runs the search: every field is derived from the events
//! applied so far, in order.

use std::collections::{BTreeMap, HashSet};

use crate::event::{MazeEvent, TspEvent};
use crate::grid::Position;

/// Outcome of a finished run as seen by a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Solved,
    Unsolved,
}

/// Display state of a maze run.
#[derive(Debug, Clone)]
pub struct MazeView {
    /// Cells in discovery order.
    pub discovered: Vec<Position>,
    seen: HashSet<Position>,
    /// Path currently being expanded.
    pub active_path: Vec<Position>,
    pub solution: Vec<Position>,
    pub outcome: Outcome,
    pub events: usize,
}

impl Default for MazeView {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeView {
    pub fn new() -> Self {
        Self {
            discovered: Vec::new(),
            seen: HashSet::new(),
            active_path: Vec::new(),
            solution: Vec::new(),
            outcome: Outcome::Running,
            events: 0,
        }
    }

    pub fn apply(&mut self, event: &MazeEvent) {
        self.events += 1;
        match event {
            MazeEvent::Visit { path, cell, .. } => {
                self.active_path = path.cells().to_vec();
                self.mark(*cell);
            }
            MazeEvent::Expand { child_node, .. } => {
                self.mark(*child_node);
            }
            MazeEvent::Leaf { path, .. } => {
                self.solution = path.cells().to_vec();
            }
            MazeEvent::Complete { success, path, .. } => {
                self.solution = path.cells().to_vec();
                self.outcome = if *success {
                    Outcome::Solved
                } else {
                    Outcome::Unsolved
                };
            }
        }
    }

    pub fn is_discovered(&self, pos: Position) -> bool {
        self.seen.contains(&pos)
    }

    pub fn is_finished(&self) -> bool {
        self.outcome != Outcome::Running
    }

    fn mark(&mut self, pos: Position) {
        if self.seen.insert(pos) {
            self.discovered.push(pos);
        }
    }
}

/// One node of the TSP decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub route: Vec<usize>,
    pub children: Vec<Vec<usize>>,
    /// Cyclic distance once this node has been evaluated as a leaf.
    pub distance: Option<f64>,
    pub processed: bool,
}

impl TreeNode {
    fn new(route: Vec<usize>) -> Self {
        Self {
            route,
            children: Vec::new(),
            distance: None,
            processed: false,
        }
    }
}

/// Display state of a TSP run: the decision tree grown so far plus the
/// running best tour.
#[derive(Debug, Clone)]
pub struct TspView {
    pub nodes: BTreeMap<Vec<usize>, TreeNode>,
    pub current: Option<Vec<usize>>,
    pub best_route: Option<Vec<usize>>,
    pub best_distance: Option<f64>,
    /// Every best distance announced, in stream order.
    pub best_history: Vec<f64>,
    pub leaves: usize,
    pub finished: bool,
}

impl Default for TspView {
    fn default() -> Self {
        Self::new()
    }
}

impl TspView {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            current: None,
            best_route: None,
            best_distance: None,
            best_history: Vec::new(),
            leaves: 0,
            finished: false,
        }
    }

    pub fn apply(&mut self, event: &TspEvent) {
        match event {
            TspEvent::Processing { route, .. } => {
                self.node_mut(route).processed = true;
                self.current = Some(route.clone());
            }
            TspEvent::Expand {
                parent_path, route, ..
            } => {
                self.node_mut(route);
                let parent = self.node_mut(parent_path);
                if !parent.children.contains(route) {
                    parent.children.push(route.clone());
                }
            }
            TspEvent::Leaf {
                route,
                distance,
                is_best,
                ..
            } => {
                self.leaves += 1;
                self.node_mut(route).distance = Some(*distance);
                if *is_best {
                    self.best_route = Some(route.clone());
                    self.record_best(*distance);
                }
            }
            TspEvent::Done {
                best_route,
                best_distance,
                ..
            } => {
                self.best_route = Some(best_route.clone());
                self.best_distance = Some(*best_distance);
                self.current = None;
                self.finished = true;
            }
        }
    }

    /// Root of the decision tree, once the first route has arrived.
    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.values().find(|node| node.route.len() == 1)
    }

    pub fn node(&self, route: &[usize]) -> Option<&TreeNode> {
        self.nodes.get(route)
    }

    fn record_best(&mut self, distance: f64) {
        self.best_distance = Some(distance);
        self.best_history.push(distance);
    }

    fn node_mut(&mut self, route: &[usize]) -> &mut TreeNode {
        self.nodes
            .entry(route.to_vec())
            .or_insert_with(|| TreeNode::new(route.to_vec()))
    }
}
