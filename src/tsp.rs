//! Exhaustive TSP state-space exploration, reported as events.
//!
//! Routes are expanded breadth-first from `[0]`. Every permutation of the
//! remaining cities is visited; the running best is tracked but never used to
//! cut branches.

use std::collections::VecDeque;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::euclidean::EuclideanMatrix;
use crate::event::TspEvent;
use crate::traits::DistanceMatrixProvider;

/// A city to visit. City `0` is where every tour starts and ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn point(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// A complete visiting order and its cyclic distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub route: Vec<usize>,
    pub distance: f64,
}

impl Tour {
    /// The route with the closing return to its first city appended.
    pub fn closed_route(&self) -> Vec<usize> {
        let mut closed = self.route.clone();
        if let Some(&first) = self.route.first() {
            closed.push(first);
        }
        closed
    }
}

/// Total length of `route` plus the leg back to its first city.
///
/// Legs are summed left to right, closing leg last.
pub fn tour_distance(matrix: &[Vec<f64>], route: &[usize]) -> f64 {
    let legs: f64 = route
        .windows(2)
        .map(|leg| matrix[leg[0]][leg[1]])
        .sum();
    match (route.first(), route.last()) {
        (Some(&first), Some(&last)) => legs + matrix[last][first],
        _ => 0.0,
    }
}

/// A single TSP run.
///
/// Iterating yields the run's events in order and ends after the `done`
/// event. Dropping the iterator abandons the run.
#[derive(Debug)]
pub struct TspSearch {
    city_count: usize,
    matrix: Vec<Vec<f64>>,
    frontier: VecDeque<Vec<usize>>,
    best: Option<Tour>,
    leaves: usize,
    pending: VecDeque<TspEvent>,
    finished: bool,
}

impl TspSearch {
    /// Sets up a run using straight-line distances.
    ///
    /// City ids are their positions in `cities`.
    pub fn new(cities: &[City]) -> Self {
        Self::with_matrix_provider(cities, &EuclideanMatrix::new())
    }

    pub fn with_matrix_provider<M: DistanceMatrixProvider>(cities: &[City], provider: &M) -> Self {
        let points: Vec<(f64, f64)> = cities.iter().map(City::point).collect();
        let matrix = provider.matrix_for(&points);

        let mut frontier = VecDeque::new();
        if !cities.is_empty() {
            frontier.push_back(vec![0]);
        }

        debug!(cities = cities.len(), "starting tsp search");

        Self {
            city_count: cities.len(),
            matrix,
            frontier,
            best: None,
            leaves: 0,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Best tour found so far.
    pub fn best(&self) -> Option<&Tour> {
        self.best.as_ref()
    }

    /// Complete tours evaluated so far.
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    fn best_distance(&self) -> Option<f64> {
        self.best.as_ref().map(|tour| tour.distance)
    }

    fn advance(&mut self) {
        let Some(route) = self.frontier.pop_front() else {
            let (best_route, best_distance) = match &self.best {
                Some(tour) => (tour.route.clone(), tour.distance),
                None => (Vec::new(), 0.0),
            };
            debug!(leaves = self.leaves, best_distance, "tsp search finished");
            self.pending.push_back(TspEvent::Done {
                message: format!(
                    "Best tour {} with distance {:.2}",
                    format_route(&best_route, true),
                    best_distance
                ),
                best_route,
                best_distance,
                leaves: self.leaves,
            });
            self.finished = true;
            return;
        };

        self.pending.push_back(TspEvent::Processing {
            message: format!("Processing {}", format_route(&route, false)),
            route: route.clone(),
            best_distance: self.best_distance(),
        });

        if route.len() == self.city_count {
            let distance = tour_distance(&self.matrix, &route);
            let is_best = self.best_distance().is_none_or(|best| distance < best);
            self.leaves += 1;
            if is_best {
                self.best = Some(Tour {
                    route: route.clone(),
                    distance,
                });
            }
            let message = if is_best {
                format!("New best tour {} at {:.2}", format_route(&route, true), distance)
            } else {
                format!("Tour {} at {:.2}", format_route(&route, true), distance)
            };
            self.pending.push_back(TspEvent::Leaf {
                route,
                distance,
                is_best,
                best_distance: self.best_distance(),
                message,
            });
            return;
        }

        for city in 0..self.city_count {
            if route.contains(&city) {
                continue;
            }
            let mut child = Vec::with_capacity(route.len() + 1);
            child.extend_from_slice(&route);
            child.push(city);
            self.pending.push_back(TspEvent::Expand {
                parent_path: route.clone(),
                route: child.clone(),
                child_city: city,
                best_distance: self.best_distance(),
            });
            self.frontier.push_back(child);
        }
    }
}

impl Iterator for TspSearch {
    type Item = TspEvent;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() && !self.finished {
            self.advance();
        }
        self.pending.pop_front()
    }
}

fn format_route(route: &[usize], closed: bool) -> String {
    let mut parts: Vec<String> = route.iter().map(ToString::to_string).collect();
    if closed && let Some(first) = route.first() {
        parts.push(first.to_string());
    }
    format!("[{}]", parts.join(" → "))
}

/// Minimum-distance tour by exhaustive enumeration, without events.
///
/// Branches on the second city in parallel. Among equal distances the
/// lexicographically smallest route wins, which is also the tour the event
/// engine settles on.
pub fn optimal_tour(cities: &[City]) -> Option<Tour> {
    let n = cities.len();
    if n == 0 {
        return None;
    }
    let points: Vec<(f64, f64)> = cities.iter().map(City::point).collect();
    let matrix = EuclideanMatrix::new().matrix_for(&points);
    if n == 1 {
        return Some(Tour {
            route: vec![0],
            distance: 0.0,
        });
    }

    (1..n)
        .into_par_iter()
        .filter_map(|second| {
            let mut route = vec![0, second];
            let mut best = None;
            enumerate_tours(&matrix, &mut route, &mut best);
            best
        })
        .min_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.route.cmp(&b.route))
        })
}

fn enumerate_tours(matrix: &[Vec<f64>], route: &mut Vec<usize>, best: &mut Option<Tour>) {
    let n = matrix.len();
    if route.len() == n {
        let distance = tour_distance(matrix, route);
        if best.as_ref().is_none_or(|tour| distance < tour.distance) {
            *best = Some(Tour {
                route: route.clone(),
                distance,
            });
        }
        return;
    }
    for city in 0..n {
        if route.contains(&city) {
            continue;
        }
        route.push(city);
        enumerate_tours(matrix, route, best);
        route.pop();
    }
}
