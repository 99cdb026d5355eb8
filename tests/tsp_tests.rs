//! TSP engine tests
//!
//! Known instances, event ordering, and the running-best invariants checked
//! against exhaustive enumeration.

mod fixtures;

use proptest::prelude::*;

use bfs_animator::config::Limits;
use bfs_animator::event::TspEvent;
use bfs_animator::request::TspRequest;
use bfs_animator::tsp::{City, TspSearch, optimal_tour};
use bfs_animator::view::TspView;

use fixtures::{right_triangle, scrambled_hexagon};

// ============================================================================
// Helpers
// ============================================================================

fn done(events: &[TspEvent]) -> (Vec<usize>, f64, usize) {
    match events.last() {
        Some(TspEvent::Done {
            best_route,
            best_distance,
            leaves,
            ..
        }) => (best_route.clone(), *best_distance, *leaves),
        other => panic!("stream must end with done, got {:?}", other),
    }
}

fn factorial(n: usize) -> usize {
    (1..=n).product()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn right_triangle_perimeter() {
    let events: Vec<_> = TspSearch::new(&right_triangle()).collect();
    let (route, distance, leaves) = done(&events);

    let perimeter = 20.0 + 200f64.sqrt();
    assert!((distance - perimeter).abs() < 1e-9, "got {}", distance);
    assert!((distance - 34.14).abs() < 0.01);
    assert_eq!(route.len(), 3);
    assert_eq!(route[0], 0);
    assert_eq!(leaves, 2);
}

#[test]
fn single_city_finishes_without_expansion() {
    let events: Vec<_> = TspSearch::new(&[City::new(0, 1.0, 2.0)]).collect();
    let (route, distance, _) = done(&events);

    assert_eq!(route, vec![0]);
    assert_eq!(distance, 0.0);
    assert!(!events.iter().any(|event| matches!(event, TspEvent::Expand { .. })));
}

#[test]
fn hexagon_best_tour_is_the_perimeter() {
    let cities = scrambled_hexagon();
    let events: Vec<_> = TspSearch::new(&cities).collect();
    let (route, distance, leaves) = done(&events);

    assert!((distance - 60.0).abs() < 1e-9, "hexagon side 10, got {}", distance);
    assert_eq!(leaves, factorial(5));
    assert_eq!(Some(route), optimal_tour(&cities).map(|tour| tour.route));
}

#[test]
fn validated_request_runs() {
    let request = TspRequest {
        cities: right_triangle(),
    };
    let events: Vec<_> = request
        .into_search(&Limits::default())
        .unwrap()
        .collect();
    assert!(events.last().unwrap().best_distance().is_some());
}

// ============================================================================
// Event ordering
// ============================================================================

#[test]
fn state_count_matches_decision_tree() {
    let cities: Vec<City> = (0..5).map(|id| City::new(id, id as f64, 0.0)).collect();
    let events: Vec<_> = TspSearch::new(&cities).collect();

    // Routes of length k: 4!/(5-k)!, for k = 1..=5.
    let states = 1 + 4 + 12 + 24 + 24;
    let processing = events
        .iter()
        .filter(|event| matches!(event, TspEvent::Processing { .. }))
        .count();
    let expands = events
        .iter()
        .filter(|event| matches!(event, TspEvent::Expand { .. }))
        .count();

    assert_eq!(processing, states);
    assert_eq!(expands, states - 1);
}

#[test]
fn expands_follow_their_parent() {
    let events: Vec<_> = TspSearch::new(&scrambled_hexagon()).collect();

    let mut current: Option<Vec<usize>> = None;
    for event in &events {
        match event {
            TspEvent::Processing { route, .. } => current = Some(route.clone()),
            TspEvent::Expand {
                parent_path,
                route,
                child_city,
                ..
            } => {
                assert_eq!(Some(parent_path), current.as_ref());
                assert_eq!(&route[..parent_path.len()], parent_path.as_slice());
                assert_eq!(route.last(), Some(child_city));
                assert!(!parent_path.contains(child_city));
            }
            TspEvent::Leaf { route, .. } => {
                assert_eq!(Some(route), current.as_ref());
            }
            TspEvent::Done { .. } => {}
        }
    }
}

#[test]
fn exactly_one_terminal_event_and_it_is_last() {
    for cities in [right_triangle(), scrambled_hexagon(), vec![City::new(0, 3.0, 4.0)]] {
        let events: Vec<_> = TspSearch::new(&cities).collect();
        let terminal = events
            .iter()
            .filter(|event| matches!(event, TspEvent::Done { .. }))
            .count();
        assert_eq!(terminal, 1);
        assert!(matches!(events.last(), Some(TspEvent::Done { .. })));
    }
}

#[test]
fn routes_processed_in_level_order() {
    let events: Vec<_> = TspSearch::new(&scrambled_hexagon()).collect();
    let lengths: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            TspEvent::Processing { route, .. } => Some(route.len()),
            _ => None,
        })
        .collect();
    assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn best_distance_absent_until_first_leaf() {
    let events: Vec<_> = TspSearch::new(&scrambled_hexagon()).collect();
    let first_leaf = events
        .iter()
        .position(|event| matches!(event, TspEvent::Leaf { .. }))
        .unwrap();
    assert!(events[..first_leaf].iter().all(|event| event.best_distance().is_none()));
    assert!(events[first_leaf..].iter().all(|event| event.best_distance().is_some()));
}

#[test]
fn view_tracks_the_running_best() {
    let cities = scrambled_hexagon();
    let mut view = TspView::new();
    for event in TspSearch::new(&cities) {
        view.apply(&event);
    }
    assert!(view.finished);
    assert_eq!(view.leaves, 120);
    assert_eq!(view.best_history.last().copied(), view.best_distance);
    assert_eq!(
        view.best_route,
        optimal_tour(&cities).map(|tour| tour.route)
    );
}

// ============================================================================
// Properties
// ============================================================================

fn arb_cities() -> impl Strategy<Value = Vec<City>> {
    prop::collection::vec((-50i32..50, -50i32..50), 1..=6).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(id, (x, y))| City::new(id, f64::from(x), f64::from(y)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_done_matches_exhaustive_optimum(cities in arb_cities()) {
        let events: Vec<_> = TspSearch::new(&cities).collect();
        let (route, distance, leaves) = done(&events);
        let optimum = optimal_tour(&cities).unwrap();

        prop_assert_eq!(leaves, factorial(cities.len() - 1));
        prop_assert_eq!(distance, optimum.distance);
        prop_assert_eq!(route, optimum.route);
    }

    #[test]
    fn prop_best_distance_is_running_minimum(cities in arb_cities()) {
        let mut seen_min: Option<f64> = None;
        let mut last_best: Option<f64> = None;
        for event in TspSearch::new(&cities) {
            if let TspEvent::Leaf { distance, is_best, .. } = &event {
                let improves = seen_min.is_none_or(|min| *distance < min);
                prop_assert_eq!(*is_best, improves);
                if improves {
                    seen_min = Some(*distance);
                }
            }
            if let Some(best) = event.best_distance() {
                if let Some(previous) = last_best {
                    prop_assert!(best <= previous);
                }
                prop_assert_eq!(Some(best), seen_min);
                last_best = Some(best);
            }
        }
    }
}
