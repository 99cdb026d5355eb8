//! Event records streamed by the two search engines.
//!
//! Both enums are internally tagged on `type` with camelCase field names, so
//! each serializes to one self-describing JSON object per line.

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::path::GridPath;
use crate::traits::SearchEvent;

/// Progress of a maze run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MazeEvent {
    /// The frontier head is being expanded.
    #[serde(rename_all = "camelCase")]
    Visit {
        path: GridPath,
        cell: Position,
        message: String,
    },
    /// A newly discovered neighbour was appended to `parent_path`.
    #[serde(rename_all = "camelCase")]
    Expand {
        parent_path: GridPath,
        path: GridPath,
        child_node: Position,
        message: String,
    },
    /// The end cell was reached along `path`.
    #[serde(rename_all = "camelCase")]
    Leaf {
        path: GridPath,
        length: usize,
        is_solution: bool,
        message: String,
    },
    /// Final event of every run.
    #[serde(rename_all = "camelCase")]
    Complete {
        success: bool,
        path: GridPath,
        length: usize,
        message: String,
    },
}

impl SearchEvent for MazeEvent {
    fn is_terminal(&self) -> bool {
        matches!(self, MazeEvent::Complete { .. })
    }
}

/// Progress of a TSP state-space run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TspEvent {
    /// A route was taken off the frontier.
    #[serde(rename_all = "camelCase")]
    Processing {
        route: Vec<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        best_distance: Option<f64>,
        message: String,
    },
    /// `route` was discovered by appending `child_city` to `parent_path`.
    #[serde(rename_all = "camelCase")]
    Expand {
        parent_path: Vec<usize>,
        route: Vec<usize>,
        child_city: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        best_distance: Option<f64>,
    },
    /// A complete tour was evaluated. `best_distance` already accounts for it.
    #[serde(rename_all = "camelCase")]
    Leaf {
        route: Vec<usize>,
        distance: f64,
        is_best: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        best_distance: Option<f64>,
        message: String,
    },
    /// Final event of every run.
    #[serde(rename_all = "camelCase")]
    Done {
        best_route: Vec<usize>,
        best_distance: f64,
        leaves: usize,
        message: String,
    },
}

impl TspEvent {
    /// The running best carried by this event, if any.
    pub fn best_distance(&self) -> Option<f64> {
        match self {
            TspEvent::Processing { best_distance, .. }
            | TspEvent::Expand { best_distance, .. }
            | TspEvent::Leaf { best_distance, .. } => *best_distance,
            TspEvent::Done { best_distance, .. } => Some(*best_distance),
        }
    }
}

impl SearchEvent for TspEvent {
    fn is_terminal(&self) -> bool {
        matches!(self, TspEvent::Done { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_maze_expand_field_names() {
        let event = MazeEvent::Expand {
            parent_path: GridPath::single(Position::new(0, 0)),
            path: GridPath::new(vec![Position::new(0, 0), Position::new(0, 1)]),
            child_node: Position::new(0, 1),
            message: "Discovered (0, 1)".to_string(),
        };
        let value: Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "expand");
        assert_eq!(value["parentPath"], json!([[0, 0]]));
        assert_eq!(value["childNode"], json!([0, 1]));
    }

    #[test]
    fn test_maze_complete_failure_shape() {
        let event = MazeEvent::Complete {
            success: false,
            path: GridPath::default(),
            length: 0,
            message: "No path".to_string(),
        };
        let value: Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "complete");
        assert_eq!(value["success"], false);
        assert_eq!(value["path"], json!([]));
        assert!(event.is_terminal());
    }

    #[test]
    fn test_tsp_best_distance_omitted_until_known() {
        let event = TspEvent::Processing {
            route: vec![0],
            best_distance: None,
            message: "Processing [0]".to_string(),
        };
        let value: Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "processing");
        assert!(value.get("bestDistance").is_none());
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_tsp_decodes_null_best_distance() {
        let line = r#"{"type":"expand","parentPath":[0],"route":[0,2],"childCity":2,"bestDistance":null}"#;
        let event: TspEvent = serde_json::from_str(line).unwrap();
        assert_eq!(
            event,
            TspEvent::Expand {
                parent_path: vec![0],
                route: vec![0, 2],
                child_city: 2,
                best_distance: None,
            }
        );
    }

    #[test]
    fn test_tsp_leaf_field_names() {
        let event = TspEvent::Leaf {
            route: vec![0, 1, 2],
            distance: 12.5,
            is_best: true,
            best_distance: Some(12.5),
            message: "Tour complete".to_string(),
        };
        let value: Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["isBest"], true);
        assert_eq!(value["bestDistance"], 12.5);
        assert_eq!(event.best_distance(), Some(12.5));
    }
}
