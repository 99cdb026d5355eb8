//! bfs-animator
//!
//! Breadth-first search engines that narrate their progress as events, and
//! the newline-delimited JSON transport that carries those events to a
//! renderer.

pub mod traits;
pub mod error;
pub mod config;
pub mod grid;
pub mod path;
pub mod event;
pub mod maze;
pub mod tsp;
pub mod euclidean;
pub mod request;
pub mod stream;
pub mod view;
pub mod client;
pub mod server;
