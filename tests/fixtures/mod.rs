//! Test fixtures for bfs-animator.
//!
//! Provides:
//! - ASCII maze layouts with marked start/end cells
//! - Small city sets with known optimal tours

#![allow(dead_code)]

pub mod layouts;

pub use layouts::*;
