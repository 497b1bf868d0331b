//! Shortest-path algorithm implementations
//!
//! - `dijkstra`: single-source and multi-source/multi-target weighted
//!   shortest paths with explicit path reconstruction

pub mod dijkstra;

pub use dijkstra::{multi_source, single_source};
