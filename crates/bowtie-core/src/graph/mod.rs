//! Weighted directed graph and shortest-path operations
//!
//! Provides the network representation the pathway builder runs over:
//! - adjacency-map directed graph with in-place weight rewriting
//! - weight-mode classification and normalization
//! - Dijkstra shortest paths (single-source and multi-source/multi-target)

pub mod algos;
pub mod digraph;
pub mod weight;

pub use algos::dijkstra::{
    multi_source, single_source, MultiSourceOptions, MultiSourceResult, ShortestPaths,
};
pub use digraph::{DiGraph, InputEdge, NodeKey};
pub use weight::{normalize, WeightMode};
