//! Distance matrix: best-known shortest distance and path per node pair
//!
//! Seeded for every (source, target) pair up front, then refreshed
//! incrementally as intermediate nodes are merged into the pathway.
//! Consumed entries are tombstoned: overwritten with the infinite
//! distance marker rather than deleted. Only a refresh recomputation
//! may replace an entry; lookups never do.

use std::collections::HashMap;

use crate::error::Result;
use crate::graph::algos::dijkstra::{self, MultiSourceOptions};
use crate::graph::digraph::{DiGraph, NodeKey};

/// Best-known distance and explicit path for one ordered node pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DistEntry<N> {
    pub cost: f64,
    pub path: Vec<N>,
}

impl<N> DistEntry<N> {
    /// No path, or a consumed (tombstoned) entry.
    pub fn unreachable() -> Self {
        DistEntry {
            cost: f64::INFINITY,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Mutable table of `(from, to) -> DistEntry`, stored row-major.
#[derive(Debug, Clone)]
pub struct DistanceMatrix<N: NodeKey> {
    rows: HashMap<N, HashMap<N, DistEntry<N>>>,
}

impl<N: NodeKey> Default for DistanceMatrix<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> DistanceMatrix<N> {
    pub fn new() -> Self {
        DistanceMatrix {
            rows: HashMap::new(),
        }
    }

    pub fn get(&self, from: &N, to: &N) -> Option<&DistEntry<N>> {
        self.rows.get(from).and_then(|row| row.get(to))
    }

    pub fn insert(&mut self, from: N, to: N, entry: DistEntry<N>) {
        self.rows.entry(from).or_default().insert(to, entry);
    }

    /// Overwrite a pair with the unreachable marker. Inserts the marker
    /// even when the pair was never recorded.
    pub fn tombstone(&mut self, from: &N, to: &N) {
        self.insert(from.clone(), to.clone(), DistEntry::unreachable());
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.values().all(HashMap::is_empty)
    }

    /// Recompute a single pair: reachability check first, then one
    /// single-source run recording `(distance, path)` or the unreachable
    /// marker.
    pub fn update_pair(&mut self, graph: &DiGraph<N>, from: &N, to: &N) -> Result<()> {
        if !graph.has_path(from, to) {
            self.tombstone(from, to);
            return Ok(());
        }
        let shortest = dijkstra::single_source(graph, from)?;
        let entry = match (shortest.dist.get(to), shortest.paths.get(to)) {
            // Reachable by edges but not by finite-cost edges (all
            // connecting edges impassable).
            (None, _) | (_, None) => DistEntry::unreachable(),
            (Some(&cost), Some(path)) => DistEntry {
                cost,
                path: path.clone(),
            },
        };
        self.insert(from.clone(), to.clone(), entry);
        Ok(())
    }

    /// Fill the whole `(source, *)` row for the given column nodes with
    /// one single-source run.
    pub fn seed_row(&mut self, graph: &DiGraph<N>, source: &N, columns: &[N]) -> Result<()> {
        let shortest = dijkstra::single_source(graph, source)?;
        for column in columns {
            let entry = match (shortest.dist.get(column), shortest.paths.get(column)) {
                (Some(&cost), Some(path)) => DistEntry {
                    cost,
                    path: path.clone(),
                },
                _ => DistEntry::unreachable(),
            };
            self.insert(source.clone(), column.clone(), entry);
        }
        Ok(())
    }

    /// Refresh `(node, t)` for every `t` in `columns` with one forward
    /// multi-target run from `node`.
    pub fn refresh_row(&mut self, graph: &DiGraph<N>, node: &N, columns: &[N]) -> Result<()> {
        let opts = MultiSourceOptions {
            targets: Some(columns.to_vec()),
            track_paths: true,
            ..Default::default()
        };
        let result = dijkstra::multi_source(graph, std::slice::from_ref(node), &opts)?;
        let paths = result.paths.unwrap_or_default();
        for column in columns {
            let entry = match (result.dist.get(column), paths.get(column)) {
                (Some(&cost), Some(path)) => DistEntry {
                    cost,
                    path: path.clone(),
                },
                _ => DistEntry::unreachable(),
            };
            self.insert(node.clone(), column.clone(), entry);
        }
        Ok(())
    }

    /// Refresh `(s, node)` for every `s` in `rows` with one multi-target
    /// run from `node` over the edge-flipped graph. Paths come out
    /// reversed and are flipped back before insertion.
    pub fn refresh_column(
        &mut self,
        reversed_graph: &DiGraph<N>,
        rows: &[N],
        node: &N,
    ) -> Result<()> {
        let opts = MultiSourceOptions {
            targets: Some(rows.to_vec()),
            track_paths: true,
            ..Default::default()
        };
        let result = dijkstra::multi_source(reversed_graph, std::slice::from_ref(node), &opts)?;
        let paths = result.paths.unwrap_or_default();
        for row in rows {
            let entry = match (result.dist.get(row), paths.get(row)) {
                (Some(&cost), Some(path)) => {
                    let mut path = path.clone();
                    path.reverse();
                    DistEntry { cost, path }
                }
                _ => DistEntry::unreachable(),
            };
            self.insert(row.clone(), node.clone(), entry);
        }
        Ok(())
    }
}
