//! Greedy pathway builder
//!
//! Iteratively stitches cheapest shortest paths between the connected
//! pathway and the still-unvisited endpoint nodes until every source and
//! target is merged in or no connecting path remains.

use std::time::{Duration, Instant};

use indexmap::IndexSet;
use serde::Serialize;

use crate::error::{BowtieError, Result};
use crate::graph::digraph::{DiGraph, NodeKey};
use crate::graph::weight::{self, WeightMode};
use crate::matrix::DistanceMatrix;

/// Options for a reconstruction run.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Abort with `DeadlineExceeded` once this much wall time has
    /// elapsed, instead of returning a partial pathway as if complete.
    pub deadline: Option<Duration>,
}

/// The reconstructed pathway subgraph.
///
/// Nodes start as source ∪ target; edges are unioned in one merged path
/// at a time. Both collections are append-only sets, so re-merging a
/// path is a no-op.
#[derive(Debug, Clone, Serialize)]
pub struct Pathway<N: NodeKey> {
    nodes: IndexSet<N>,
    edges: IndexSet<(N, N)>,
}

impl<N: NodeKey> Default for Pathway<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> Pathway<N> {
    pub fn new() -> Self {
        Pathway {
            nodes: IndexSet::new(),
            edges: IndexSet::new(),
        }
    }

    pub fn add_node(&mut self, node: N) {
        self.nodes.insert(node);
    }

    /// Union the directed edges along consecutive path nodes into the
    /// pathway. Idempotent per edge and per node.
    pub fn merge_path(&mut self, path: &[N]) {
        for node in path {
            self.nodes.insert(node.clone());
        }
        for pair in path.windows(2) {
            self.edges.insert((pair[0].clone(), pair[1].clone()));
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.edges.iter().map(|(from, to)| (from, to))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        self.edges
            .iter()
            .any(|(f, t)| f == from && t == to)
    }
}

/// Outcome of a reconstruction run.
#[derive(Debug, Clone, Serialize)]
pub struct Reconstruction<N: NodeKey> {
    pub pathway: Pathway<N>,
    /// Endpoint nodes the loop could not connect; empty on full
    /// connection.
    pub unconnected: Vec<N>,
}

impl<N: NodeKey> Reconstruction<N> {
    pub fn is_connected(&self) -> bool {
        self.unconnected.is_empty()
    }
}

/// A path selected for merging: the matrix entry's node sequence plus
/// the winning orientation it was recorded under.
#[derive(Debug, Clone)]
struct Selected<N> {
    path: Vec<N>,
    from: N,
    to: N,
    cost: f64,
}

/// Drives the iterative two-phase node-visitation loop.
///
/// Owns the distance matrix, both visitation sets and the accumulating
/// pathway for the duration of one `build` call; nothing outlives it.
pub struct PathwayBuilder<'g, N: NodeKey> {
    graph: &'g DiGraph<N>,
    reversed: DiGraph<N>,
    sources: Vec<N>,
    targets: Vec<N>,
    endpoints: IndexSet<N>,
    visited: IndexSet<N>,
    not_visited: IndexSet<N>,
    matrix: DistanceMatrix<N>,
    pathway: Pathway<N>,
}

impl<'g, N: NodeKey> PathwayBuilder<'g, N> {
    /// Duplicate ids within either endpoint list are dropped, keeping
    /// first occurrence. The pathway starts with every endpoint node.
    pub fn new(graph: &'g DiGraph<N>, sources: Vec<N>, targets: Vec<N>) -> Self {
        let sources: Vec<N> = dedup(sources);
        let targets: Vec<N> = dedup(targets);

        let mut endpoints: IndexSet<N> = IndexSet::new();
        let mut pathway = Pathway::new();
        for node in sources.iter().chain(targets.iter()) {
            endpoints.insert(node.clone());
            pathway.add_node(node.clone());
        }

        PathwayBuilder {
            graph,
            reversed: graph.reversed(),
            not_visited: endpoints.clone(),
            sources,
            targets,
            endpoints,
            visited: IndexSet::new(),
            matrix: DistanceMatrix::new(),
            pathway,
        }
    }

    /// Run the reconstruction to completion.
    #[tracing::instrument(skip(self, opts), fields(
        sources = self.sources.len(),
        targets = self.targets.len(),
        nodes = self.graph.node_count(),
        edges = self.graph.edge_count(),
    ))]
    pub fn build(mut self, opts: &BuildOptions) -> Result<Reconstruction<N>> {
        let start = Instant::now();
        self.seed()?;
        self.consume_overlaps();

        while !self.not_visited.is_empty() {
            if let Some(limit) = opts.deadline {
                if start.elapsed() > limit {
                    return Err(BowtieError::DeadlineExceeded {
                        elapsed_secs: start.elapsed().as_secs_f64(),
                    });
                }
            }

            let Some(selected) = self.select() else {
                tracing::info!(
                    unconnected = self.not_visited.len(),
                    "no path between the remaining sources and targets; returning partial pathway"
                );
                break;
            };
            tracing::debug!(
                from = %selected.from,
                to = %selected.to,
                cost = selected.cost,
                hops = selected.path.len().saturating_sub(1),
                "merge_path"
            );
            self.merge(selected)?;
        }

        let unconnected: Vec<N> = self.not_visited.iter().cloned().collect();
        Ok(Reconstruction {
            pathway: self.pathway,
            unconnected,
        })
    }

    /// Seed the matrix with every (source, target) pair, one
    /// single-source run per source filling a whole row.
    fn seed(&mut self) -> Result<()> {
        for source in &self.sources {
            self.matrix.seed_row(self.graph, source, &self.targets)?;
        }
        Ok(())
    }

    /// A node that is both source and target is its own trivial pathway:
    /// consume its zero-cost self entry and mark it visited up front.
    fn consume_overlaps(&mut self) {
        let overlaps: Vec<N> = self
            .sources
            .iter()
            .filter(|s| self.targets.contains(s))
            .cloned()
            .collect();
        for node in overlaps {
            if self
                .matrix
                .get(&node, &node)
                .is_some_and(|entry| entry.is_reachable())
            {
                self.matrix.tombstone(&node, &node);
                self.not_visited.shift_remove(&node);
                self.visited.insert(node);
            }
        }
    }

    /// Pick the next path to merge: Phase A (visited to unvisited) wins
    /// over Phase B (unvisited to unvisited), which only runs when Phase
    /// A finds nothing finite.
    fn select(&self) -> Option<Selected<N>> {
        self.phase_a().or_else(|| self.phase_b())
    }

    /// Phase A: cheapest recorded path bridging the visited component
    /// and an unvisited node, either orientation. Scan order is the
    /// insertion order of both sets, `(visited, unvisited)` orientation
    /// checked first; strict comparison keeps the first minimum found.
    fn phase_a(&self) -> Option<Selected<N>> {
        let mut best: Option<Selected<N>> = None;
        for v in &self.visited {
            for n in &self.not_visited {
                self.consider(v, n, &mut best);
                self.consider(n, v, &mut best);
            }
        }
        best
    }

    /// Phase B: cheapest recorded path between two unvisited nodes.
    /// Pairs scan in index order, `(i, j)` orientation before `(j, i)`.
    fn phase_b(&self) -> Option<Selected<N>> {
        let mut best: Option<Selected<N>> = None;
        for (i, a) in self.not_visited.iter().enumerate() {
            for b in self.not_visited.iter().skip(i + 1) {
                self.consider(a, b, &mut best);
                self.consider(b, a, &mut best);
            }
        }
        best
    }

    fn consider(&self, from: &N, to: &N, best: &mut Option<Selected<N>>) {
        let Some(entry) = self.matrix.get(from, to) else {
            return;
        };
        let current_min = best.as_ref().map_or(f64::INFINITY, |b| b.cost);
        if entry.cost < current_min {
            *best = Some(Selected {
                path: entry.path.clone(),
                from: from.clone(),
                to: to.clone(),
                cost: entry.cost,
            });
        }
    }

    /// Consume the selected entry: tombstone it, move the path's nodes
    /// into the visited set, drop its endpoints from the unvisited set,
    /// refresh the matrix around new intermediates and union the path's
    /// edges into the pathway.
    fn merge(&mut self, selected: Selected<N>) -> Result<()> {
        self.matrix.tombstone(&selected.from, &selected.to);

        self.not_visited.shift_remove(&selected.from);
        self.not_visited.shift_remove(&selected.to);
        for node in &selected.path {
            self.visited.insert(node.clone());
        }

        self.refresh(&selected.path)?;
        self.pathway.merge_path(&selected.path);
        Ok(())
    }

    /// Re-ground future searches around every newly merged intermediate:
    /// refresh its row against all targets, its column against all
    /// sources, and tombstone its self pair.
    fn refresh(&mut self, path: &[N]) -> Result<()> {
        for node in path {
            if self.endpoints.contains(node) {
                continue;
            }
            self.matrix.refresh_row(self.graph, node, &self.targets)?;
            self.matrix
                .refresh_column(&self.reversed, &self.sources, node)?;
            self.matrix.tombstone(node, node);
        }
        Ok(())
    }
}

fn dedup<N: NodeKey>(nodes: Vec<N>) -> Vec<N> {
    let set: IndexSet<N> = nodes.into_iter().collect();
    set.into_iter().collect()
}

/// Normalize the graph's weights for the classified mode, then run the
/// full reconstruction.
pub fn reconstruct<N: NodeKey>(
    graph: &mut DiGraph<N>,
    mode: WeightMode,
    sources: Vec<N>,
    targets: Vec<N>,
    opts: &BuildOptions,
) -> Result<Reconstruction<N>> {
    weight::normalize(graph, mode);
    PathwayBuilder::new(graph, sources, targets).build(opts)
}

#[cfg(test)]
mod tests;
