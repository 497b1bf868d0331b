use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{BowtieError, Result};
use crate::graph::digraph::{DiGraph, NodeKey};

/// Heap entry ordered by accumulated cost, then by a monotonically
/// increasing sequence number so node keys are never compared.
#[derive(Debug, Clone)]
pub struct HeapEntry<N> {
    pub cost: f64,
    pub seq: u64,
    pub node: N,
}

impl<N> PartialEq for HeapEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl<N> Eq for HeapEntry<N> {}

impl<N> PartialOrd for HeapEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for HeapEntry<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Heap costs are always finite (infinite-cost edges are skipped),
        // so partial_cmp cannot observe a NaN here.
        self.cost
            .partial_cmp(&other.cost)
            .unwrap()
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Distances and explicit paths from a single-source run.
#[derive(Debug, Clone)]
pub struct ShortestPaths<N: NodeKey> {
    /// Minimum cost to each reachable node.
    pub dist: HashMap<N, f64>,
    /// One minimum-cost node sequence per reachable node, source first.
    pub paths: HashMap<N, Vec<N>>,
}

/// Options for the multi-source/multi-target search.
#[derive(Debug, Clone)]
pub struct MultiSourceOptions<N> {
    /// Halt early once every listed target has been finalized.
    pub targets: Option<Vec<N>>,
    /// Prune frontier expansion beyond this accumulated cost.
    pub cutoff: Option<f64>,
    /// Record predecessor lists, appending on exact-cost ties.
    pub track_pred: bool,
    /// Record one explicit shortest path per settled node.
    pub track_paths: bool,
}

impl<N> Default for MultiSourceOptions<N> {
    fn default() -> Self {
        MultiSourceOptions {
            targets: None,
            cutoff: None,
            track_pred: false,
            track_paths: false,
        }
    }
}

/// Result of a multi-source/multi-target search.
#[derive(Debug, Clone)]
pub struct MultiSourceResult<N: NodeKey> {
    pub dist: HashMap<N, f64>,
    pub paths: Option<HashMap<N, Vec<N>>>,
    pub pred: Option<HashMap<N, Vec<N>>>,
}

fn contradiction<N: NodeKey>(from: &N, to: &N) -> BowtieError {
    BowtieError::ContradictoryPath {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Single-source Dijkstra over non-negative weights.
///
/// Returns the minimum cost and one minimum-cost path for every node
/// reachable from `source` via outgoing edges; ties keep the first-found
/// path. Self-loops are ignored and non-finite weights are treated as
/// absent edges. A relaxation that would lower the distance of an
/// already-finalized node fails fast with `ContradictoryPath`.
pub fn single_source<N: NodeKey>(graph: &DiGraph<N>, source: &N) -> Result<ShortestPaths<N>> {
    if !graph.contains_node(source) {
        return Err(BowtieError::NodeNotFound(source.to_string()));
    }

    let mut dist: HashMap<N, f64> = HashMap::new();
    let mut seen: HashMap<N, f64> = HashMap::new();
    let mut paths: HashMap<N, Vec<N>> = HashMap::new();
    let mut fringe: BinaryHeap<Reverse<HeapEntry<N>>> = BinaryHeap::new();
    let mut seq = 0u64;

    seen.insert(source.clone(), 0.0);
    paths.insert(source.clone(), vec![source.clone()]);
    fringe.push(Reverse(HeapEntry {
        cost: 0.0,
        seq,
        node: source.clone(),
    }));

    while let Some(Reverse(HeapEntry { cost, node, .. })) = fringe.pop() {
        if dist.contains_key(&node) {
            continue; // already finalized
        }
        dist.insert(node.clone(), cost);

        for (next, weight) in graph.out_edges(&node) {
            if next == &node || !weight.is_finite() {
                continue;
            }
            let next_cost = cost + weight;
            if let Some(&finalized) = dist.get(next) {
                if next_cost < finalized {
                    return Err(contradiction(&node, next));
                }
                continue;
            }
            if seen.get(next).map_or(true, |&s| next_cost < s) {
                seen.insert(next.clone(), next_cost);
                let mut path = paths[&node].clone();
                path.push(next.clone());
                paths.insert(next.clone(), path);
                seq += 1;
                fringe.push(Reverse(HeapEntry {
                    cost: next_cost,
                    seq,
                    node: next.clone(),
                }));
            }
        }
    }

    paths.retain(|node, _| dist.contains_key(node));
    Ok(ShortestPaths { dist, paths })
}

/// Multi-source, optionally multi-target Dijkstra.
///
/// All sources start at distance 0, so each settled node's distance is
/// the minimum over every source. With `targets` set, the search halts
/// the moment the last requested target is finalized; with `cutoff`,
/// frontier entries beyond the cutoff cost are pruned. Predecessor
/// tracking records every tied predecessor, not just the first.
pub fn multi_source<N: NodeKey>(
    graph: &DiGraph<N>,
    sources: &[N],
    opts: &MultiSourceOptions<N>,
) -> Result<MultiSourceResult<N>> {
    for source in sources {
        if !graph.contains_node(source) {
            return Err(BowtieError::NodeNotFound(source.to_string()));
        }
    }

    let mut dist: HashMap<N, f64> = HashMap::new();
    let mut seen: HashMap<N, f64> = HashMap::new();
    let mut paths: Option<HashMap<N, Vec<N>>> = opts.track_paths.then(HashMap::new);
    let mut pred: Option<HashMap<N, Vec<N>>> = opts.track_pred.then(HashMap::new);
    let mut pending: Option<HashSet<&N>> = opts
        .targets
        .as_ref()
        .map(|targets| targets.iter().collect());
    let mut fringe: BinaryHeap<Reverse<HeapEntry<N>>> = BinaryHeap::new();
    let mut seq = 0u64;

    for source in sources {
        seen.insert(source.clone(), 0.0);
        if let Some(paths) = paths.as_mut() {
            paths.insert(source.clone(), vec![source.clone()]);
        }
        fringe.push(Reverse(HeapEntry {
            cost: 0.0,
            seq,
            node: source.clone(),
        }));
        seq += 1;
    }

    while let Some(Reverse(HeapEntry { cost, node, .. })) = fringe.pop() {
        if dist.contains_key(&node) {
            continue;
        }
        dist.insert(node.clone(), cost);

        if let Some(pending) = pending.as_mut() {
            pending.remove(&node);
            if pending.is_empty() {
                break;
            }
        }

        for (next, weight) in graph.out_edges(&node) {
            if next == &node || !weight.is_finite() {
                continue;
            }
            let next_cost = cost + weight;
            if let Some(cutoff) = opts.cutoff {
                if next_cost > cutoff {
                    continue;
                }
            }
            if let Some(&finalized) = dist.get(next) {
                if next_cost < finalized {
                    return Err(contradiction(&node, next));
                }
                if let Some(pred) = pred.as_mut() {
                    if next_cost == finalized {
                        pred.entry(next.clone()).or_default().push(node.clone());
                    }
                }
                continue;
            }
            match seen.get(next) {
                Some(&s) if next_cost == s => {
                    if let Some(pred) = pred.as_mut() {
                        pred.entry(next.clone()).or_default().push(node.clone());
                    }
                }
                Some(&s) if next_cost > s => {}
                _ => {
                    seen.insert(next.clone(), next_cost);
                    if let Some(paths) = paths.as_mut() {
                        let mut path = paths[&node].clone();
                        path.push(next.clone());
                        paths.insert(next.clone(), path);
                    }
                    if let Some(pred) = pred.as_mut() {
                        pred.insert(next.clone(), vec![node.clone()]);
                    }
                    seq += 1;
                    fringe.push(Reverse(HeapEntry {
                        cost: next_cost,
                        seq,
                        node: next.clone(),
                    }));
                }
            }
        }
    }

    if let Some(paths) = paths.as_mut() {
        paths.retain(|node, _| dist.contains_key(node));
    }
    Ok(MultiSourceResult { dist, paths, pred })
}
