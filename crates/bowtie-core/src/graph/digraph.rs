use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// Key type for graph nodes.
///
/// Blanket-implemented for anything cloneable, hashable and printable;
/// the CLI instantiates the whole core with `String`.
pub trait NodeKey: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

impl<T: Clone + Eq + Hash + fmt::Debug + fmt::Display> NodeKey for T {}

/// One parsed edge record.
///
/// `weight` is `None` when the input carried no weight column; insertion
/// into a [`DiGraph`] defaults it to 1.0. The `Option` is what lets the
/// weight-mode classifier tell an unweighted input apart from an input
/// that explicitly lists all-ones weights.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEdge<N> {
    pub from: N,
    pub to: N,
    pub weight: Option<f64>,
}

impl<N> InputEdge<N> {
    pub fn new(from: N, to: N, weight: Option<f64>) -> Self {
        InputEdge { from, to, weight }
    }
}

/// Adjacency-map weighted directed graph.
///
/// Out-edge iteration follows insertion order, which downstream scan
/// tie-breaks depend on. Duplicate `(from, to)` pairs overwrite the
/// earlier weight (last write wins); parallel edges are not modeled.
#[derive(Debug, Clone)]
pub struct DiGraph<N: NodeKey> {
    nodes: IndexSet<N>,
    adjacency: IndexMap<N, IndexMap<N, f64>>,
}

impl<N: NodeKey> Default for DiGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> DiGraph<N> {
    pub fn new() -> Self {
        DiGraph {
            nodes: IndexSet::new(),
            adjacency: IndexMap::new(),
        }
    }

    /// Build a graph from parsed edge records plus standalone nodes
    /// (sources and targets may not appear on any edge).
    pub fn from_input(edges: &[InputEdge<N>], standalone: impl IntoIterator<Item = N>) -> Self {
        let mut graph = DiGraph::new();
        for edge in edges {
            graph.add_edge(edge.from.clone(), edge.to.clone(), edge.weight.unwrap_or(1.0));
        }
        for node in standalone {
            graph.add_node(node);
        }
        graph
    }

    pub fn add_node(&mut self, node: N) {
        self.nodes.insert(node);
    }

    pub fn add_edge(&mut self, from: N, to: N, weight: f64) {
        self.nodes.insert(from.clone());
        self.nodes.insert(to.clone());
        self.adjacency.entry(from).or_default().insert(to, weight);
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexMap::len).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    /// Outgoing `(neighbor, weight)` pairs for a node, in insertion order.
    /// Empty for unknown nodes.
    pub fn out_edges(&self, node: &N) -> impl Iterator<Item = (&N, f64)> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|succ| succ.iter().map(|(n, w)| (n, *w)))
    }

    /// All `(from, to, weight)` triples in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, f64)> {
        self.adjacency
            .iter()
            .flat_map(|(from, succ)| succ.iter().map(move |(to, w)| (from, to, *w)))
    }

    /// Whether a directed path from `from` to `to` exists, ignoring
    /// weights. False when either node is absent.
    pub fn has_path(&self, from: &N, to: &N) -> bool {
        if !self.contains_node(from) || !self.contains_node(to) {
            return false;
        }
        if from == to {
            return true;
        }
        let mut visited: HashSet<&N> = HashSet::new();
        let mut queue: VecDeque<&N> = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);
        while let Some(current) = queue.pop_front() {
            for (next, _) in self.out_edges(current) {
                if next == to {
                    return true;
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Edge-flipped copy. Node set is preserved, including isolated nodes.
    pub fn reversed(&self) -> Self {
        let mut reversed = DiGraph::new();
        for node in &self.nodes {
            reversed.add_node(node.clone());
        }
        for (from, to, weight) in self.edges() {
            reversed.add_edge(to.clone(), from.clone(), weight);
        }
        reversed
    }

    /// Rewrite every edge weight in place.
    pub fn rewrite_weights(&mut self, f: impl Fn(f64) -> f64) {
        for succ in self.adjacency.values_mut() {
            for weight in succ.values_mut() {
                *weight = f(*weight);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, weight: Option<f64>) -> InputEdge<String> {
        InputEdge::new(from.to_string(), to.to_string(), weight)
    }

    #[test]
    fn test_from_input_defaults_missing_weights() {
        let graph = DiGraph::from_input(
            &[edge("A", "B", None), edge("B", "C", Some(0.5))],
            ["S".to_string()],
        );
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        let weights: Vec<f64> = graph.edges().map(|(_, _, w)| w).collect();
        assert_eq!(weights, vec![1.0, 0.5]);
    }

    #[test]
    fn test_duplicate_edge_last_write_wins() {
        let mut graph = DiGraph::new();
        graph.add_edge("A".to_string(), "B".to_string(), 1.0);
        graph.add_edge("A".to_string(), "B".to_string(), 0.25);
        assert_eq!(graph.edge_count(), 1);
        let (_, w) = graph.out_edges(&"A".to_string()).next().unwrap();
        assert_eq!(w, 0.25);
    }

    #[test]
    fn test_out_edges_preserve_insertion_order() {
        let mut graph = DiGraph::new();
        graph.add_edge("A".to_string(), "C".to_string(), 1.0);
        graph.add_edge("A".to_string(), "B".to_string(), 1.0);
        let neighbors: Vec<&String> = graph.out_edges(&"A".to_string()).map(|(n, _)| n).collect();
        assert_eq!(neighbors, vec!["C", "B"]);
    }

    #[test]
    fn test_has_path_directed() {
        let mut graph = DiGraph::new();
        graph.add_edge("A".to_string(), "B".to_string(), 1.0);
        graph.add_edge("B".to_string(), "C".to_string(), 1.0);
        assert!(graph.has_path(&"A".to_string(), &"C".to_string()));
        assert!(!graph.has_path(&"C".to_string(), &"A".to_string()));
    }

    #[test]
    fn test_has_path_missing_node() {
        let mut graph = DiGraph::new();
        graph.add_edge("A".to_string(), "B".to_string(), 1.0);
        assert!(!graph.has_path(&"A".to_string(), &"Z".to_string()));
        assert!(!graph.has_path(&"Z".to_string(), &"A".to_string()));
    }

    #[test]
    fn test_reversed_flips_edges_and_keeps_isolated_nodes() {
        let mut graph = DiGraph::new();
        graph.add_edge("A".to_string(), "B".to_string(), 0.5);
        graph.add_node("X".to_string());
        let reversed = graph.reversed();
        assert!(reversed.has_path(&"B".to_string(), &"A".to_string()));
        assert!(!reversed.has_path(&"A".to_string(), &"B".to_string()));
        assert!(reversed.contains_node(&"X".to_string()));
        let (_, _, w) = reversed.edges().next().unwrap();
        assert_eq!(w, 0.5);
    }

    #[test]
    fn test_rewrite_weights_in_place() {
        let mut graph = DiGraph::new();
        graph.add_edge("A".to_string(), "B".to_string(), 0.5);
        graph.add_edge("B".to_string(), "C".to_string(), 2.0);
        graph.rewrite_weights(|w| w * 2.0);
        let weights: Vec<f64> = graph.edges().map(|(_, _, w)| w).collect();
        assert_eq!(weights, vec![1.0, 4.0]);
    }
}
