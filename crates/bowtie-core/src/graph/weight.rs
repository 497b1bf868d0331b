use crate::graph::digraph::{DiGraph, InputEdge, NodeKey};

/// How the input network's edge weights are interpreted.
///
/// Decided once from a single pass over the parsed edge records, before
/// any shortest-path query runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMode {
    /// No input line carried a weight column.
    Unweighted,
    /// Weights are present but uniformly 1.
    UnitWeighted,
    /// Weights are edge-traversal probabilities in (0, 1].
    Probability,
}

impl WeightMode {
    pub fn classify<N>(edges: &[InputEdge<N>]) -> Self {
        if edges.iter().all(|e| e.weight.is_none()) {
            WeightMode::Unweighted
        } else if edges.iter().all(|e| e.weight.unwrap_or(1.0) == 1.0) {
            WeightMode::UnitWeighted
        } else {
            WeightMode::Probability
        }
    }
}

/// Rewrite the graph's edge weights according to the classified mode.
///
/// `Probability` turns "maximize the product of probabilities" into
/// "minimize the sum of costs": each weight `w` becomes `-ln(w)`, and a
/// zero-or-negative probability makes the edge impassable (infinite
/// cost, skipped by the shortest-path engine).
pub fn normalize<N: NodeKey>(graph: &mut DiGraph<N>, mode: WeightMode) {
    match mode {
        WeightMode::Unweighted => {
            graph.rewrite_weights(|_| 1.0);
            tracing::info!("input network is unweighted; all edge weights set to 1");
        }
        WeightMode::UnitWeighted => {
            tracing::info!("input network is unweighted");
        }
        WeightMode::Probability => {
            graph.rewrite_weights(|w| if w > 0.0 { -w.ln() } else { f64::INFINITY });
            tracing::debug!("edge weights treated as probabilities; applied negative log transform");
        }
    }
}
