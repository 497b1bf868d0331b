use super::*;
use crate::graph::digraph::InputEdge;

fn graph(edges: &[(&str, &str, f64)]) -> DiGraph<String> {
    let mut graph = DiGraph::new();
    for (from, to, weight) in edges {
        graph.add_edge(from.to_string(), to.to_string(), *weight);
    }
    graph
}

fn s(id: &str) -> String {
    id.to_string()
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn edge_set(reconstruction: &Reconstruction<String>) -> Vec<(String, String)> {
    let mut edges: Vec<(String, String)> = reconstruction
        .pathway
        .edges()
        .map(|(a, b)| (a.clone(), b.clone()))
        .collect();
    edges.sort();
    edges
}

#[test]
fn test_end_to_end_two_sources_one_target() {
    let graph = graph(&[("A", "B", 1.0), ("B", "C", 1.0), ("D", "C", 1.0)]);
    let builder = PathwayBuilder::new(&graph, ids(&["A", "D"]), ids(&["C"]));
    let result = builder.build(&BuildOptions::default()).unwrap();

    assert!(result.is_connected());
    assert_eq!(
        edge_set(&result),
        vec![
            (s("A"), s("B")),
            (s("B"), s("C")),
            (s("D"), s("C")),
        ]
    );
}

#[test]
fn test_disconnected_components_yield_empty_pathway() {
    let mut g = graph(&[("S1", "S2", 1.0), ("T1", "T2", 1.0)]);
    g.add_node(s("unused"));
    let builder = PathwayBuilder::new(&g, ids(&["S1", "S2"]), ids(&["T1", "T2"]));
    let result = builder.build(&BuildOptions::default()).unwrap();

    assert_eq!(result.pathway.edge_count(), 0);
    let mut nodes: Vec<&String> = result.pathway.nodes().collect();
    nodes.sort();
    assert_eq!(nodes, vec!["S1", "S2", "T1", "T2"]);
    assert_eq!(result.unconnected.len(), 4);
}

#[test]
fn test_pathway_edge_merge_is_idempotent() {
    let mut pathway = Pathway::new();
    pathway.merge_path(&ids(&["A", "B", "C"]));
    pathway.merge_path(&ids(&["A", "B", "C"]));
    pathway.merge_path(&ids(&["B", "C"]));
    assert_eq!(pathway.edge_count(), 2);
    assert_eq!(pathway.node_count(), 3);
}

#[test]
fn test_visitation_sets_partition_endpoints() {
    let graph = graph(&[("A", "B", 1.0), ("B", "C", 1.0), ("D", "C", 1.0)]);
    let mut builder = PathwayBuilder::new(&graph, ids(&["A", "D"]), ids(&["C"]));
    builder.seed().unwrap();
    builder.consume_overlaps();

    let endpoint_total = builder.endpoints.len();
    loop {
        for endpoint in &builder.endpoints {
            assert!(
                builder.visited.contains(endpoint) != builder.not_visited.contains(endpoint),
                "endpoint {endpoint} must be in exactly one visitation set"
            );
        }
        let before = builder.not_visited.len();
        let Some(selected) = builder.select() else {
            break;
        };
        builder.merge(selected).unwrap();
        assert!(
            builder.not_visited.len() < before,
            "each merge must shrink the unvisited set"
        );
        let settled = builder
            .endpoints
            .iter()
            .filter(|e| builder.visited.contains(*e))
            .count();
        assert_eq!(settled + builder.not_visited.len(), endpoint_total);
    }
    assert!(builder.not_visited.is_empty());
}

#[test]
fn test_tombstoned_entries_never_reselected() {
    let graph = graph(&[("A", "B", 1.0), ("B", "C", 1.0), ("D", "C", 1.0)]);
    let mut builder = PathwayBuilder::new(&graph, ids(&["A", "D"]), ids(&["C"]));
    builder.seed().unwrap();
    builder.consume_overlaps();

    let mut consumed: Vec<(String, String)> = Vec::new();
    while let Some(selected) = builder.select() {
        let pair = (selected.from.clone(), selected.to.clone());
        assert!(
            !consumed.contains(&pair),
            "pair {pair:?} was selected twice"
        );
        builder.merge(selected).unwrap();
        let entry = builder.matrix.get(&pair.0, &pair.1).unwrap();
        assert!(!entry.is_reachable());
        assert!(entry.path.is_empty());
        consumed.push(pair);
    }
}

#[test]
fn test_self_loops_do_not_stall_reconstruction() {
    let graph = graph(&[
        ("A", "B", 1.0),
        ("B", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "C", 0.0),
    ]);
    let builder = PathwayBuilder::new(&graph, ids(&["A"]), ids(&["C"]));
    let result = builder.build(&BuildOptions::default()).unwrap();

    assert!(result.is_connected());
    assert_eq!(edge_set(&result), vec![(s("A"), s("B")), (s("B"), s("C"))]);
}

#[test]
fn test_node_that_is_both_source_and_target() {
    let graph = graph(&[("A", "X", 1.0), ("X", "C", 1.0)]);
    let builder = PathwayBuilder::new(&graph, ids(&["A", "X"]), ids(&["X", "C"]));
    let result = builder.build(&BuildOptions::default()).unwrap();

    assert!(result.is_connected());
    assert_eq!(edge_set(&result), vec![(s("A"), s("X")), (s("X"), s("C"))]);
}

#[test]
fn test_intermediate_refresh_enables_reuse() {
    // Both sources and both targets route through the hub M. After the
    // first merged path introduces M, the refreshed matrix lets the
    // remaining endpoints attach to M directly instead of pulling in
    // fresh two-hop paths.
    let graph = graph(&[
        ("S1", "M", 1.0),
        ("S2", "M", 1.0),
        ("M", "T1", 1.0),
        ("M", "T2", 1.0),
    ]);
    let builder = PathwayBuilder::new(&graph, ids(&["S1", "S2"]), ids(&["T1", "T2"]));
    let result = builder.build(&BuildOptions::default()).unwrap();

    assert!(result.is_connected());
    assert_eq!(
        edge_set(&result),
        vec![
            (s("M"), s("T1")),
            (s("M"), s("T2")),
            (s("S1"), s("M")),
            (s("S2"), s("M")),
        ]
    );
}

#[test]
fn test_partial_reconstruction_reports_unconnected() {
    let mut g = graph(&[("S1", "T1", 1.0)]);
    g.add_node(s("S2"));
    let builder = PathwayBuilder::new(&g, ids(&["S1", "S2"]), ids(&["T1"]));
    let result = builder.build(&BuildOptions::default()).unwrap();

    assert!(!result.is_connected());
    assert_eq!(result.unconnected, ids(&["S2"]));
    assert_eq!(edge_set(&result), vec![(s("S1"), s("T1"))]);
}

#[test]
fn test_deadline_aborts_instead_of_partial_result() {
    let graph = graph(&[("A", "B", 1.0), ("B", "C", 1.0)]);
    let builder = PathwayBuilder::new(&graph, ids(&["A"]), ids(&["C"]));
    let opts = BuildOptions {
        deadline: Some(Duration::ZERO),
    };
    let err = builder.build(&opts).unwrap_err();
    assert!(matches!(err, BowtieError::DeadlineExceeded { .. }));
}

#[test]
fn test_reconstruct_with_probability_weights() {
    // -ln(0.9) + -ln(0.9) ~= 0.21 beats -ln(0.5) ~= 0.69, so the
    // two-hop high-probability route wins over the direct edge.
    let records = vec![
        InputEdge::new(s("A"), s("B"), Some(0.9)),
        InputEdge::new(s("B"), s("C"), Some(0.9)),
        InputEdge::new(s("A"), s("C"), Some(0.5)),
    ];
    let mode = WeightMode::classify(&records);
    assert_eq!(mode, WeightMode::Probability);
    let mut graph = DiGraph::from_input(&records, [s("A"), s("C")]);

    let result = reconstruct(
        &mut graph,
        mode,
        ids(&["A"]),
        ids(&["C"]),
        &BuildOptions::default(),
    )
    .unwrap();

    assert!(result.is_connected());
    assert_eq!(edge_set(&result), vec![(s("A"), s("B")), (s("B"), s("C"))]);
}

#[test]
fn test_duplicate_endpoint_ids_collapse() {
    let graph = graph(&[("A", "C", 1.0)]);
    let builder = PathwayBuilder::new(&graph, ids(&["A", "A"]), ids(&["C", "C"]));
    assert_eq!(builder.sources, ids(&["A"]));
    assert_eq!(builder.targets, ids(&["C"]));
    let result = builder.build(&BuildOptions::default()).unwrap();
    assert!(result.is_connected());
    assert_eq!(edge_set(&result), vec![(s("A"), s("C"))]);
}
