//! The reconstruction command: read inputs, build the pathway, write
//! the output edge list.

use std::path::Path;
use std::time::{Duration, Instant};

use bowtie_core::builder::{BuildOptions, PathwayBuilder, Reconstruction};
use bowtie_core::error::{BowtieError, Result};
use bowtie_core::graph::{normalize, DiGraph, WeightMode};
use bowtie_core::io::{read_edges, read_node_set, write_pathway};

use crate::cli::{Cli, OutputFormat};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    // All three inputs are checked up front so a missing file is
    // reported before any graph construction begins.
    ensure_input_exists("edges", &cli.edges)?;
    ensure_input_exists("sources", &cli.sources)?;
    ensure_input_exists("targets", &cli.targets)?;

    if cli.output.exists() {
        tracing::info!(path = %cli.output.display(), "output file will be overwritten");
    }

    let edge_records = read_edges(&cli.edges)?;
    let sources = read_node_set(&cli.sources)?;
    let targets = read_node_set(&cli.targets)?;
    tracing::debug!(
        edges = edge_records.len(),
        sources = sources.len(),
        targets = targets.len(),
        elapsed = ?start.elapsed(),
        "inputs_read"
    );

    let mode = WeightMode::classify(&edge_records);
    let mut network = DiGraph::from_input(
        &edge_records,
        sources.iter().chain(targets.iter()).cloned(),
    );
    normalize(&mut network, mode);

    let opts = BuildOptions {
        deadline: cli.timeout.map(Duration::from_secs_f64),
    };
    let result = PathwayBuilder::new(&network, sources, targets).build(&opts)?;
    tracing::debug!(
        nodes = result.pathway.node_count(),
        edges = result.pathway.edge_count(),
        elapsed = ?start.elapsed(),
        "pathway_built"
    );

    write_pathway(&cli.output, &result.pathway)?;
    report(cli, &result);
    Ok(())
}

fn ensure_input_exists(kind: &'static str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(BowtieError::InputMissing {
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn report(cli: &Cli, result: &Reconstruction<String>) {
    match cli.format {
        OutputFormat::Json => {
            let edges: Vec<[&String; 2]> = result
                .pathway
                .edges()
                .map(|(from, to)| [from, to])
                .collect();
            let summary = serde_json::json!({
                "nodes": result.pathway.nodes().collect::<Vec<_>>(),
                "edges": edges,
                "connected": result.is_connected(),
                "unconnected": &result.unconnected,
                "output": cli.output.display().to_string(),
            });
            println!("{}", summary);
        }
        OutputFormat::Human => {
            if cli.quiet {
                return;
            }
            println!(
                "pathway: {} nodes, {} edges -> {}",
                result.pathway.node_count(),
                result.pathway.edge_count(),
                cli.output.display()
            );
            if !result.is_connected() {
                println!(
                    "could not connect {} endpoint(s): {}",
                    result.unconnected.len(),
                    result.unconnected.join(", ")
                );
            }
        }
    }
}
