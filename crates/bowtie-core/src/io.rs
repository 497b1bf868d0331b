//! Readers for the tab-separated input files and the pathway writer

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::IndexSet;

use crate::builder::Pathway;
use crate::error::{BowtieError, Result};
use crate::graph::digraph::InputEdge;

/// Read the edge list: one edge per line, 2 or 3 tab-separated fields.
/// Two fields leave the weight implicit; the third field must parse as a
/// float. Blank lines are skipped.
pub fn read_edges(path: &Path) -> Result<Vec<InputEdge<String>>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut edges = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let edge = match fields.as_slice() {
            [from, to] => InputEdge::new(from.to_string(), to.to_string(), None),
            [from, to, weight] => {
                let weight: f64 = weight.trim().parse().map_err(|_| {
                    BowtieError::InvalidEdgeLine {
                        path: path.to_path_buf(),
                        line: index + 1,
                        reason: format!("invalid weight '{}'", weight),
                    }
                })?;
                InputEdge::new(from.to_string(), to.to_string(), Some(weight))
            }
            _ => {
                return Err(BowtieError::InvalidEdgeLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason: format!(
                        "expected 2 or 3 tab-separated fields, got {}",
                        fields.len()
                    ),
                })
            }
        };
        edges.push(edge);
    }

    Ok(edges)
}

/// Read a source or target file: one trimmed identifier per line. Blank
/// lines are skipped and duplicates keep their first occurrence.
pub fn read_node_set(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut nodes: IndexSet<String> = IndexSet::new();

    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            nodes.insert(id.to_string());
        }
    }

    Ok(nodes.into_iter().collect())
}

/// Write the pathway as a two-column tab-separated file with a
/// `Node1\tNode2` header, one directed edge per line in merge order.
/// Parent directories are created as needed.
pub fn write_pathway(path: &Path, pathway: &Pathway<String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "Node1\tNode2")?;
    for (from, to) in pathway.edges() {
        writeln!(writer, "{}\t{}", from, to)?;
    }
    writer.flush()?;
    Ok(())
}
