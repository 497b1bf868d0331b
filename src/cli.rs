//! CLI argument parsing for bowtie
//!
//! Uses clap for argument parsing. Single-purpose binary: four required
//! file paths plus output and logging flags.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the run summary on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Bowtie - pathway reconstruction for weighted directed networks
///
/// Connects a set of source nodes to a set of target nodes by greedily
/// stitching together cheapest shortest paths, and writes the resulting
/// pathway subgraph as a two-column edge list.
#[derive(Parser, Debug)]
#[command(name = "bowtie")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the tab-separated edge list (2 or 3 columns)
    #[arg(long)]
    pub edges: PathBuf,

    /// Path to the source node list (one identifier per line)
    #[arg(long)]
    pub sources: PathBuf,

    /// Path to the target node list (one identifier per line)
    #[arg(long)]
    pub targets: PathBuf,

    /// Path to the output file that will be written
    #[arg(long)]
    pub output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    /// Report timing and per-iteration detail
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Abort reconstruction after this many seconds
    #[arg(long)]
    pub timeout: Option<f64>,
}
