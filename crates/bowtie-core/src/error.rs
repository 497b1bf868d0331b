//! Error types and exit codes for bowtie
//!
//! Exit codes:
//! - 0: Success
//! - 1: Computation or IO failure
//! - 2: Usage error (bad flags/args)
//! - 3: Input data error (missing or malformed input files)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Computation or IO failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Input data error - missing or malformed input files (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during pathway reconstruction
#[derive(Error, Debug)]
pub enum BowtieError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    // Input data errors (exit code 3)
    #[error("{kind} file not found: {path:?}")]
    InputMissing { kind: &'static str, path: PathBuf },

    #[error("invalid edge line {line} in {path:?}: {reason}")]
    InvalidEdgeLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("node not found: {0}")]
    NodeNotFound(String),

    // Computation failures (exit code 1)
    #[error("contradictory path between {from} and {to}: negative edge weights?")]
    ContradictoryPath { from: String, to: String },

    #[error("deadline exceeded after {elapsed_secs:.1}s")]
    DeadlineExceeded { elapsed_secs: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BowtieError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            BowtieError::UsageError(_) => ExitCode::Usage,

            BowtieError::InputMissing { .. }
            | BowtieError::InvalidEdgeLine { .. }
            | BowtieError::NodeNotFound(_) => ExitCode::Data,

            BowtieError::ContradictoryPath { .. }
            | BowtieError::DeadlineExceeded { .. }
            | BowtieError::Io(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            BowtieError::UsageError(_) => "usage_error",
            BowtieError::InputMissing { .. } => "input_missing",
            BowtieError::InvalidEdgeLine { .. } => "invalid_edge_line",
            BowtieError::NodeNotFound(_) => "node_not_found",
            BowtieError::ContradictoryPath { .. } => "contradictory_path",
            BowtieError::DeadlineExceeded { .. } => "deadline_exceeded",
            BowtieError::Io(_) => "io_error",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for bowtie operations
pub type Result<T> = std::result::Result<T, BowtieError>;
