//! Error types and exit codes for graphstep
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, cancelled run)
//! - 2: Usage error (bad flags/args, bad edge weight)
//! - 3: Data error (unknown start/end node, empty graph)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

use crate::graph::NodeId;

/// Exit codes for the graphstep binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing node, empty graph (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while editing a graph or running a traversal
#[derive(Error, Debug)]
pub enum GraphError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid edge weight: {value} (must be a finite number >= 0)")]
    InvalidWeight { value: f64 },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("start node {id} does not exist")]
    InvalidStart { id: NodeId },

    #[error("end node {id} does not exist")]
    InvalidEnd { id: NodeId },

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("no start node selected")]
    NoStartSelected,

    #[error("node not found: {id}")]
    NodeNotFound { id: NodeId },

    #[error("no node ids left to assign")]
    NodeIdsExhausted,

    #[error("graph file not found: {path:?}")]
    GraphFileNotFound { path: PathBuf },

    #[error("invalid graph file {path:?}: {reason}")]
    InvalidGraphFile { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("run cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("{0}")]
    Other(String),
}

impl GraphError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GraphError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GraphError::UsageError(_)
            | GraphError::InvalidWeight { .. }
            | GraphError::InvalidValue { .. } => ExitCode::Usage,

            GraphError::InvalidStart { .. }
            | GraphError::InvalidEnd { .. }
            | GraphError::EmptyGraph
            | GraphError::NoStartSelected
            | GraphError::NodeNotFound { .. }
            | GraphError::NodeIdsExhausted
            | GraphError::GraphFileNotFound { .. }
            | GraphError::InvalidGraphFile { .. } => ExitCode::Data,

            GraphError::Cancelled
            | GraphError::Io(_)
            | GraphError::Json(_)
            | GraphError::Toml(_)
            | GraphError::TomlSer(_)
            | GraphError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GraphError::UsageError(_) => "usage_error",
            GraphError::InvalidWeight { .. } => "invalid_weight",
            GraphError::InvalidValue { .. } => "invalid_value",
            GraphError::InvalidStart { .. } => "invalid_start",
            GraphError::InvalidEnd { .. } => "invalid_end",
            GraphError::EmptyGraph => "empty_graph",
            GraphError::NoStartSelected => "no_start_selected",
            GraphError::NodeNotFound { .. } => "node_not_found",
            GraphError::NodeIdsExhausted => "node_ids_exhausted",
            GraphError::GraphFileNotFound { .. } => "graph_file_not_found",
            GraphError::InvalidGraphFile { .. } => "invalid_graph_file",
            GraphError::Cancelled => "cancelled",
            GraphError::Io(_) => "io_error",
            GraphError::Json(_) => "json_error",
            GraphError::Toml(_) => "toml_error",
            GraphError::TomlSer(_) => "toml_error",
            GraphError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
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

/// Result type alias for graphstep operations
pub type Result<T> = std::result::Result<T, GraphError>;
