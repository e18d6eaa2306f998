//! Error types and exit codes for topomap
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, out-of-range parameters)
//! - 3: Data error (bad landmark index, malformed snapshot)

mod macros;

use thiserror::Error;

/// Exit codes for the topomap CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad index, inconsistent snapshot (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during map operations
#[derive(Error, Debug)]
pub enum TopoMapError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("invalid landmark index {index}: {reason}")]
    InvalidIndex { index: usize, reason: String },

    #[error("map has no landmarks")]
    MapEmpty,

    #[error("inconsistent edge {from}->{to}: endpoint is not a live landmark")]
    InconsistentEdge { from: usize, to: usize },

    #[error("no edge {from}->{to}")]
    EdgeNotFound { from: usize, to: usize },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl TopoMapError {
    /// Create an error for an index that is out of range
    pub fn out_of_range(index: usize, len: usize) -> Self {
        TopoMapError::InvalidIndex {
            index,
            reason: format!("out of range (map has {} slots)", len),
        }
    }

    /// Create an error for an index whose landmark was pruned
    pub fn tombstoned(index: usize) -> Self {
        TopoMapError::InvalidIndex {
            index,
            reason: "landmark was pruned".to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        TopoMapError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        TopoMapError::Other(format!("failed to {} {}: {}", operation, path, error))
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TopoMapError::UsageError(_) | TopoMapError::InvalidValue { .. } => ExitCode::Usage,

            TopoMapError::InvalidIndex { .. }
            | TopoMapError::MapEmpty
            | TopoMapError::InconsistentEdge { .. }
            | TopoMapError::EdgeNotFound { .. } => ExitCode::Data,

            TopoMapError::Io(_)
            | TopoMapError::Json(_)
            | TopoMapError::Toml(_)
            | TopoMapError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            TopoMapError::UsageError(_) => "usage_error",
            TopoMapError::InvalidValue { .. } => "invalid_value",
            TopoMapError::InvalidIndex { .. } => "invalid_index",
            TopoMapError::MapEmpty => "map_empty",
            TopoMapError::InconsistentEdge { .. } => "inconsistent_edge",
            TopoMapError::EdgeNotFound { .. } => "edge_not_found",
            TopoMapError::Io(_) => "io_error",
            TopoMapError::Json(_) => "json_error",
            TopoMapError::Toml(_) => "toml_error",
            TopoMapError::Other(_) => "other",
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

/// Result type alias for topomap operations
pub type Result<T> = std::result::Result<T, TopoMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            TopoMapError::out_of_range(7, 3).exit_code(),
            ExitCode::Data
        );
        assert_eq!(TopoMapError::MapEmpty.exit_code(), ExitCode::Data);
        assert_eq!(
            TopoMapError::invalid_value("threshold", 2.0).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            TopoMapError::Other("boom".to_string()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_invalid_index_message() {
        let err = TopoMapError::out_of_range(7, 3);
        assert_eq!(
            err.to_string(),
            "invalid landmark index 7: out of range (map has 3 slots)"
        );

        let err = TopoMapError::tombstoned(2);
        assert!(err.to_string().contains("pruned"));
    }

    #[test]
    fn test_to_json_envelope() {
        let json = TopoMapError::EdgeNotFound { from: 1, to: 4 }.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "edge_not_found");
        assert_eq!(json["error"]["message"], "no edge 1->4");
    }
}
