//! Error types shared by the loaders, the engines and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HeuristicError>;

/// Everything that can abort a run.
///
/// Coordinate rows that fail to parse are not represented here: they are
/// dropped by the coordinate loader and the run continues.
#[derive(Debug, Error)]
pub enum HeuristicError {
    /// The instance path is missing or cannot be opened.
    #[error("cannot open {}: {}", .path.display(), .source)]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An edge-list `p` or `e` line does not have the expected shape.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// The requested TSP start vertex is not part of the instance.
    #[error("start vertex {0} is not present in the instance")]
    UnknownStartVertex(usize),

    /// The coordinate file contained no usable `id x y` rows.
    #[error("no coordinates could be read from {0}")]
    EmptyInstance(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HeuristicError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        HeuristicError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = HeuristicError::malformed(7, "expected `e u v`");
        assert_eq!(err.to_string(), "malformed input at line 7: expected `e u v`");

        let err = HeuristicError::UnknownStartVertex(42);
        assert!(err.to_string().contains("42"));
    }
}
