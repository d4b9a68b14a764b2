use std::fmt;
use std::io;
use thiserror::Error;

/// Pipeline stage an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Rename,
    Join,
    Project,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Rename => "rename",
            Stage::Join => "join",
            Stage::Project => "project",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Errors raised while merging distance and annotation tables.
///
/// Every error aborts the whole run; nothing is retried or recovered locally.
#[derive(Error, Debug)]
pub enum MergeError {
    /// Input file does not exist
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// Malformed delimited content
    #[error("{path}:{line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    /// A required column is missing or would be clobbered
    #[error("column '{column}' in {table}: {message}")]
    Schema {
        stage: Stage,
        table: String,
        column: String,
        message: String,
    },

    /// Read or write failure on an existing path
    #[error("{path}: {source}")]
    Io {
        stage: Stage,
        path: String,
        #[source]
        source: io::Error,
    },

    /// Summary could not be serialized
    #[error("summary {path}: {source}")]
    Summary {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MergeError {
    pub fn stage(&self) -> Stage {
        match self {
            MergeError::FileNotFound { .. } | MergeError::Parse { .. } => Stage::Load,
            MergeError::Schema { stage, .. } | MergeError::Io { stage, .. } => *stage,
            MergeError::Summary { .. } => Stage::Write,
        }
    }

    pub(crate) fn missing_column(stage: Stage, table: &str, column: &str) -> Self {
        MergeError::Schema {
            stage,
            table: table.to_string(),
            column: column.to_string(),
            message: "no such column".to_string(),
        }
    }

    /// Map an open/read failure, keeping NotFound distinct from other I/O errors
    pub(crate) fn from_read(path: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            MergeError::FileNotFound {
                path: path.to_string(),
            }
        } else {
            MergeError::Io {
                stage: Stage::Load,
                path: path.to_string(),
                source: err,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_is_reported() {
        let err = MergeError::missing_column(Stage::Project, "merged", "DST");
        assert_eq!(err.stage(), Stage::Project);
        assert_eq!(err.to_string(), "column 'DST' in merged: no such column");

        let err = MergeError::from_read("missing.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, MergeError::FileNotFound { .. }));
        assert_eq!(err.stage(), Stage::Load);
    }

    #[test]
    fn test_other_read_errors_are_io() {
        let err = MergeError::from_read("x.anno", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, MergeError::Io { stage: Stage::Load, .. }));
    }
}
