//! Error types for source file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the wide-format source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected a record.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty or has no header line.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Header Errors ===
    /// A header cell is blank, so the column has no subject name.
    #[error("empty column name at position {position} in {path}")]
    EmptyColumnName { path: PathBuf, position: usize },

    /// Two columns share a subject name.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { path: PathBuf, column: String },
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");
    }

    #[test]
    fn test_not_found_io_error_maps_to_file_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IngestError::from_io(std::path::Path::new("data.csv"), io);
        assert!(matches!(err, IngestError::FileNotFound { .. }));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = IngestError::from_io(std::path::Path::new("data.csv"), io);
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
