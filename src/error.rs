//src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures while reading a SqueezeMeta table.
///
/// Row-level anomalies that the aggregation can recover from (rows without
/// a length, a missing marker gene) are logged instead and never show up here.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("column '{column}' not found in the header of {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error(
        "per-sample columns disagree: {reads} read count, {bases} base count, {coverages} coverage"
    )]
    SampleMismatch {
        reads: usize,
        bases: usize,
        coverages: usize,
    },

    #[error("invalid number '{value}' in column '{column}' (line {line})")]
    InvalidNumber {
        column: String,
        value: String,
        line: usize,
    },

    #[error("scheme name '{name}' is used more than once")]
    DuplicateScheme { name: String },

    #[error("{} ended before the header line", .path.display())]
    EmptyTable { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, AggregateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = AggregateError::MissingColumn {
            column: "ORF ID".to_string(),
            path: PathBuf::from("project.orftable"),
        };
        assert_eq!(
            err.to_string(),
            "column 'ORF ID' not found in the header of project.orftable"
        );

        let err = AggregateError::InvalidNumber {
            column: "Length NT".to_string(),
            value: "abc".to_string(),
            line: 7,
        };
        assert!(err.to_string().contains("line 7"));

        let err: AggregateError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
