//! Error types for sleep diary ingestion.
//!
//! Every variant is fatal for a conversion run: structurally broken input
//! must never produce a partial table.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a sleep diary.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The csv reader rejected the input.
    #[error("failed to parse CSV {source_name}: {source}")]
    CsvParse {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    /// Required diary columns are absent from the header row.
    #[error("diary must contain columns {}; found: {}", .missing.join(", "), .found.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    // === Row Errors ===
    /// A row could not be turned into a subject/bed/wake triple.
    #[error("malformed diary row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// No usable rows remained after parsing.
    #[error("diary {source_name} contains no usable rows")]
    EmptyDiary { source_name: String },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
