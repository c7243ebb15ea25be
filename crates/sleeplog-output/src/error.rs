use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to encode CSV: {0}")]
    Encode(#[from] csv::Error),
    #[error("flush CSV writer: {0}")]
    Flush(#[from] std::io::Error),
    #[error("CSV output is not valid UTF-8")]
    Utf8,
}

pub type Result<T> = std::result::Result<T, OutputError>;
