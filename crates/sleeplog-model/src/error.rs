use chrono::NaiveDate;
use thiserror::Error;

/// Structural problems that make a single segment unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("recording id is empty")]
    EmptyRecordingId,
    #[error("subject id is empty")]
    EmptySubjectId,
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Errors raised while editing or (de)serializing a segment list.
#[derive(Debug, Error)]
pub enum SegmentListError {
    #[error("invalid segment: {0}")]
    Invalid(#[from] SegmentError),
    #[error("segment {index} out of range ({len} segments)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("segment JSON: {0}")]
    Json(#[from] serde_json::Error),
}
