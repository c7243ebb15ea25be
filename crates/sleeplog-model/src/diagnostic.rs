use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SegmentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// What went wrong (or looked suspicious) for one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The segment was rejected; no row was emitted for it.
    InvalidSegment(SegmentError),
    /// No diary event carries the segment's subject; the row is all empty.
    UnknownSubject,
    /// The subject has events, but none fall inside the segment's nights.
    NoCoverage,
    /// Several events claim the same night; the earliest onset was used.
    AmbiguousNight {
        night: usize,
        date: NaiveDate,
        candidates: usize,
    },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::InvalidSegment(_) => Severity::Error,
            Self::UnknownSubject | Self::NoCoverage | Self::AmbiguousNight { .. } => {
                Severity::Warning
            }
        }
    }

    /// Short stable code used in summaries and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSegment(_) => "invalid-segment",
            Self::UnknownSubject => "unknown-subject",
            Self::NoCoverage => "no-coverage",
            Self::AmbiguousNight { .. } => "ambiguous-night",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSegment(error) => write!(f, "segment skipped: {error}"),
            Self::UnknownSubject => f.write_str("subject has no diary events"),
            Self::NoCoverage => f.write_str("no diary events inside the date range"),
            Self::AmbiguousNight {
                night,
                date,
                candidates,
            } => write!(
                f,
                "night {night} ({date}) has {candidates} diary entries; earliest onset used"
            ),
        }
    }
}

/// A non-fatal finding tied to one input segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 0-based position of the segment in the input list.
    pub segment_index: usize,
    pub recording_id: String,
    pub subject_id: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment {} ({}): {}",
            self.segment_index + 1,
            self.recording_id,
            self.kind
        )
    }
}
