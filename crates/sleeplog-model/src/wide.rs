//! Wide-format output rows.

use chrono::NaiveDate;

use crate::diagnostic::{Diagnostic, Severity};
use crate::event::SleepInterval;

/// The value held for one night of one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NightCell {
    /// No diary entry for the night, or a padding cell past the segment's span.
    Empty,
    Matched(SleepInterval),
    /// More than one entry; candidates are sorted by onset.
    Ambiguous(Vec<SleepInterval>),
}

impl NightCell {
    /// The interval written to the output: the match, or the earliest candidate.
    pub fn selected(&self) -> Option<&SleepInterval> {
        match self {
            Self::Empty => None,
            Self::Matched(interval) => Some(interval),
            Self::Ambiguous(candidates) => candidates.first(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }
}

/// One output row: a segment and its nights, padded to the batch width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRow {
    /// 0-based position of the source segment in the input list.
    pub segment_index: usize,
    pub recording_id: String,
    pub subject_id: String,
    pub start_date: NaiveDate,
    /// Nights covered by the segment itself; `nights` beyond this are padding.
    pub span: usize,
    pub nights: Vec<NightCell>,
}

impl WideRow {
    /// Calendar date of the 0-based night cell `index`; `None` for padding.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        if index >= self.span {
            return None;
        }
        let offset = u64::try_from(index).ok()?;
        self.start_date.checked_add_days(chrono::Days::new(offset))
    }

    pub fn matched_count(&self) -> usize {
        self.nights.iter().filter(|cell| !cell.is_empty()).count()
    }
}

/// Result of a reshaping run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reshaped {
    /// Night column pairs per row: the longest span in the batch.
    pub width: usize,
    pub rows: Vec<WideRow>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Reshaped {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity() == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
