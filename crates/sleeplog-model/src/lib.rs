pub mod diagnostic;
pub mod error;
pub mod event;
pub mod options;
pub mod segment;
pub mod wide;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::{SegmentError, SegmentListError};
pub use event::{SleepEvent, SleepInterval};
pub use options::{DEFAULT_NOON_CUTOFF_HOUR, IngestOptions, ReshapeOptions, TimestampFormat};
pub use segment::{Segment, SegmentList};
pub use wide::{NightCell, Reshaped, WideRow};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reshaped_counts_by_severity() {
        let reshaped = Reshaped {
            width: 0,
            rows: vec![],
            diagnostics: vec![
                Diagnostic {
                    segment_index: 0,
                    recording_id: "R1".to_string(),
                    subject_id: "A".to_string(),
                    kind: DiagnosticKind::InvalidSegment(SegmentError::InvertedRange {
                        start: date(2024, 1, 3),
                        end: date(2024, 1, 1),
                    }),
                },
                Diagnostic {
                    segment_index: 1,
                    recording_id: "R2".to_string(),
                    subject_id: "B".to_string(),
                    kind: DiagnosticKind::UnknownSubject,
                },
            ],
        };
        assert_eq!(reshaped.error_count(), 1);
        assert_eq!(reshaped.warning_count(), 1);
        assert!(reshaped.has_errors());
    }
}
