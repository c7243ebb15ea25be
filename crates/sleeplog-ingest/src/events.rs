//! Turning diary rows into [`SleepEvent`]s.

use std::collections::BTreeSet;

use tracing::{info, warn};

use sleeplog_model::{IngestOptions, SleepEvent};

use crate::diary::{DiaryColumns, DiaryTable, IN_BED_COLUMN, OUT_BED_COLUMN};
use crate::error::{IngestError, Result};
use crate::timestamp::parse_timestamp;

/// Parse every diary row into a sleep event.
///
/// Any row that cannot be read as a subject/bed/wake triple aborts the
/// whole run with [`IngestError::MalformedRow`]. With
/// [`IngestOptions::skip_incomplete_rows`], rows lacking a bed or wake time
/// are skipped with a warning instead; bad timestamps stay fatal.
pub fn parse_events(table: &DiaryTable, options: &IngestOptions) -> Result<Vec<SleepEvent>> {
    let columns = DiaryColumns::resolve(table)?;
    let mut events = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;

    for (row, &line) in table.rows.iter().zip(&table.lines) {
        let cell = |index: usize| row.get(index).map_or("", String::as_str);
        let subject = cell(columns.subject);
        let in_bed = cell(columns.in_bed);
        let out_bed = cell(columns.out_bed);

        if in_bed.is_empty() || out_bed.is_empty() {
            if options.skip_incomplete_rows {
                warn!(line, "skipping diary row without both bed and wake times");
                skipped += 1;
                continue;
            }
            let column = if in_bed.is_empty() {
                IN_BED_COLUMN
            } else {
                OUT_BED_COLUMN
            };
            return Err(IngestError::MalformedRow {
                line,
                reason: format!("{column} is empty"),
            });
        }
        if subject.is_empty() {
            return Err(IngestError::MalformedRow {
                line,
                reason: "SUBJECT is empty".to_string(),
            });
        }

        let bed_time = parse_timestamp(in_bed, &options.timestamp_format).map_err(|reason| {
            IngestError::MalformedRow {
                line,
                reason: format!("{IN_BED_COLUMN}: {reason}"),
            }
        })?;
        let wake_time = parse_timestamp(out_bed, &options.timestamp_format).map_err(|reason| {
            IngestError::MalformedRow {
                line,
                reason: format!("{OUT_BED_COLUMN}: {reason}"),
            }
        })?;
        if wake_time <= bed_time {
            return Err(IngestError::MalformedRow {
                line,
                reason: format!(
                    "{OUT_BED_COLUMN} {wake_time} is not after {IN_BED_COLUMN} {bed_time}"
                ),
            });
        }

        events.push(SleepEvent {
            row: usize::try_from(line).unwrap_or(usize::MAX),
            subject_id: subject.to_string(),
            bed_time,
            wake_time,
        });
    }

    if events.is_empty() {
        return Err(IngestError::EmptyDiary {
            source_name: table.source_name.clone(),
        });
    }
    info!(
        source = %table.source_name,
        events = events.len(),
        skipped,
        subjects = subjects(&events).len(),
        "diary parsed"
    );
    Ok(events)
}

/// Distinct subject ids in first-seen order.
pub fn subjects(events: &[SleepEvent]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    events
        .iter()
        .filter(|event| seen.insert(event.subject_id.as_str()))
        .map(|event| event.subject_id.clone())
        .collect()
}
