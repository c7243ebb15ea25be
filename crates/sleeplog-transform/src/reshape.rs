//! Long-to-wide reshaping.
//!
//! Runs in three passes over the segments:
//!
//! 1. validation: broken segments are reported and dropped from the batch;
//! 2. width: the longest remaining span fixes the number of night columns;
//! 3. rows: each segment's nights are matched against its subject's diary.
//!
//! Rows keep the input order of their segments and every row carries
//! exactly `width` night cells.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use sleeplog_model::{
    Diagnostic, DiagnosticKind, NightCell, ReshapeOptions, Reshaped, Segment, SleepEvent, WideRow,
};

use crate::night::NightIndex;

/// Number of night column pairs needed for `segments`: the longest valid span.
pub fn batch_width<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> usize {
    segments
        .into_iter()
        .filter(|segment| segment.validate().is_ok())
        .map(Segment::span)
        .max()
        .unwrap_or(0)
}

/// Reshape diary events into one wide row per valid segment.
///
/// Never fails: problems with individual segments are returned as
/// [`Diagnostic`]s next to the rows that could be built.
pub fn reshape(events: &[SleepEvent], segments: &[Segment], options: &ReshapeOptions) -> Reshaped {
    let mut diagnostics = Vec::new();
    let mut valid: Vec<(usize, &Segment)> = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        match segment.validate() {
            Ok(()) => valid.push((index, segment)),
            Err(error) => {
                warn!(
                    segment = index + 1,
                    recording_id = %segment.recording_id,
                    %error,
                    "segment rejected"
                );
                diagnostics.push(diagnostic(index, segment, DiagnosticKind::InvalidSegment(error)));
            }
        }
    }

    let width = batch_width(valid.iter().map(|(_, segment)| *segment));

    let mut by_subject: BTreeMap<&str, Vec<&SleepEvent>> = BTreeMap::new();
    for event in events {
        by_subject
            .entry(event.subject_id.trim())
            .or_default()
            .push(event);
    }
    let mut indexes: BTreeMap<&str, NightIndex> = BTreeMap::new();

    let mut rows = Vec::with_capacity(valid.len());
    for (index, segment) in valid {
        let subject = segment.subject_id.trim();
        let Some(subject_events) = by_subject.get(subject) else {
            warn!(
                segment = index + 1,
                recording_id = %segment.recording_id,
                "no diary events for segment subject"
            );
            diagnostics.push(diagnostic(index, segment, DiagnosticKind::UnknownSubject));
            rows.push(empty_row(index, segment, width));
            continue;
        };
        let nights = indexes
            .entry(subject)
            .or_insert_with(|| NightIndex::build(subject_events.iter().copied(), options));

        let mut cells = Vec::with_capacity(width);
        for (offset, date) in segment.nights().enumerate() {
            let candidates = nights.get(date);
            let cell = match candidates {
                [] => NightCell::Empty,
                [single] => NightCell::Matched(*single),
                many => {
                    diagnostics.push(diagnostic(
                        index,
                        segment,
                        DiagnosticKind::AmbiguousNight {
                            night: offset + 1,
                            date,
                            candidates: many.len(),
                        },
                    ));
                    NightCell::Ambiguous(many.to_vec())
                }
            };
            cells.push(cell);
        }
        let matched = cells.iter().filter(|cell| !cell.is_empty()).count();
        if matched == 0 {
            warn!(
                segment = index + 1,
                recording_id = %segment.recording_id,
                "no diary events inside segment date range"
            );
            diagnostics.push(diagnostic(index, segment, DiagnosticKind::NoCoverage));
        }
        debug!(
            segment = index + 1,
            recording_id = %segment.recording_id,
            nights = segment.span(),
            matched,
            "segment reshaped"
        );
        cells.resize(width, NightCell::Empty);
        rows.push(WideRow {
            segment_index: index,
            recording_id: segment.recording_id.clone(),
            subject_id: segment.subject_id.clone(),
            start_date: segment.start_date,
            span: segment.span(),
            nights: cells,
        });
    }

    diagnostics.sort_by_key(|diagnostic| diagnostic.segment_index);
    info!(
        segments = segments.len(),
        rows = rows.len(),
        width,
        diagnostics = diagnostics.len(),
        "reshape complete"
    );
    Reshaped {
        width,
        rows,
        diagnostics,
    }
}

fn diagnostic(index: usize, segment: &Segment, kind: DiagnosticKind) -> Diagnostic {
    Diagnostic {
        segment_index: index,
        recording_id: segment.recording_id.clone(),
        subject_id: segment.subject_id.clone(),
        kind,
    }
}

fn empty_row(index: usize, segment: &Segment, width: usize) -> WideRow {
    WideRow {
        segment_index: index,
        recording_id: segment.recording_id.clone(),
        subject_id: segment.subject_id.clone(),
        start_date: segment.start_date,
        span: segment.span(),
        nights: vec![NightCell::Empty; width],
    }
}
