//! Conversion stages shared by the `convert` and `segments` commands.
//!
//! Stages: load diary -> resolve segments -> reshape -> render -> write.
//! Fatal problems (unreadable files, malformed diary rows, bad segment
//! JSON) surface as errors before anything is written; per-segment
//! problems travel with the result as diagnostics.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use sleeplog_ingest::{parse_events, read_diary_table, subjects};
use sleeplog_model::{IngestOptions, ReshapeOptions, Reshaped, SegmentList, SleepEvent};
use sleeplog_output::{OutputLayout, WideTable, default_output_name, render_table, write_csv};
use sleeplog_transform::{default_segments, reshape};

use crate::logging::redact_value;

/// Everything needed for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub segments: Option<PathBuf>,
    /// Defaults to the directory of `input`.
    pub output_dir: Option<PathBuf>,
    pub output_name: Option<String>,
    pub layout: OutputLayout,
    pub ingest: IngestOptions,
    pub reshape: ReshapeOptions,
    /// Reshape and report without writing the CSV.
    pub dry_run: bool,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            segments: None,
            output_dir: None,
            output_name: None,
            layout: OutputLayout::default(),
            ingest: IngestOptions::default(),
            reshape: ReshapeOptions::default(),
            dry_run: false,
        }
    }
}

#[derive(Debug)]
pub struct ConvertOutcome {
    pub input: PathBuf,
    /// `None` on a dry run.
    pub output_path: Option<PathBuf>,
    pub layout: OutputLayout,
    pub event_count: usize,
    pub segments: SegmentList,
    pub reshaped: Reshaped,
    pub table: WideTable,
}

/// Load and parse the diary CSV.
pub fn load_events(path: &Path, options: &IngestOptions) -> Result<Vec<SleepEvent>> {
    let table = read_diary_table(path)?;
    let events = parse_events(&table, options)?;
    Ok(events)
}

/// Read a segment JSON file.
pub fn read_segment_file(path: &Path) -> Result<SegmentList> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("read segments: {}", path.display()))?;
    SegmentList::from_json(&json).with_context(|| format!("parse segments: {}", path.display()))
}

/// Write a segment list as pretty JSON.
pub fn write_segment_file(path: &Path, segments: &SegmentList) -> Result<()> {
    let json = segments.to_json()?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write segments: {}", path.display()))
}

/// Pick the segments for a run.
///
/// Without a segment list every subject gets one segment covering its whole
/// diary. Segments without a subject are assigned the diary's subject when
/// the diary holds exactly one.
pub fn resolve_segments(
    segments: Option<SegmentList>,
    events: &[SleepEvent],
    options: &ReshapeOptions,
) -> SegmentList {
    let Some(mut segments) = segments else {
        let defaults = SegmentList::from(default_segments(events, options));
        info!(segments = defaults.len(), "no segment file; using whole-diary segments");
        return defaults;
    };
    let diary_subjects = subjects(events);
    if let [only] = diary_subjects.as_slice() {
        let filled = segments.fill_missing_subject(only);
        if filled > 0 {
            info!(
                filled,
                subject = %redact_value(only),
                "assigned diary subject to segments without one"
            );
        }
    } else if segments.iter().any(|segment| segment.subject_id.trim().is_empty()) {
        warn!(
            subjects = diary_subjects.len(),
            "segments without subject_id cannot be resolved in a multi-subject diary"
        );
    }
    segments
}

/// Run a full conversion.
pub fn convert(request: &ConvertRequest) -> Result<ConvertOutcome> {
    let started = Instant::now();
    let events = info_span!("ingest", input = %request.input.display())
        .in_scope(|| load_events(&request.input, &request.ingest))?;

    let segments = match &request.segments {
        Some(path) => Some(read_segment_file(path)?),
        None => None,
    };
    let segments = resolve_segments(segments, &events, &request.reshape);

    let reshaped = info_span!("reshape", segments = segments.len())
        .in_scope(|| reshape(&events, segments.as_slice(), &request.reshape));
    let table = render_table(&reshaped, &events, request.layout);

    let output_path = if request.dry_run {
        info!("dry run; output not written");
        None
    } else {
        let dir = request
            .output_dir
            .clone()
            .or_else(|| request.input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let name = request
            .output_name
            .clone()
            .unwrap_or_else(|| default_output_name(segments.as_slice()));
        let path = dir.join(name);
        write_csv(&table, &path).with_context(|| format!("write output: {}", path.display()))?;
        Some(path)
    };

    info!(
        rows = reshaped.rows.len(),
        width = reshaped.width,
        errors = reshaped.error_count(),
        warnings = reshaped.warning_count(),
        duration_ms = started.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(ConvertOutcome {
        input: request.input.clone(),
        output_path,
        layout: request.layout,
        event_count: events.len(),
        segments,
        reshaped,
        table,
    })
}
