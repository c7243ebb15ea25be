use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use sleeplog_cli::pipeline::{
    ConvertOutcome, ConvertRequest, convert, read_segment_file, write_segment_file,
};
use sleeplog_model::{IngestOptions, ReshapeOptions, Segment, SegmentList, TimestampFormat};
use sleeplog_output::OutputLayout;

use crate::cli::{ConvertArgs, LayoutArg, SegmentsAction, SegmentsArgs};
use crate::summary::apply_table_style;

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertOutcome> {
    let timestamp_format = args
        .datetime_fmt
        .clone()
        .map_or(TimestampFormat::Auto, TimestampFormat::Explicit);
    let request = ConvertRequest {
        input: args.input.clone(),
        segments: args.segments.clone(),
        output_dir: args.output_dir.clone(),
        output_name: args.output_name.clone(),
        layout: match args.layout {
            LayoutArg::Nights => OutputLayout::Nights,
            LayoutArg::GgirAdvanced => OutputLayout::GgirAdvanced,
        },
        ingest: IngestOptions::new()
            .with_timestamp_format(timestamp_format)
            .with_skip_incomplete_rows(args.skip_incomplete_rows),
        reshape: ReshapeOptions::default().with_noon_cutoff(args.noon_cutoff),
        dry_run: args.dry_run,
    };
    convert(&request)
}

pub fn run_segments(args: &SegmentsArgs) -> Result<()> {
    let path = &args.file;
    match &args.action {
        SegmentsAction::List => {
            let segments = read_segment_file(path)?;
            print_segments(&segments);
        }
        SegmentsAction::Add {
            recording_id,
            subject_id,
            start,
            end,
        } => {
            let mut segments = if path.exists() {
                read_segment_file(path)?
            } else {
                SegmentList::new()
            };
            segments
                .push(Segment::new(recording_id, subject_id, *start, *end))
                .context("add segment")?;
            write_segment_file(path, &segments)?;
            info!(path = %path.display(), segments = segments.len(), "segment added");
            print_segments(&segments);
        }
        SegmentsAction::Remove { index } => {
            let position = index
                .checked_sub(1)
                .context("segment positions start at 1")?;
            let mut segments = read_segment_file(path)?;
            let removed = segments
                .remove(position)
                .with_context(|| format!("remove segment {index}"))?;
            write_segment_file(path, &segments)?;
            println!("Removed: {}", removed.recording_id);
            print_segments(&segments);
        }
        SegmentsAction::Clear => {
            write_segment_file(path, &SegmentList::new())?;
            println!("Cleared segments in {}", path.display());
        }
    }
    Ok(())
}

fn print_segments(segments: &SegmentList) {
    if segments.is_empty() {
        println!("No segments defined.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "Recording", "Subject", "Start", "End", "Nights"]);
    apply_table_style(&mut table);
    for (index, segment) in segments.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            segment.recording_id.clone(),
            segment.subject_id.clone(),
            segment.start_date.to_string(),
            segment.end_date.to_string(),
            segment.span().to_string(),
        ]);
    }
    println!("{table}");
}
