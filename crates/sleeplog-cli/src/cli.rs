//! CLI argument definitions for the sleeplog converter.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sleeplog",
    version,
    about = "Convert long-format sleep diaries to wide GGIR sleeplogs",
    long_about = "Convert a long-format sleep diary CSV (SUBJECT, In_Bed, Out_Bed) into a \
                  wide table with one row per accelerometer recording segment.\n\n\
                  Segments are defined in a JSON file that can be edited with the \
                  `segments` subcommand."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include participant identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a sleep diary CSV into a wide sleeplog CSV.
    Convert(ConvertArgs),

    /// List or edit a segment definition file.
    Segments(SegmentsArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Sleep diary CSV with SUBJECT, In_Bed and Out_Bed columns.
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    /// Segment definitions JSON (default: one segment per subject covering the whole diary).
    #[arg(short = 's', long = "segments", value_name = "FILE")]
    pub segments: Option<PathBuf>,

    /// Output directory (default: directory of INPUT_CSV).
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output file name (default: <SUBJECT>_sleeplog_advanced.csv).
    #[arg(long = "output-name", value_name = "NAME")]
    pub output_name: Option<String>,

    /// Column layout of the output table.
    #[arg(long = "layout", value_enum, default_value = "nights")]
    pub layout: LayoutArg,

    /// Onsets before this hour belong to the previous evening (0 disables).
    #[arg(
        long = "noon-cutoff",
        value_name = "HOUR",
        default_value_t = 12,
        value_parser = clap::value_parser!(u32).range(0..=23)
    )]
    pub noon_cutoff: u32,

    /// strftime format of diary timestamps (default: detect ISO-8601 and m/d/y layouts).
    #[arg(long = "datetime-fmt", value_name = "FMT")]
    pub datetime_fmt: Option<String>,

    /// Skip diary rows missing In_Bed or Out_Bed instead of failing.
    #[arg(long = "skip-incomplete-rows")]
    pub skip_incomplete_rows: bool,

    /// Reshape and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct SegmentsArgs {
    /// Segment definitions JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub action: SegmentsAction,
}

#[derive(Subcommand)]
pub enum SegmentsAction {
    /// Print the segments in the file.
    List,

    /// Append a segment (creates the file if missing).
    Add {
        /// Recording file name, e.g. the .GT3X file.
        #[arg(long = "recording-id")]
        recording_id: String,
        #[arg(long = "subject-id")]
        subject_id: String,
        /// First night (YYYY-MM-DD).
        #[arg(long = "start")]
        start: NaiveDate,
        /// Last night, inclusive (YYYY-MM-DD).
        #[arg(long = "end")]
        end: NaiveDate,
    },

    /// Remove the segment at a 1-based position.
    Remove {
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Remove every segment.
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// recording_id, subject_id, night_N_onset, night_N_wake
    Nights,
    /// GGIR advanced sleeplog: ID, DN_date, DN_wakeup, DN_inbed
    GgirAdvanced,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
