//! Configuration options for diary ingest and reshaping.

use serde::{Deserialize, Serialize};

/// Hour before which an onset is assigned to the previous evening.
pub const DEFAULT_NOON_CUTOFF_HOUR: u32 = 12;

/// How `In_Bed`/`Out_Bed` strings are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Try the built-in list of ISO-8601 and US diary layouts in order.
    #[default]
    Auto,
    /// A single chrono `strftime` pattern, e.g. `%m/%d/%y %H:%M`.
    Explicit(String),
}

/// Options for turning diary rows into sleep events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestOptions {
    pub timestamp_format: TimestampFormat,

    /// Skip rows missing `In_Bed` or `Out_Bed` instead of failing the run.
    ///
    /// Default: false. Rows with an unparseable timestamp are always fatal.
    pub skip_incomplete_rows: bool,
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_skip_incomplete_rows(mut self, enable: bool) -> Self {
        self.skip_incomplete_rows = enable;
        self
    }
}

/// Options controlling night assignment during reshaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeOptions {
    /// Onsets with a clock hour below this belong to the previous night.
    ///
    /// `12` treats a 01:30 bedtime as part of the evening before; `0`
    /// assigns every onset to its own calendar date.
    pub noon_cutoff_hour: u32,
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self {
            noon_cutoff_hour: DEFAULT_NOON_CUTOFF_HOUR,
        }
    }
}

impl ReshapeOptions {
    #[must_use]
    pub fn with_noon_cutoff(mut self, hour: u32) -> Self {
        self.noon_cutoff_hour = hour;
        self
    }
}
