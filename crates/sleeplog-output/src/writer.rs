//! CSV writing for wide tables.

use std::fs;
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::info;

use sleeplog_model::Segment;

use crate::error::{OutputError, Result};
use crate::layout::WideTable;

const OUTPUT_SUFFIX: &str = "_sleeplog_advanced.csv";

fn write_records<W: Write>(table: &WideTable, writer: &mut csv::Writer<W>) -> csv::Result<()> {
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    Ok(())
}

fn builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.terminator(Terminator::Any(b'\n'));
    builder
}

/// Encode the table as CSV text.
pub fn to_csv_string(table: &WideTable) -> Result<String> {
    let mut writer = builder().from_writer(Vec::new());
    write_records(table, &mut writer)?;
    let bytes = writer
        .into_inner()
        .map_err(|error| OutputError::Flush(error.into_error()))?;
    String::from_utf8(bytes).map_err(|_| OutputError::Utf8)
}

/// Write the table to `path`, creating parent directories as needed.
pub fn write_csv(table: &WideTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut writer = builder()
        .from_path(path)
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    write_records(table, &mut writer).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush()?;
    info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "sleeplog written"
    );
    Ok(())
}

/// File name for a converted sleeplog.
///
/// Uses `<subject>_sleeplog_advanced.csv` when every segment belongs to the
/// same subject (with `/` removed), `sleeplog_advanced.csv` otherwise.
pub fn default_output_name(segments: &[Segment]) -> String {
    let mut subjects = segments.iter().map(|segment| segment.subject_id.trim());
    let Some(first) = subjects.next() else {
        return OUTPUT_SUFFIX.trim_start_matches('_').to_string();
    };
    if first.is_empty() || subjects.any(|subject| subject != first) {
        return OUTPUT_SUFFIX.trim_start_matches('_').to_string();
    }
    format!("{}{OUTPUT_SUFFIX}", first.replace('/', ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn segment(subject: &str) -> Segment {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Segment::new("R", subject, day, day)
    }

    #[test]
    fn output_name_uses_shared_subject() {
        assert_eq!(
            default_output_name(&[segment("AK/01"), segment("AK/01")]),
            "AK01_sleeplog_advanced.csv"
        );
        assert_eq!(
            default_output_name(&[segment("A"), segment("B")]),
            "sleeplog_advanced.csv"
        );
        assert_eq!(default_output_name(&[]), "sleeplog_advanced.csv");
    }

    #[test]
    fn empty_cells_are_not_quoted() {
        let table = WideTable {
            headers: vec!["a".to_string(), "b".to_string()],
            rows: vec![vec!["x".to_string(), String::new()]],
        };
        assert_eq!(to_csv_string(&table).unwrap(), "a,b\nx,\n");
    }
}
