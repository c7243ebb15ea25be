//! Raw diary table loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

pub const SUBJECT_COLUMN: &str = "SUBJECT";
pub const IN_BED_COLUMN: &str = "In_Bed";
pub const OUT_BED_COLUMN: &str = "Out_Bed";

/// A diary CSV as trimmed strings, with the source line of every row.
#[derive(Debug, Clone, Default)]
pub struct DiaryTable {
    /// File path or other label used in error messages.
    pub source_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 1-based source line for each entry of `rows`.
    pub lines: Vec<u64>,
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl DiaryTable {
    /// Read a diary from any reader; the first non-blank record is the header.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut table = DiaryTable {
            source_name: source_name.to_string(),
            ..DiaryTable::default()
        };
        let mut header_seen = false;
        for record in reader.records() {
            let record = record.map_err(|source| IngestError::CsvParse {
                source_name: source_name.to_string(),
                source,
            })?;
            if record.iter().all(|value| value.trim().is_empty()) {
                continue;
            }
            if !header_seen {
                table.headers = record.iter().map(normalize_header).collect();
                header_seen = true;
                continue;
            }
            let line = record.position().map_or(0, csv::Position::line);
            let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
            row.resize(table.headers.len(), String::new());
            table.rows.push(row);
            table.lines.push(line);
        }
        debug!(
            source = %source_name,
            columns = table.headers.len(),
            rows = table.rows.len(),
            "diary table loaded"
        );
        Ok(table)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a diary CSV from disk.
pub fn read_diary_table(path: &Path) -> Result<DiaryTable> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    DiaryTable::from_reader(file, &path.display().to_string())
}

/// Positions of the three required diary columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiaryColumns {
    pub subject: usize,
    pub in_bed: usize,
    pub out_bed: usize,
}

impl DiaryColumns {
    /// Locate `SUBJECT`, `In_Bed` and `Out_Bed` (case-insensitive).
    pub fn resolve(table: &DiaryTable) -> Result<Self> {
        let subject = table.column_index(SUBJECT_COLUMN);
        let in_bed = table.column_index(IN_BED_COLUMN);
        let out_bed = table.column_index(OUT_BED_COLUMN);
        match (subject, in_bed, out_bed) {
            (Some(subject), Some(in_bed), Some(out_bed)) => Ok(Self {
                subject,
                in_bed,
                out_bed,
            }),
            _ => {
                let missing = [
                    (SUBJECT_COLUMN, subject),
                    (IN_BED_COLUMN, in_bed),
                    (OUT_BED_COLUMN, out_bed),
                ]
                .into_iter()
                .filter(|(_, index)| index.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                Err(IngestError::MissingColumns {
                    missing,
                    found: table.headers.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_first_non_blank_record() {
        let csv = "\n\u{feff}SUBJECT , In_Bed,Out_Bed\n,,\nA,2024-01-01T23:00,2024-01-02T07:00\n";
        let table = DiaryTable::from_reader(csv.as_bytes(), "inline").unwrap();
        assert_eq!(table.headers, vec!["SUBJECT", "In_Bed", "Out_Bed"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.lines, vec![4]);
    }

    #[test]
    fn short_rows_are_padded() {
        let csv = "SUBJECT,In_Bed,Out_Bed\nA,2024-01-01T23:00\n";
        let table = DiaryTable::from_reader(csv.as_bytes(), "inline").unwrap();
        assert_eq!(table.rows[0], vec!["A", "2024-01-01T23:00", ""]);
    }

    #[test]
    fn resolve_reports_every_missing_column() {
        let csv = "subject,Bedtime\nA,x\n";
        let table = DiaryTable::from_reader(csv.as_bytes(), "inline").unwrap();
        let err = DiaryColumns::resolve(&table).unwrap_err();
        match err {
            IngestError::MissingColumns { missing, found } => {
                assert_eq!(missing, vec!["In_Bed", "Out_Bed"]);
                assert_eq!(found, vec!["subject", "Bedtime"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
