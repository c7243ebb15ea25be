//! Rendering reshaped rows into a rectangular string table.
//!
//! Two layouts are supported:
//!
//! - [`OutputLayout::Nights`]: `recording_id, subject_id, night_1_onset,
//!   night_1_wake, ...` with full `YYYY-MM-DDTHH:MM` timestamps.
//! - [`OutputLayout::GgirAdvanced`]: the GGIR advanced sleeplog,
//!   `ID, D1_date, D1_wakeup, D1_inbed, ...`, one column group per calendar
//!   date. `wakeup` is the time the subject got up on the morning of that
//!   date and `inbed` the time they went to bed that evening.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use sleeplog_model::{Reshaped, SleepEvent, WideRow};

/// Timestamp layout of `night_N_onset` / `night_N_wake` cells.
pub const NIGHT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Date layout of GGIR `D{N}_date` cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Clock layout of GGIR `D{N}_wakeup` / `D{N}_inbed` cells.
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputLayout {
    #[default]
    Nights,
    GgirAdvanced,
}

/// Header plus rows, every row as long as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn render_table(reshaped: &Reshaped, events: &[SleepEvent], layout: OutputLayout) -> WideTable {
    match layout {
        OutputLayout::Nights => render_nights(reshaped),
        OutputLayout::GgirAdvanced => render_ggir(reshaped, events),
    }
}

fn format_opt(value: Option<NaiveDateTime>, format: &str) -> String {
    value.map_or_else(String::new, |value| value.format(format).to_string())
}

fn render_nights(reshaped: &Reshaped) -> WideTable {
    let mut headers = vec!["recording_id".to_string(), "subject_id".to_string()];
    for night in 1..=reshaped.width {
        headers.push(format!("night_{night}_onset"));
        headers.push(format!("night_{night}_wake"));
    }
    let rows = reshaped
        .rows
        .iter()
        .map(|row| {
            let mut values = Vec::with_capacity(headers.len());
            values.push(row.recording_id.clone());
            values.push(row.subject_id.clone());
            for cell in &row.nights {
                let selected = cell.selected();
                values.push(format_opt(
                    selected.map(|interval| interval.onset),
                    NIGHT_TIMESTAMP_FORMAT,
                ));
                values.push(format_opt(
                    selected.map(|interval| interval.wake),
                    NIGHT_TIMESTAMP_FORMAT,
                ));
            }
            values
        })
        .collect();
    WideTable { headers, rows }
}

/// Earliest wake time per (subject, wake date).
fn wakeups_by_date(events: &[SleepEvent]) -> BTreeMap<(&str, NaiveDate), NaiveDateTime> {
    let mut wakeups: BTreeMap<(&str, NaiveDate), NaiveDateTime> = BTreeMap::new();
    for event in events {
        let key = (event.subject_id.trim(), event.wake_time.date());
        wakeups
            .entry(key)
            .and_modify(|current| {
                if event.wake_time < *current {
                    *current = event.wake_time;
                }
            })
            .or_insert(event.wake_time);
    }
    wakeups
}

fn render_ggir(reshaped: &Reshaped, events: &[SleepEvent]) -> WideTable {
    let mut headers = vec!["ID".to_string()];
    for day in 1..=reshaped.width {
        headers.push(format!("D{day}_date"));
        headers.push(format!("D{day}_wakeup"));
        headers.push(format!("D{day}_inbed"));
    }
    let wakeups = wakeups_by_date(events);
    let rows = reshaped
        .rows
        .iter()
        .map(|row| ggir_row(row, &wakeups, headers.len()))
        .collect();
    WideTable { headers, rows }
}

fn ggir_row(
    row: &WideRow,
    wakeups: &BTreeMap<(&str, NaiveDate), NaiveDateTime>,
    len: usize,
) -> Vec<String> {
    let mut values = Vec::with_capacity(len);
    values.push(row.recording_id.clone());
    let subject = row.subject_id.trim();
    for (index, cell) in row.nights.iter().enumerate() {
        let Some(date) = row.date_at(index) else {
            values.extend([String::new(), String::new(), String::new()]);
            continue;
        };
        let wakeup = wakeups.get(&(subject, date)).copied();
        let inbed = cell.selected().map(|interval| interval.onset);
        values.push(date.format(DATE_FORMAT).to_string());
        values.push(format_opt(wakeup, TIME_FORMAT));
        values.push(format_opt(inbed, TIME_FORMAT));
    }
    values
}
