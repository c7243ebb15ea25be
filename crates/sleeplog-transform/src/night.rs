//! Night assignment.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};

use sleeplog_model::{ReshapeOptions, SleepEvent, SleepInterval};

/// Night an onset belongs to.
///
/// An onset whose clock hour is below the cutoff happened after midnight and
/// belongs to the previous evening. Onsets just before midnight keep their
/// own date whatever the cutoff.
pub fn night_date(onset: NaiveDateTime, options: &ReshapeOptions) -> NaiveDate {
    let date = onset.date();
    if onset.hour() < options.noon_cutoff_hour {
        date.checked_sub_days(Days::new(1)).unwrap_or(date)
    } else {
        date
    }
}

/// One subject's intervals grouped by night date, onsets ascending.
#[derive(Debug, Clone, Default)]
pub struct NightIndex {
    nights: BTreeMap<NaiveDate, Vec<SleepInterval>>,
}

impl NightIndex {
    pub fn build<'a>(
        events: impl IntoIterator<Item = &'a SleepEvent>,
        options: &ReshapeOptions,
    ) -> Self {
        let mut nights: BTreeMap<NaiveDate, Vec<SleepInterval>> = BTreeMap::new();
        for event in events {
            nights
                .entry(night_date(event.bed_time, options))
                .or_default()
                .push(event.interval());
        }
        for intervals in nights.values_mut() {
            intervals.sort();
        }
        Self { nights }
    }

    pub fn get(&self, date: NaiveDate) -> &[SleepInterval] {
        self.nights.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn first_night(&self) -> Option<NaiveDate> {
        self.nights.keys().next().copied()
    }

    pub fn last_night(&self) -> Option<NaiveDate> {
        self.nights.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn evening_onset_keeps_its_date() {
        let options = ReshapeOptions::default();
        assert_eq!(night_date(at(2024, 1, 1, 23, 0), &options), date(2024, 1, 1));
        assert_eq!(night_date(at(2024, 1, 1, 12, 0), &options), date(2024, 1, 1));
    }

    #[test]
    fn after_midnight_onset_moves_to_previous_evening() {
        let options = ReshapeOptions::default();
        assert_eq!(night_date(at(2024, 1, 2, 1, 30), &options), date(2024, 1, 1));
        assert_eq!(night_date(at(2024, 3, 1, 11, 59), &options), date(2024, 2, 29));
    }

    #[test]
    fn zero_cutoff_uses_calendar_date() {
        let options = ReshapeOptions::default().with_noon_cutoff(0);
        assert_eq!(night_date(at(2024, 1, 2, 1, 30), &options), date(2024, 1, 2));
    }
}
