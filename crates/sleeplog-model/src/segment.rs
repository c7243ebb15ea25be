//! Recording segments and the editable segment list.
//!
//! A [`Segment`] ties one accelerometer recording to a subject and an
//! inclusive date range; each segment becomes one row of the wide table.
//! [`SegmentList`] is the caller-owned list edited before a conversion and
//! persisted as JSON.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{SegmentError, SegmentListError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Accelerometer recording identifier (usually the recording file name).
    #[serde(alias = "id")]
    pub recording_id: String,
    /// Older segment files carry no subject; an empty value is resolved by the caller.
    #[serde(default)]
    pub subject_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Segment {
    pub fn new(
        recording_id: impl Into<String>,
        subject_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            recording_id: recording_id.into(),
            subject_id: subject_id.into(),
            start_date,
            end_date,
        }
    }

    /// Check the structural invariants of the segment.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.recording_id.trim().is_empty() {
            return Err(SegmentError::EmptyRecordingId);
        }
        if self.subject_id.trim().is_empty() {
            return Err(SegmentError::EmptySubjectId);
        }
        if self.start_date > self.end_date {
            return Err(SegmentError::InvertedRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Number of nights covered, counting both ends. Zero for an inverted range.
    pub fn span(&self) -> usize {
        let days = (self.end_date - self.start_date).num_days();
        usize::try_from(days + 1).unwrap_or(0)
    }

    /// Calendar date of the 1-based night `night`.
    pub fn night_date(&self, night: usize) -> Option<NaiveDate> {
        let offset = u64::try_from(night.checked_sub(1)?).ok()?;
        self.start_date.checked_add_days(Days::new(offset))
    }

    /// Nights of the segment in chronological order.
    pub fn nights(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.span()).filter_map(|night| self.night_date(night))
    }

    fn trimmed(mut self) -> Self {
        self.recording_id = self.recording_id.trim().to_string();
        self.subject_id = self.subject_id.trim().to_string();
        self
    }
}

/// Ordered list of segments, edited before a conversion.
///
/// Edits through [`SegmentList::push`] and [`SegmentList::replace`] are
/// validated; imported lists are taken as-is so that a single bad entry can
/// be reported by the reshaper without discarding the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentList {
    segments: Vec<Segment>,
}

impl SegmentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_vec(self) -> Vec<Segment> {
        self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Append a segment after validating it. Identifiers are trimmed.
    pub fn push(&mut self, segment: Segment) -> Result<(), SegmentListError> {
        let segment = segment.trimmed();
        segment.validate()?;
        self.segments.push(segment);
        Ok(())
    }

    /// Insert a validated segment at `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, segment: Segment) -> Result<(), SegmentListError> {
        if index > self.segments.len() {
            return Err(SegmentListError::IndexOutOfRange {
                index,
                len: self.segments.len(),
            });
        }
        let segment = segment.trimmed();
        segment.validate()?;
        self.segments.insert(index, segment);
        Ok(())
    }

    /// Replace the segment at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, segment: Segment) -> Result<Segment, SegmentListError> {
        let len = self.segments.len();
        let segment = segment.trimmed();
        segment.validate()?;
        let slot = self
            .segments
            .get_mut(index)
            .ok_or(SegmentListError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, segment))
    }

    pub fn remove(&mut self, index: usize) -> Result<Segment, SegmentListError> {
        if index >= self.segments.len() {
            return Err(SegmentListError::IndexOutOfRange {
                index,
                len: self.segments.len(),
            });
        }
        Ok(self.segments.remove(index))
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Fill empty subject ids with `subject_id`, returning how many changed.
    pub fn fill_missing_subject(&mut self, subject_id: &str) -> usize {
        let mut filled = 0;
        for segment in &mut self.segments {
            if segment.subject_id.trim().is_empty() {
                segment.subject_id = subject_id.to_string();
                filled += 1;
            }
        }
        filled
    }

    /// Parse a JSON array of segment objects.
    pub fn from_json(json: &str) -> Result<Self, SegmentListError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, SegmentListError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Vec<Segment>> for SegmentList {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn span_counts_both_ends() {
        let one_day = Segment::new("R1", "A", date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(one_day.span(), 1);
        let across_month = Segment::new("R1", "A", date(2024, 1, 30), date(2024, 2, 2));
        assert_eq!(across_month.span(), 4);
        let nights: Vec<NaiveDate> = across_month.nights().collect();
        assert_eq!(nights.first(), Some(&date(2024, 1, 30)));
        assert_eq!(nights.last(), Some(&date(2024, 2, 2)));
    }

    #[test]
    fn inverted_range_has_no_nights() {
        let segment = Segment::new("R1", "A", date(2024, 1, 5), date(2024, 1, 1));
        assert_eq!(segment.span(), 0);
        assert_eq!(segment.nights().count(), 0);
        assert_eq!(
            segment.validate(),
            Err(SegmentError::InvertedRange {
                start: date(2024, 1, 5),
                end: date(2024, 1, 1),
            })
        );
    }

    #[test]
    fn night_date_is_one_based() {
        let segment = Segment::new("R1", "A", date(2024, 1, 1), date(2024, 1, 3));
        assert_eq!(segment.night_date(0), None);
        assert_eq!(segment.night_date(1), Some(date(2024, 1, 1)));
        assert_eq!(segment.night_date(3), Some(date(2024, 1, 3)));
    }
}
