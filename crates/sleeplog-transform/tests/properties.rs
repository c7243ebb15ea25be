//! Property tests for the reshaping contract.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use sleeplog_model::{NightCell, ReshapeOptions, Segment, SleepEvent};
use sleeplog_transform::reshape;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn event_strategy() -> impl Strategy<Value = SleepEvent> {
    (0usize..3, 0i64..40, 0u32..24, 0u32..60, 60i64..720).prop_map(
        |(subject, day, hour, minute, minutes_asleep)| {
            let bed_time = (base() + Duration::days(day))
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            SleepEvent {
                row: 0,
                subject_id: format!("S{subject}"),
                bed_time,
                wake_time: bed_time + Duration::minutes(minutes_asleep),
            }
        },
    )
}

fn segment_strategy() -> impl Strategy<Value = Segment> {
    (0usize..4, 0i64..40, 0i64..14).prop_map(|(subject, start, length)| {
        let start_date = base() + Duration::days(start);
        Segment::new(
            format!("REC-{subject}-{start}"),
            format!("S{subject}"),
            start_date,
            start_date + Duration::days(length),
        )
    })
}

proptest! {
    #[test]
    fn one_row_per_segment_in_order(
        events in prop::collection::vec(event_strategy(), 0..60),
        segments in prop::collection::vec(segment_strategy(), 0..8),
    ) {
        let reshaped = reshape(&events, &segments, &ReshapeOptions::default());
        prop_assert_eq!(reshaped.rows.len(), segments.len());
        for (row, segment) in reshaped.rows.iter().zip(&segments) {
            prop_assert_eq!(&row.recording_id, &segment.recording_id);
            prop_assert_eq!(row.span, segment.span());
        }
    }

    #[test]
    fn every_row_has_batch_width(
        events in prop::collection::vec(event_strategy(), 0..60),
        segments in prop::collection::vec(segment_strategy(), 1..8),
    ) {
        let reshaped = reshape(&events, &segments, &ReshapeOptions::default());
        let widest = segments.iter().map(Segment::span).max().unwrap_or(0);
        prop_assert_eq!(reshaped.width, widest);
        for row in &reshaped.rows {
            prop_assert_eq!(row.nights.len(), widest);
            prop_assert!(row.nights[row.span..].iter().all(NightCell::is_empty));
        }
    }

    #[test]
    fn reshape_is_deterministic(
        events in prop::collection::vec(event_strategy(), 0..60),
        segments in prop::collection::vec(segment_strategy(), 0..8),
    ) {
        let options = ReshapeOptions::default();
        prop_assert_eq!(
            reshape(&events, &segments, &options),
            reshape(&events, &segments, &options)
        );
    }
}
