//! Segments used when no segment definitions are supplied.

use tracing::debug;

use sleeplog_model::{ReshapeOptions, Segment, SleepEvent};

use crate::night::NightIndex;

/// Strip characters that are invalid in file names (e.g. `/`).
pub fn sanitise_id(raw: &str) -> String {
    raw.trim().replace('/', "")
}

/// One segment per subject covering every night of their diary.
///
/// Subjects appear in first-seen order and the recording id is the
/// sanitised subject id.
pub fn default_segments(events: &[SleepEvent], options: &ReshapeOptions) -> Vec<Segment> {
    let mut order: Vec<&str> = Vec::new();
    for event in events {
        let subject = event.subject_id.trim();
        if !order.contains(&subject) {
            order.push(subject);
        }
    }

    order
        .into_iter()
        .filter_map(|subject| {
            let index = NightIndex::build(
                events
                    .iter()
                    .filter(|event| event.subject_id.trim() == subject),
                options,
            );
            let segment = Segment::new(
                sanitise_id(subject),
                subject,
                index.first_night()?,
                index.last_night()?,
            );
            debug!(
                nights = segment.span(),
                start = %segment.start_date,
                end = %segment.end_date,
                "default segment"
            );
            Some(segment)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitise_strips_slashes_and_whitespace() {
        assert_eq!(sanitise_id(" AK/01 "), "AK01");
        assert_eq!(sanitise_id("plain"), "plain");
    }
}
