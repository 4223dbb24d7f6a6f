//! Range filtering for activity records.

use crate::models::period::ResolvedRange;
use crate::models::record::ActivityRecord;

/// Whether a record overlaps a resolved range.
///
/// Interval overlap, not containment: a record spanning a range boundary
/// counts once, fully. The record's calendar dates are compared against the
/// range's inclusive day bounds.
pub fn record_overlaps(record: &ActivityRecord, range: &ResolvedRange) -> bool {
    record.start.date_naive() <= range.end && record.end.date_naive() >= range.start
}

/// Select the records overlapping the range. Input order is preserved; an
/// empty input or a non-overlapping range yields an empty result, not an
/// error.
pub fn records_in_range(records: &[ActivityRecord], range: &ResolvedRange) -> Vec<ActivityRecord> {
    records
        .iter()
        .filter(|r| record_overlaps(r, range))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> ResolvedRange {
        ResolvedRange {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    fn record(id: &str, start: &str, end: &str) -> ActivityRecord {
        ActivityRecord::new(id, start.parse().unwrap(), end.parse().unwrap())
    }

    #[test]
    fn test_record_fully_inside() {
        let r = record("a", "2024-02-05T09:00:00Z", "2024-02-05T17:00:00Z");
        assert!(record_overlaps(&r, &range((2024, 1, 1), (2024, 3, 31))));
    }

    #[test]
    fn test_record_spanning_whole_range() {
        let r = record("a", "2023-12-01T00:00:00Z", "2024-05-01T00:00:00Z");
        assert!(record_overlaps(&r, &range((2024, 1, 1), (2024, 3, 31))));
    }

    #[test]
    fn test_record_overlapping_start_boundary() {
        let r = record("a", "2023-12-28T00:00:00Z", "2024-01-03T00:00:00Z");
        assert!(record_overlaps(&r, &range((2024, 1, 1), (2024, 3, 31))));
    }

    #[test]
    fn test_record_overlapping_end_boundary() {
        let r = record("a", "2024-03-30T00:00:00Z", "2024-04-02T00:00:00Z");
        assert!(record_overlaps(&r, &range((2024, 1, 1), (2024, 3, 31))));
    }

    #[test]
    fn test_record_entirely_before() {
        let r = record("a", "2023-11-01T00:00:00Z", "2023-12-31T23:59:59Z");
        assert!(!record_overlaps(&r, &range((2024, 1, 1), (2024, 3, 31))));
    }

    #[test]
    fn test_record_entirely_after() {
        let r = record("a", "2024-04-01T00:00:00Z", "2024-04-02T00:00:00Z");
        assert!(!record_overlaps(&r, &range((2024, 1, 1), (2024, 3, 31))));
    }

    #[test]
    fn test_boundary_day_is_inclusive() {
        // A record on the last day of the range counts; the timestamp's
        // time-of-day must not push it out.
        let r = record("a", "2024-03-31T23:00:00Z", "2024-03-31T23:30:00Z");
        assert!(record_overlaps(&r, &range((2024, 1, 1), (2024, 3, 31))));
    }

    #[test]
    fn test_filter_preserves_order() {
        let records = vec![
            record("first", "2024-01-10T00:00:00Z", "2024-01-10T00:00:00Z"),
            record("outside", "2024-06-01T00:00:00Z", "2024-06-01T00:00:00Z"),
            record("second", "2024-02-10T00:00:00Z", "2024-02-10T00:00:00Z"),
            record("third", "2024-01-02T00:00:00Z", "2024-01-02T00:00:00Z"),
        ];
        let kept = records_in_range(&records, &range((2024, 1, 1), (2024, 3, 31)));

        let ids: Vec<&str> = kept.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(records_in_range(&[], &range((2024, 1, 1), (2024, 3, 31))).is_empty());
    }

    #[test]
    fn test_filter_no_overlap() {
        let records = vec![record("a", "2025-01-01T00:00:00Z", "2025-01-02T00:00:00Z")];
        assert!(records_in_range(&records, &range((2024, 1, 1), (2024, 3, 31))).is_empty());
    }
}
