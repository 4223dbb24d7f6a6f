//! Period-over-period comparison.
//!
//! Orchestrates the full pipeline for a widget request: resolve the primary
//! (and optional comparison) period, filter the record set against each
//! range, aggregate each side, and combine the two summaries into one
//! result with guarded delta arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::period::{Period, ResolvedRange};
use crate::models::record::ActivityRecord;
use crate::services::aggregate::{summarize, summarize_by, BucketKey, MetricsSummary, TrendSeries};
use crate::services::filter::records_in_range;

/// Combined primary/comparison metrics for one widget request.
///
/// Constructed fresh per request; carries no state beyond the call that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub primary: MetricsSummary,
    pub comparison: Option<MetricsSummary>,
    /// Percentage delta of the totals; `None` outside comparison mode.
    pub percentage_change: Option<f64>,
    /// Sum of both totals in comparison mode, the primary total otherwise.
    /// Stacked progress bars scale both segments against this.
    pub combined_total: f64,
    pub is_comparison_mode: bool,
    pub primary_label: String,
    pub comparison_label: Option<String>,
    pub primary_range: ResolvedRange,
    pub comparison_range: Option<ResolvedRange>,
}

/// Comparison result plus the bucketed series for both sides, for widgets
/// that render a trend chart next to the badges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBreakdown {
    pub result: ComparisonResult,
    pub primary_series: TrendSeries,
    pub comparison_series: Option<TrendSeries>,
}

/// Percentage change of `current` against `baseline`, guarded for zero
/// baselines.
///
/// A zero baseline with a positive current value reads as a 100% increase;
/// two zeros read as no change. Both are badge values shown to users, not
/// error conditions.
pub fn percentage_change(current: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        ((current - baseline) / baseline) * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Resolve, filter and aggregate the primary (and optional comparison)
/// period over one measure.
pub fn compare<F>(
    records: &[ActivityRecord],
    primary: &Period,
    comparison: Option<&Period>,
    measure: F,
) -> Result<ComparisonResult>
where
    F: Fn(&ActivityRecord) -> f64,
{
    let primary_range = primary.resolve()?;
    let primary_summary = summarize(&records_in_range(records, &primary_range), &measure);

    let comparison = match comparison {
        None => {
            return Ok(ComparisonResult {
                combined_total: primary_summary.total,
                primary: primary_summary,
                comparison: None,
                percentage_change: None,
                is_comparison_mode: false,
                primary_label: primary.label(),
                comparison_label: None,
                primary_range,
                comparison_range: None,
            });
        }
        Some(period) => period,
    };

    let comparison_range = comparison.resolve()?;
    let comparison_summary = summarize(&records_in_range(records, &comparison_range), &measure);

    Ok(ComparisonResult {
        percentage_change: Some(percentage_change(
            primary_summary.total,
            comparison_summary.total,
        )),
        combined_total: primary_summary.total + comparison_summary.total,
        is_comparison_mode: true,
        primary_label: primary.label(),
        comparison_label: Some(comparison.label()),
        primary: primary_summary,
        comparison: Some(comparison_summary),
        primary_range,
        comparison_range: Some(comparison_range),
    })
}

/// Like [`compare`], additionally bucketing each side with the supplied
/// grouper. Peaks in the returned summaries come from the buckets.
pub fn compare_by<F, G>(
    records: &[ActivityRecord],
    primary: &Period,
    comparison: Option<&Period>,
    measure: F,
    bucket_fn: G,
) -> Result<ComparisonBreakdown>
where
    F: Fn(&ActivityRecord) -> f64,
    G: Fn(&ActivityRecord) -> BucketKey,
{
    let mut result = compare(records, primary, comparison, &measure)?;

    let primary_records = records_in_range(records, &result.primary_range);
    let (primary_summary, primary_series) = summarize_by(&primary_records, &measure, &bucket_fn);
    result.primary = primary_summary;

    let comparison_series = match result.comparison_range {
        Some(range) => {
            let comparison_records = records_in_range(records, &range);
            let (comparison_summary, series) =
                summarize_by(&comparison_records, &measure, &bucket_fn);
            result.comparison = Some(comparison_summary);
            Some(series)
        }
        None => None,
    };

    Ok(ComparisonBreakdown {
        result,
        primary_series,
        comparison_series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::services::aggregate::month_bucket;
    use chrono::{DateTime, Utc};

    fn record(id: &str, start: &str, participants: f64) -> ActivityRecord {
        let ts: DateTime<Utc> = start.parse().unwrap();
        ActivityRecord::new(id, ts, ts).with_measure("participants", participants)
    }

    fn participants(r: &ActivityRecord) -> f64 {
        r.measure("participants")
    }

    fn two_year_records() -> Vec<ActivityRecord> {
        vec![
            record("a", "2024-01-10T09:00:00Z", 5.0),
            record("b", "2024-02-10T09:00:00Z", 7.0),
            record("c", "2023-01-12T09:00:00Z", 4.0),
            record("d", "2023-03-12T09:00:00Z", 2.0),
        ]
    }

    #[test]
    fn test_percentage_change_positive_baseline() {
        assert_eq!(percentage_change(5.0, 10.0), -50.0);
        assert_eq!(percentage_change(15.0, 10.0), 50.0);
        assert_eq!(percentage_change(10.0, 10.0), 0.0);
    }

    #[test]
    fn test_percentage_change_zero_baseline_growth() {
        assert_eq!(percentage_change(5.0, 0.0), 100.0);
    }

    #[test]
    fn test_percentage_change_both_zero() {
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_compare_without_comparison_period() {
        let result = compare(
            &two_year_records(),
            &Period::Calendar { year: 2024 },
            None,
            participants,
        )
        .unwrap();

        assert!(!result.is_comparison_mode);
        assert_eq!(result.comparison, None);
        assert_eq!(result.percentage_change, None);
        assert_eq!(result.comparison_label, None);
        assert_eq!(result.primary.total, 12.0);
        assert_eq!(result.combined_total, 12.0);
        assert_eq!(result.primary_label, "2024");
    }

    #[test]
    fn test_compare_with_comparison_period() {
        let result = compare(
            &two_year_records(),
            &Period::Calendar { year: 2024 },
            Some(&Period::Calendar { year: 2023 }),
            participants,
        )
        .unwrap();

        assert!(result.is_comparison_mode);
        assert_eq!(result.primary.total, 12.0);
        assert_eq!(result.comparison.as_ref().unwrap().total, 6.0);
        assert_eq!(result.percentage_change, Some(100.0));
        assert_eq!(result.combined_total, 18.0);
        assert_eq!(result.comparison_label.as_deref(), Some("2023"));
    }

    #[test]
    fn test_compare_zero_baseline_yields_100_percent() {
        let records = vec![record("a", "2024-01-10T09:00:00Z", 5.0)];
        let result = compare(
            &records,
            &Period::Calendar { year: 2024 },
            Some(&Period::Calendar { year: 2023 }),
            participants,
        )
        .unwrap();

        assert_eq!(result.percentage_change, Some(100.0));
        assert_eq!(result.comparison.as_ref().unwrap().total, 0.0);
    }

    #[test]
    fn test_compare_both_empty_yields_zero_percent() {
        let result = compare(
            &[],
            &Period::Calendar { year: 2024 },
            Some(&Period::Calendar { year: 2023 }),
            participants,
        )
        .unwrap();

        assert_eq!(result.percentage_change, Some(0.0));
        assert_eq!(result.combined_total, 0.0);
    }

    #[test]
    fn test_compare_shrinking_total() {
        let records = vec![
            record("now", "2024-01-10T09:00:00Z", 5.0),
            record("then", "2023-01-10T09:00:00Z", 10.0),
        ];
        let result = compare(
            &records,
            &Period::Calendar { year: 2024 },
            Some(&Period::Calendar { year: 2023 }),
            participants,
        )
        .unwrap();

        assert_eq!(result.percentage_change, Some(-50.0));
    }

    #[test]
    fn test_compare_propagates_invalid_period() {
        let err = compare(
            &[],
            &Period::Quarterly {
                year: 2024,
                quarter: 9,
            },
            None,
            participants,
        )
        .unwrap_err();

        assert!(matches!(err, Error::QuarterOutOfRange { quarter: 9 }));
    }

    #[test]
    fn test_compare_is_idempotent() {
        let records = two_year_records();
        let primary = Period::Calendar { year: 2024 };
        let comparison = Period::Calendar { year: 2023 };

        let first = compare(&records, &primary, Some(&comparison), participants).unwrap();
        let second = compare(&records, &primary, Some(&comparison), participants).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compare_by_returns_series_for_both_sides() {
        let breakdown = compare_by(
            &two_year_records(),
            &Period::Calendar { year: 2024 },
            Some(&Period::Calendar { year: 2023 }),
            participants,
            month_bucket,
        )
        .unwrap();

        let primary_labels: Vec<&str> = breakdown
            .primary_series
            .points
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(primary_labels, vec!["Jan", "Feb"]);

        let comparison_labels: Vec<&str> = breakdown
            .comparison_series
            .as_ref()
            .unwrap()
            .points
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(comparison_labels, vec!["Jan", "Mar"]);

        // Peaks now come from the buckets, not individual records.
        assert_eq!(breakdown.result.primary.peak_label, "Feb");
        assert_eq!(breakdown.result.primary.peak_value, 7.0);
    }

    #[test]
    fn test_compare_by_without_comparison() {
        let breakdown = compare_by(
            &two_year_records(),
            &Period::Calendar { year: 2024 },
            None,
            participants,
            month_bucket,
        )
        .unwrap();

        assert!(breakdown.comparison_series.is_none());
        assert!(!breakdown.result.is_comparison_mode);
    }
}
