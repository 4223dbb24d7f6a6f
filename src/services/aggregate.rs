//! Metric aggregation over filtered record sets.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::record::ActivityRecord;

/// Summary metrics for one measure over a record set.
///
/// Derived on every call; never cached, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Sum of the measure over all records. Zero for empty input.
    pub total: f64,
    /// `total / count`, zero when there are no records.
    pub average: f64,
    /// Label of the peak record or bucket. Empty only for empty input.
    pub peak_label: String,
    /// Value of the peak record or bucket.
    pub peak_value: f64,
    /// Number of records aggregated.
    pub count: usize,
}

/// One chart point: a bucket label and its subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

/// Chronologically ordered bucket series, consumed directly by chart
/// widgets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
}

/// Grouping key for bucketed aggregation: the sort date fixes the bucket's
/// chronological position, the label is what charts display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketKey {
    pub sort_key: NaiveDate,
    pub label: String,
}

/// Built-in monthly grouper: buckets a record by the month of its start
/// timestamp, labelled with the short month name.
pub fn month_bucket(record: &ActivityRecord) -> BucketKey {
    let first = month_start(record.start.date_naive());
    BucketKey {
        sort_key: first,
        label: month_label(first),
    }
}

/// Reduce a record set to summary metrics for one measure.
///
/// The peak is the record with the maximum per-record measure, first
/// occurrence winning ties. Empty input yields all-zero metrics and an
/// empty peak label, never `NaN`.
pub fn summarize<F>(records: &[ActivityRecord], measure: F) -> MetricsSummary
where
    F: Fn(&ActivityRecord) -> f64,
{
    let count = records.len();
    let total: f64 = records.iter().map(|r| measure(r)).sum();
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    let mut peak_label = String::new();
    let mut peak_value = 0.0;
    for (index, record) in records.iter().enumerate() {
        let value = measure(record);
        if index == 0 || value > peak_value {
            peak_label = record.record_id.clone();
            peak_value = value;
        }
    }

    MetricsSummary {
        total,
        average,
        peak_label,
        peak_value,
        count,
    }
}

/// Reduce a record set to summary metrics plus a bucketed series.
///
/// Subtotals are ordered chronologically by the bucket's sort date, never
/// by insertion or label order: downstream chart rendering and peak
/// detection rely on it. The peak is the bucket with the maximum subtotal;
/// ties keep the first chronological bucket, including the all-zero case.
pub fn summarize_by<F, G>(
    records: &[ActivityRecord],
    measure: F,
    bucket_fn: G,
) -> (MetricsSummary, TrendSeries)
where
    F: Fn(&ActivityRecord) -> f64,
    G: Fn(&ActivityRecord) -> BucketKey,
{
    let mut buckets: BTreeMap<NaiveDate, TrendPoint> = BTreeMap::new();
    for record in records {
        let key = bucket_fn(record);
        let value = measure(record);
        buckets
            .entry(key.sort_key)
            .and_modify(|point| point.value += value)
            .or_insert(TrendPoint {
                label: key.label,
                value,
            });
    }
    let points: Vec<TrendPoint> = buckets.into_values().collect();

    let mut summary = summarize(records, &measure);
    summary.peak_label = String::new();
    summary.peak_value = 0.0;
    for (index, point) in points.iter().enumerate() {
        if index == 0 || point.value > summary.peak_value {
            summary.peak_label = point.label.clone();
            summary.peak_value = point.value;
        }
    }

    (summary, TrendSeries { points })
}

/// Monthly subtotal series for trend charts.
///
/// With `pad_single_point` set, a series holding exactly one bucket is
/// padded with a zero-valued bucket on each side so a single data point
/// renders as a visible curve rather than a lone dot. Padding never feeds
/// back into totals or averages.
pub fn month_trend_series<F>(
    records: &[ActivityRecord],
    measure: F,
    pad_single_point: bool,
) -> TrendSeries
where
    F: Fn(&ActivityRecord) -> f64,
{
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        let key = month_start(record.start.date_naive());
        *buckets.entry(key).or_insert(0.0) += measure(record);
    }

    if pad_single_point && buckets.len() == 1 {
        if let Some((&only, _)) = buckets.iter().next() {
            buckets.insert(prev_month(only), 0.0);
            buckets.insert(next_month(only), 0.0);
        }
    }

    let points = buckets
        .into_iter()
        .map(|(first, value)| TrendPoint {
            label: month_label(first),
            value,
        })
        .collect();
    TrendSeries { points }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn month_label(first: NaiveDate) -> String {
    first.format("%b").to_string()
}

fn prev_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 1 {
        (first.year() - 1, 12)
    } else {
        (first.year(), first.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first)
}

fn next_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first)
}
