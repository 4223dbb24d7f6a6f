//! Service layer for the analytics pipeline.
//!
//! Pure compute functions sitting between the record inputs and the
//! presentation layers: range filtering, metric aggregation, and
//! period-over-period comparison.

pub mod aggregate;
pub mod compare;
pub mod filter;

pub use aggregate::{month_bucket, month_trend_series, summarize, summarize_by};
pub use compare::{compare, compare_by, percentage_change};
pub use filter::{record_overlaps, records_in_range};
