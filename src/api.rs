//! Public API surface for the analytics engine.
//!
//! This file consolidates the types and entry points consumed by the
//! dashboard's presentation layers. All DTO types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::error::{Error, Result};

pub use crate::models::period::Period;
pub use crate::models::period::PeriodKind;
pub use crate::models::period::ResolvedRange;
pub use crate::models::record::parse_records;
pub use crate::models::record::parse_records_json;
pub use crate::models::record::ActivityRecord;
pub use crate::models::record::RawRecord;
pub use crate::models::selection::PeriodSelection;

pub use crate::services::aggregate::month_bucket;
pub use crate::services::aggregate::month_trend_series;
pub use crate::services::aggregate::summarize;
pub use crate::services::aggregate::summarize_by;
pub use crate::services::aggregate::BucketKey;
pub use crate::services::aggregate::MetricsSummary;
pub use crate::services::aggregate::TrendPoint;
pub use crate::services::aggregate::TrendSeries;
pub use crate::services::compare::compare;
pub use crate::services::compare::compare_by;
pub use crate::services::compare::percentage_change;
pub use crate::services::compare::ComparisonBreakdown;
pub use crate::services::compare::ComparisonResult;
pub use crate::services::filter::record_overlaps;
pub use crate::services::filter::records_in_range;
