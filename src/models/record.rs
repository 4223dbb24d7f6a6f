use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A time-stamped dashboard fact: a workshop session, a site visit, a task,
/// a manpower entry. Records are immutable inputs; the engine never mutates
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Caller-assigned identifier, shown as the peak label in ungrouped
    /// summaries.
    pub record_id: String,
    /// Start of the activity.
    pub start: DateTime<Utc>,
    /// End of the activity; equals `start` for point-in-time facts.
    pub end: DateTime<Utc>,
    /// Named numeric measures (participants, hours, revenue, ...).
    #[serde(default)]
    pub measures: BTreeMap<String, f64>,
}

impl ActivityRecord {
    pub fn new(record_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            record_id: record_id.into(),
            start,
            end,
            measures: BTreeMap::new(),
        }
    }

    /// Attach a named measure (builder style).
    pub fn with_measure(mut self, name: impl Into<String>, value: f64) -> Self {
        self.measures.insert(name.into(), value);
        self
    }

    /// Value of a named measure. A record lacking the measure contributes
    /// zero, so one sparse record never poisons an aggregation.
    pub fn measure(&self, name: &str) -> f64 {
        self.measures.get(name).copied().unwrap_or(0.0)
    }
}

// ============================================================================
// JSON Parsing Functions
// ============================================================================
//
// Records arrive from the data-fetch layer with string timestamps. Parsing
// is skip-and-continue: a record with an unparseable timestamp is dropped
// with a warning and the rest of the batch goes through.

/// Raw record as delivered by the data-fetch layer, before timestamp
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub record_id: String,
    pub start: String,
    /// Missing end timestamps default to the start (point-in-time fact).
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub measures: BTreeMap<String, f64>,
}

/// Convert a batch of raw records, skipping the malformed ones.
pub fn parse_records(raw: &[RawRecord]) -> Vec<ActivityRecord> {
    let mut records = Vec::with_capacity(raw.len());

    for (index, input) in raw.iter().enumerate() {
        let record_id = if input.record_id.is_empty() {
            format!("record-{}", index)
        } else {
            input.record_id.clone()
        };

        let start = match parse_timestamp(&input.start) {
            Ok(ts) => ts,
            Err(e) => {
                warn!("Skipping record {}: {}", record_id, e);
                continue;
            }
        };
        let end = match &input.end {
            Some(raw_end) => match parse_timestamp(raw_end) {
                Ok(ts) => ts,
                Err(e) => {
                    warn!("Skipping record {}: {}", record_id, e);
                    continue;
                }
            },
            None => start,
        };

        records.push(ActivityRecord {
            record_id,
            start,
            end,
            measures: input.measures.clone(),
        });
    }

    debug!("Parsed {} of {} raw records", records.len(), raw.len());
    records
}

/// Parse a JSON array of raw records.
pub fn parse_records_json(json: &str) -> Result<Vec<ActivityRecord>> {
    let raw: Vec<RawRecord> =
        serde_json::from_str(json).context("Invalid records JSON")?;
    Ok(parse_records(&raw))
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
fn parse_timestamp(s: &str) -> crate::error::Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(crate::error::Error::InvalidDate(s.to_string()))
}
