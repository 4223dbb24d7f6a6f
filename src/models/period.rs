use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reporting period descriptor.
///
/// Every dashboard widget that filters by time does so through one of these
/// four shapes. The variant is the single source of truth: there are no
/// optional fields whose relevance depends on a runtime discriminator.
///
/// The serde representation is internally tagged so descriptors round-trip
/// with the frontend's JSON shape, e.g.
/// `{"type":"quarterly","year":2024,"quarter":1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Period {
    /// Calendar year, January through December.
    Calendar { year: i32 },
    /// Financial year starting in April of `year` and ending in March of
    /// `year + 1`.
    Financial { year: i32 },
    /// Calendar quarter (1-4) of `year`.
    Quarterly { year: i32, quarter: u8 },
    /// Explicit inclusive date range.
    Custom { start: NaiveDate, end: NaiveDate },
}

/// Bare period discriminator, used by the selection state machine to keep
/// primary and comparison periods on the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Calendar,
    Financial,
    Quarterly,
    Custom,
}

/// Concrete inclusive date range a period resolves to.
///
/// Always satisfies `start <= end`. Recomputed per query, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ResolvedRange {
    /// Create a new range, rejecting inverted bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Whether a day falls inside the range (inclusive on both ends).
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Inclusive day count of the range.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl Period {
    /// Build a custom period from `YYYY-MM-DD` strings.
    ///
    /// This is the entry point for descriptors arriving from the data-fetch
    /// layer, where malformed or inverted dates are a real possibility.
    pub fn custom_from_strs(start: &str, end: &str) -> Result<Self> {
        let start = parse_iso_date(start)?;
        let end = parse_iso_date(end)?;
        if start > end {
            return Err(Error::InvertedCustomRange { start, end });
        }
        Ok(Period::Custom { start, end })
    }

    /// The period's discriminator.
    pub fn kind(&self) -> PeriodKind {
        match self {
            Period::Calendar { .. } => PeriodKind::Calendar,
            Period::Financial { .. } => PeriodKind::Financial,
            Period::Quarterly { .. } => PeriodKind::Quarterly,
            Period::Custom { .. } => PeriodKind::Custom,
        }
    }

    /// The year anchoring the period. For custom ranges this is the year of
    /// the start date.
    pub fn year(&self) -> i32 {
        match self {
            Period::Calendar { year }
            | Period::Financial { year }
            | Period::Quarterly { year, .. } => *year,
            Period::Custom { start, .. } => start.year(),
        }
    }

    /// The quarter, when the period is quarterly.
    pub fn quarter(&self) -> Option<u8> {
        match self {
            Period::Quarterly { quarter, .. } => Some(*quarter),
            _ => None,
        }
    }

    /// Resolve the descriptor into concrete date boundaries.
    ///
    /// Pure and deterministic: no branch reads the wall clock, so a given
    /// descriptor always resolves to the same range.
    pub fn resolve(&self) -> Result<ResolvedRange> {
        match *self {
            Period::Calendar { year } => Ok(ResolvedRange {
                start: ymd(year, 1, 1)?,
                end: ymd(year, 12, 31)?,
            }),
            Period::Financial { year } => Ok(ResolvedRange {
                start: ymd(year, 4, 1)?,
                end: ymd(year + 1, 3, 31)?,
            }),
            Period::Quarterly { year, quarter } => {
                if !(1..=4).contains(&quarter) {
                    return Err(Error::QuarterOutOfRange { quarter });
                }
                let start_month = (quarter as u32 - 1) * 3 + 1;
                let end_month = start_month + 2;
                Ok(ResolvedRange {
                    start: ymd(year, start_month, 1)?,
                    end: last_day_of_month(year, end_month)?,
                })
            }
            Period::Custom { start, end } => {
                if start > end {
                    return Err(Error::InvertedCustomRange { start, end });
                }
                Ok(ResolvedRange { start, end })
            }
        }
    }

    /// Human-readable label for badges and chart legends.
    ///
    /// Labelling is presentation-only and never fails: even descriptors that
    /// would not resolve (quarter 7, inverted custom bounds) still render a
    /// non-empty string.
    pub fn label(&self) -> String {
        match *self {
            Period::Calendar { year } => format!("{}", year),
            Period::Financial { year } => format!(
                "FY{:02}/{:02}",
                year.rem_euclid(100),
                (year + 1).rem_euclid(100)
            ),
            Period::Quarterly { year, quarter } => format!("Q{} {}", quarter, year),
            Period::Custom { start, end } => format!(
                "{} – {}",
                start.format("%-d %b %Y"),
                end.format("%-d %b %Y")
            ),
        }
    }

    /// The previous bucket of the same kind: one year earlier for calendar,
    /// financial and quarterly periods, both bounds shifted back one year
    /// for custom ranges. Used as the default comparison period.
    pub fn previous(&self) -> Period {
        match *self {
            Period::Calendar { year } => Period::Calendar { year: year - 1 },
            Period::Financial { year } => Period::Financial { year: year - 1 },
            Period::Quarterly { year, quarter } => Period::Quarterly {
                year: year - 1,
                quarter,
            },
            Period::Custom { start, end } => Period::Custom {
                start: one_year_back(start),
                end: one_year_back(end),
            },
        }
    }

    /// Re-express the period as another kind, keeping as much of the
    /// user-set state as remains structurally valid.
    ///
    /// The anchoring year survives every conversion. A quarter does not
    /// survive a switch away from quarterly; a switch to quarterly defaults
    /// the quarter to 1. A switch to custom materializes the period's own
    /// resolved bounds, which is why this conversion can fail.
    pub fn with_kind(&self, kind: PeriodKind) -> Result<Period> {
        if self.kind() == kind {
            return Ok(*self);
        }
        match kind {
            PeriodKind::Calendar => Ok(Period::Calendar { year: self.year() }),
            PeriodKind::Financial => Ok(Period::Financial { year: self.year() }),
            PeriodKind::Quarterly => Ok(Period::Quarterly {
                year: self.year(),
                quarter: 1,
            }),
            PeriodKind::Custom => {
                let range = self.resolve()?;
                Ok(Period::Custom {
                    start: range.start,
                    end: range.end,
                })
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day)))
}

/// Last calendar day of a month, via first-day-of-next-month arithmetic.
/// Correct across leap years and variable month lengths.
fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = ymd(next_year, next_month, 1)?;
    first_of_next
        .pred_opt()
        .ok_or_else(|| Error::InvalidDate(format!("{:04}-{:02}", year, month)))
}

/// Same calendar date one year earlier, clamped to the month end when the
/// source date has no counterpart (Feb 29).
fn one_year_back(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() - 1, date.month(), date.day())
        .or_else(|| last_day_of_month(date.year() - 1, date.month()).ok())
        .unwrap_or(date)
}
