use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::period::{Period, PeriodKind};

/// Caller-owned period selection with the comparison-mode transition rules.
///
/// The engine itself is stateless; widgets hold one of these values and
/// drive it through the transitions below. The invariant the transitions
/// maintain: primary and comparison periods always share the same
/// [`PeriodKind`] while comparison mode is on. Users pick different years,
/// quarters or ranges of one kind, never mismatched kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSelection {
    pub primary: Period,
    pub comparison: Option<Period>,
}

impl PeriodSelection {
    /// Start with comparison mode off.
    pub fn new(primary: Period) -> Self {
        Self {
            primary,
            comparison: None,
        }
    }

    pub fn is_comparison_mode(&self) -> bool {
        self.comparison.is_some()
    }

    /// Turn comparison mode on.
    ///
    /// Without an explicit period the comparison defaults to the previous
    /// bucket of the primary (same kind, one year back). An explicit period
    /// is re-synced to the primary's kind first, so a stale descriptor from
    /// a widget can never introduce a kind mismatch.
    pub fn enable_comparison(&mut self, explicit: Option<Period>) -> Result<()> {
        let comparison = match explicit {
            Some(period) => period.with_kind(self.primary.kind())?,
            None => self.primary.previous(),
        };
        self.comparison = Some(comparison);
        Ok(())
    }

    /// Turn comparison mode off. The comparison period is discarded, not
    /// retained: re-enabling re-derives from the primary from scratch.
    pub fn disable_comparison(&mut self) {
        self.comparison = None;
    }

    /// Replace the primary period. While comparison mode is on, the
    /// comparison period's kind is forced to follow, keeping its last
    /// user-set year where that remains structurally valid.
    pub fn set_primary(&mut self, period: Period) -> Result<()> {
        if let Some(comparison) = self.comparison {
            self.comparison = Some(comparison.with_kind(period.kind())?);
        }
        self.primary = period;
        Ok(())
    }
}
