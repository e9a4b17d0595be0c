//! Per-item update outcomes and the run-level report reducer.
//!
//! Every item processed by a price update resolves to exactly one
//! [`UpdateOutcome`]. A [`RunReport`] folds those outcomes into the
//! counters returned by the trigger endpoints. Reports are in-memory
//! only and scoped to a single invocation.

use std::fmt;

use super::ItemId;

/// Why an item was skipped rather than priced.
///
/// Skips are expected conditions, counted separately from failures, and
/// never produce an error message in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The item has no definition index; the listings API cannot
    /// identify it.
    MissingDefIndex,
    /// Neither wear bound is set; the listings API cannot disambiguate
    /// the skin's condition.
    MissingFloatRange,
    /// The query succeeded but returned zero listings.
    NoListings,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDefIndex => write!(f, "missing def_index"),
            Self::MissingFloatRange => write!(f, "missing float range"),
            Self::NoListings => write!(f, "no price data"),
        }
    }
}

/// The result of processing one item in an update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A price was resolved and appended to the history.
    Updated {
        /// The item that was priced.
        item_id: ItemId,
        /// Accepted price in cents.
        price_cents: i64,
    },
    /// The item was not priceable; expected, not an error.
    Skipped(SkipReason),
    /// Resolution or persistence failed for this item only. Carries the
    /// message recorded in the run report.
    Failed(String),
}

/// Aggregated counters for one update run.
///
/// Built by [`RunReport::record`], one call per item. Never persisted;
/// each invocation starts from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of items loaded for the run.
    pub total: usize,
    /// Items whose price was resolved and written.
    pub success: usize,
    /// Items that failed resolution or persistence.
    pub failed: usize,
    /// Items skipped for an expected reason.
    pub skipped: usize,
    /// Error messages in the order failures occurred.
    pub errors: Vec<String>,
}

impl RunReport {
    /// Creates an empty report for a run over `total` items.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Folds a single item outcome into the report.
    pub fn record(&mut self, outcome: UpdateOutcome) {
        match outcome {
            UpdateOutcome::Updated { .. } => self.success += 1,
            UpdateOutcome::Skipped(_) => self.skipped += 1,
            UpdateOutcome::Failed(message) => {
                self.failed += 1;
                self.errors.push(message);
            }
        }
    }

    /// Returns `true` when the run had no items to process.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
