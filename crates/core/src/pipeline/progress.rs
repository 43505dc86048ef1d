//! Progress aggregation over batch tallies.
//!
//! Pure functions of `BatchTally`; no independent state, recomputed by the
//! consumer on every tally update.

use serde::{Deserialize, Serialize};

use super::types::BatchTally;

/// Terminal summary of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// True only when no item failed.
    pub all_succeeded: bool,
    /// Items that succeeded.
    pub success_count: usize,
    /// Items that failed.
    pub failure_count: usize,
    /// Batch size.
    pub total: usize,
}

impl BatchSummary {
    /// Derives the summary from a tally.
    pub fn from_tally(tally: &BatchTally) -> Self {
        Self {
            all_succeeded: tally.failed == 0,
            success_count: tally.completed,
            failure_count: tally.failed,
            total: tally.total,
        }
    }
}

/// Overall percentage of items in a terminal state, 0.0 for an empty batch.
pub fn percent_complete(tally: &BatchTally) -> f32 {
    if tally.total == 0 {
        return 0.0;
    }
    (tally.resolved() as f32 / tally.total as f32) * 100.0
}
