//! Types for the pipeline module.

use serde::{Deserialize, Serialize};

use crate::gateway::RemoteFileId;

/// State of one item moving through the pipeline.
///
/// Owned exclusively by that item's pipeline; everything else only reads
/// snapshots carried on status events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ItemState {
    /// Waiting for a concurrency slot.
    Pending,
    /// Fetching the source bytes from the backend.
    Downloading,
    /// Transcoding to the target codec.
    Converting,
    /// Uploading the converted bytes.
    Uploading,
    /// Terminal: uploaded successfully.
    Succeeded,
    /// Terminal: failed at some stage, with a human-readable reason.
    Failed { reason: String },
}

/// Presentation kind of a state, for icon/style selection by a UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Idle,
    Working,
    Success,
    Error,
}

impl ItemState {
    /// Short human-readable stage label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Converting => "converting",
            Self::Uploading => "uploading",
            Self::Succeeded => "done",
            Self::Failed { .. } => "failed",
        }
    }

    /// Presentation kind for this state.
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Pending => StatusKind::Idle,
            Self::Downloading | Self::Converting | Self::Uploading => StatusKind::Working,
            Self::Succeeded => StatusKind::Success,
            Self::Failed { .. } => StatusKind::Error,
        }
    }

    /// Whether the item is done, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed { .. })
    }

    /// Whether the item holds a concurrency slot.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Downloading | Self::Converting | Self::Uploading)
    }
}

/// Running counters for a batch.
///
/// Written only by the scheduler's collector; `completed + failed` never
/// exceeds `total` and equals it exactly when the batch is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTally {
    /// Number of items in the batch, fixed at batch start.
    pub total: usize,
    /// Items that reached `Succeeded`.
    pub completed: usize,
    /// Items that reached `Failed`.
    pub failed: usize,
}

impl BatchTally {
    /// Creates a fresh tally for a batch of `total` items.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            failed: 0,
        }
    }

    /// Records one item reaching `Succeeded`.
    pub fn record_success(&mut self) {
        self.completed += 1;
        debug_assert!(self.resolved() <= self.total);
    }

    /// Records one item reaching `Failed`.
    pub fn record_failure(&mut self) {
        self.failed += 1;
        debug_assert!(self.resolved() <= self.total);
    }

    /// Number of items in a terminal state.
    pub fn resolved(&self) -> usize {
        self.completed + self.failed
    }

    /// Whether every item is terminal.
    pub fn is_complete(&self) -> bool {
        self.resolved() == self.total
    }
}

/// Event emitted by the pipeline for consumption by any presentation layer.
///
/// Events carry the scheduler generation they belong to; consumers discard
/// events from generations older than the current one after a reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BatchEvent {
    /// An item transitioned to a new state.
    ItemStatus {
        generation: u64,
        index: usize,
        file_name: String,
        state: ItemState,
    },
    /// The batch tally changed after an item reached a terminal state.
    TallyUpdated { generation: u64, tally: BatchTally },
}

impl BatchEvent {
    /// The generation this event belongs to.
    pub fn generation(&self) -> u64 {
        match self {
            Self::ItemStatus { generation, .. } | Self::TallyUpdated { generation, .. } => {
                *generation
            }
        }
    }
}

/// Terminal outcome of one item.
#[derive(Debug, Clone)]
pub enum ItemOutcome {
    /// The converted file was uploaded under this identifier.
    Succeeded { remote_id: RemoteFileId },
    /// The item failed with a human-readable reason.
    Failed { reason: String },
}
