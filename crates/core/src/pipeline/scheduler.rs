//! Batch scheduler with a fixed concurrency ceiling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::gateway::{FileDescriptor, FileGateway, GatewayError, TargetFolder};
use crate::transcoder::Transcoder;

use super::config::SchedulerConfig;
use super::item::{self, StatusEmitter};
use super::types::{BatchEvent, BatchTally, ItemOutcome, ItemState};

/// Errors that prevent a batch from starting.
///
/// Per-item failures never surface here; they are folded into the tally.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Quality outside the accepted (0, 1] range.
    #[error("Invalid quality {quality}, expected a value in (0, 1]")]
    InvalidQuality { quality: f32 },

    /// No destination folder was given and creating one failed.
    #[error("Failed to create destination folder: {0}")]
    FolderCreation(GatewayError),
}

/// One item reached a terminal state.
///
/// Carries the item's concurrency permit so the collector, the sole writer
/// of the tally, releases the slot in the same step as the tally update.
struct TerminalEvent {
    index: usize,
    outcome: ItemOutcome,
    permit: OwnedSemaphorePermit,
}

/// Drives a batch of items through per-item pipelines with bounded
/// concurrency.
///
/// Admission follows the original selection order; at most
/// `max_concurrent_items` items are active at once. The scheduler is the
/// only writer of the batch tally: workers report terminal outcomes over a
/// single channel and the collector folds them in one at a time.
pub struct BatchScheduler<T: Transcoder, G: FileGateway> {
    config: SchedulerConfig,
    transcoder: Arc<T>,
    gateway: Arc<G>,
    events: mpsc::UnboundedSender<BatchEvent>,
    generation: AtomicU64,
}

impl<T: Transcoder + 'static, G: FileGateway + 'static> BatchScheduler<T, G> {
    /// Creates a scheduler and the receiving end of its event stream.
    ///
    /// Dropping the receiver detaches presentation without affecting the
    /// pipeline.
    pub fn new(
        config: SchedulerConfig,
        transcoder: T,
        gateway: G,
    ) -> (Self, mpsc::UnboundedReceiver<BatchEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            config,
            transcoder: Arc::new(transcoder),
            gateway: Arc::new(gateway),
            events,
            generation: AtomicU64::new(0),
        };
        (scheduler, events_rx)
    }

    /// The current run generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Abandons the current run: bumps the generation so that events from
    /// in-flight items are recognizably stale. Returns the new generation.
    ///
    /// The caller is expected to also drop the pending `run` future, which
    /// aborts its remaining workers.
    pub fn reset(&self) -> u64 {
        let next = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation = next, "Pipeline reset");
        next
    }

    /// Whether an event belongs to the current generation.
    pub fn is_current(&self, event: &BatchEvent) -> bool {
        event.generation() == self.generation()
    }

    /// Runs a batch to completion and returns the final tally.
    ///
    /// Resolves only once every item is terminal; a failing item never
    /// aborts its siblings. When `folder` is `None` a new destination
    /// folder is created (each such run creates a distinct folder).
    pub async fn run(
        &self,
        items: Vec<FileDescriptor>,
        folder: Option<TargetFolder>,
        quality: f32,
    ) -> Result<BatchTally, SchedulerError> {
        if !(quality > 0.0 && quality <= 1.0) {
            return Err(SchedulerError::InvalidQuality { quality });
        }

        let generation = self.generation();
        let folder = match folder {
            Some(folder) => folder,
            None => self
                .gateway
                .create_folder(&self.config.default_folder_name)
                .await
                .map_err(SchedulerError::FolderCreation)?,
        };

        let total = items.len();
        if total > self.config.max_batch_size {
            warn!(
                total,
                limit = self.config.max_batch_size,
                "Batch exceeds the selection-time size limit"
            );
        }
        info!(total, folder = %folder.name, quality, "Starting conversion batch");

        for (index, item) in items.iter().enumerate() {
            let _ = self.events.send(BatchEvent::ItemStatus {
                generation,
                index,
                file_name: item.name.clone(),
                state: ItemState::Pending,
            });
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_items));
        let (terminal_tx, mut terminal_rx) = mpsc::unbounded_channel::<TerminalEvent>();

        let mut tasks: JoinSet<()> = JoinSet::new();
        let admitter = async {
            for (index, item) in items.into_iter().enumerate() {
                // Acquiring before spawn keeps admission in selection order.
                let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                    break;
                };

                let transcoder = Arc::clone(&self.transcoder);
                let gateway = Arc::clone(&self.gateway);
                let config = self.config.clone();
                let folder = folder.clone();
                let events = self.events.clone();
                let terminal_tx = terminal_tx.clone();

                tasks.spawn(async move {
                    let emitter =
                        StatusEmitter::new(events, generation, index, item.name.clone());
                    let outcome = item::run_item(
                        &item,
                        &folder,
                        quality,
                        &config,
                        transcoder.as_ref(),
                        gateway.as_ref(),
                        &emitter,
                    )
                    .await;
                    let _ = terminal_tx.send(TerminalEvent {
                        index,
                        outcome,
                        permit,
                    });
                });
            }
            drop(terminal_tx);
        };

        let collector = async {
            let mut tally = BatchTally::new(total);
            while !tally.is_complete() {
                let Some(event) = terminal_rx.recv().await else {
                    break;
                };
                let TerminalEvent {
                    index,
                    outcome,
                    permit,
                } = event;

                match &outcome {
                    ItemOutcome::Succeeded { .. } => tally.record_success(),
                    ItemOutcome::Failed { .. } => tally.record_failure(),
                }
                // Tally update and slot release are one step; the freed slot
                // is only observable together with the updated counts.
                drop(permit);

                debug!(
                    index,
                    resolved = tally.resolved(),
                    total,
                    "Item reached terminal state"
                );
                let _ = self
                    .events
                    .send(BatchEvent::TallyUpdated { generation, tally });
            }
            tally
        };

        let ((), tally) = futures::future::join(admitter, collector).await;

        info!(
            completed = tally.completed,
            failed = tally.failed,
            total = tally.total,
            "Batch finished"
        );
        Ok(tally)
    }
}
