//! Per-item pipeline: download, transcode, upload.

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::gateway::{FileDescriptor, FileGateway, GatewayError, RemoteFileId, TargetFolder};
use crate::transcoder::{Transcoder, TranscoderError};

use super::config::SchedulerConfig;
use super::types::{BatchEvent, ItemOutcome, ItemState};

/// Error from one stage of the per-item pipeline.
///
/// Never escapes the item: it is converted to a terminal `Failed` state and
/// its display string becomes the user-facing reason.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The descriptor violated a selection-time limit.
    #[error("Rejected: {reason}")]
    Rejected { reason: String },

    /// The download stage failed.
    #[error("Download failed: {0}")]
    Download(GatewayError),

    /// The conversion stage failed.
    #[error("Conversion failed: {0}")]
    Convert(TranscoderError),

    /// The upload stage failed.
    #[error("Upload failed: {0}")]
    Upload(GatewayError),
}

/// Emits status updates for one item, stamped with the run generation.
///
/// Updates are sent synchronously with each state change; a dropped
/// receiver is ignored so presentation can detach at any time.
pub struct StatusEmitter {
    tx: mpsc::UnboundedSender<BatchEvent>,
    generation: u64,
    index: usize,
    file_name: String,
}

impl StatusEmitter {
    /// Creates an emitter for the item at `index`.
    pub fn new(
        tx: mpsc::UnboundedSender<BatchEvent>,
        generation: u64,
        index: usize,
        file_name: String,
    ) -> Self {
        Self {
            tx,
            generation,
            index,
            file_name,
        }
    }

    /// Emits a state transition for this item.
    pub fn emit(&self, state: ItemState) {
        debug!(
            index = self.index,
            file = %self.file_name,
            stage = state.label(),
            "Item state changed"
        );
        let _ = self.tx.send(BatchEvent::ItemStatus {
            generation: self.generation,
            index: self.index,
            file_name: self.file_name.clone(),
            state,
        });
    }
}

/// Derives the uploaded file name from the source name.
///
/// A case-insensitive `.jpg`/`.jpeg` suffix is replaced with `.webp`; names
/// without that suffix pass through unchanged.
pub fn output_file_name(source_name: &str) -> String {
    let lower = source_name.to_ascii_lowercase();
    for ext in [".jpeg", ".jpg"] {
        if lower.ends_with(ext) {
            let stem = &source_name[..source_name.len() - ext.len()];
            return format!("{stem}.webp");
        }
    }
    source_name.to_string()
}

/// Checks a descriptor against the selection-time limits.
///
/// The limits are enforced upstream, but a violating descriptor must fail
/// its own item rather than crash the batch.
fn validate_descriptor(item: &FileDescriptor, config: &SchedulerConfig) -> Result<(), ItemError> {
    if item.mime_type != config.source_mime_type {
        return Err(ItemError::Rejected {
            reason: format!(
                "unsupported type {} (expected {})",
                item.mime_type, config.source_mime_type
            ),
        });
    }
    if item.size_bytes > config.max_file_size_bytes {
        return Err(ItemError::Rejected {
            reason: format!(
                "file is {} bytes, over the {} byte limit",
                item.size_bytes, config.max_file_size_bytes
            ),
        });
    }
    Ok(())
}

async fn run_stages<T, G>(
    item: &FileDescriptor,
    folder: &TargetFolder,
    quality: f32,
    config: &SchedulerConfig,
    transcoder: &T,
    gateway: &G,
    emitter: &StatusEmitter,
) -> Result<RemoteFileId, ItemError>
where
    T: Transcoder + ?Sized,
    G: FileGateway + ?Sized,
{
    validate_descriptor(item, config)?;

    emitter.emit(ItemState::Downloading);
    let source_bytes = gateway
        .download(&item.id)
        .await
        .map_err(ItemError::Download)?;
    if source_bytes.is_empty() {
        return Err(ItemError::Download(GatewayError::EmptyPayload {
            context: format!("download of {}", item.name),
        }));
    }

    emitter.emit(ItemState::Converting);
    let converted = transcoder
        .transcode(source_bytes, quality)
        .await
        .map_err(ItemError::Convert)?;

    emitter.emit(ItemState::Uploading);
    let upload_name = output_file_name(&item.name);
    gateway
        .upload(converted, &upload_name, &folder.id)
        .await
        .map_err(ItemError::Upload)
}

/// Drives one item through download, transcode, and upload in strict order.
///
/// No retries: a failure at any stage is terminal for the item. The
/// terminal transition is emitted before returning so status consumers see
/// it in stream order.
pub async fn run_item<T, G>(
    item: &FileDescriptor,
    folder: &TargetFolder,
    quality: f32,
    config: &SchedulerConfig,
    transcoder: &T,
    gateway: &G,
    emitter: &StatusEmitter,
) -> ItemOutcome
where
    T: Transcoder + ?Sized,
    G: FileGateway + ?Sized,
{
    match run_stages(item, folder, quality, config, transcoder, gateway, emitter).await {
        Ok(remote_id) => {
            emitter.emit(ItemState::Succeeded);
            ItemOutcome::Succeeded { remote_id }
        }
        Err(err) => {
            let reason = err.to_string();
            warn!(file = %item.name, "Item failed: {reason}");
            emitter.emit(ItemState::Failed {
                reason: reason.clone(),
            });
            ItemOutcome::Failed { reason }
        }
    }
}
