//! Pipeline module: per-item state machine, bounded-concurrency scheduler,
//! and progress aggregation.
//!
//! A batch of file descriptors enters through `BatchScheduler::run`; each
//! item is driven through download, transcode, and upload with at most
//! `max_concurrent_items` items in flight. Status changes and tally
//! updates stream out as `BatchEvent`s for any presentation layer; the
//! final `BatchTally` resolves once every item is terminal.
//!
//! # Example
//!
//! ```ignore
//! use shutterwell_core::pipeline::{BatchScheduler, BatchSummary, SchedulerConfig};
//! use shutterwell_core::gateway::DriveGateway;
//! use shutterwell_core::transcoder::WebpTranscoder;
//!
//! let (scheduler, mut events) = BatchScheduler::new(
//!     SchedulerConfig::default(),
//!     WebpTranscoder::with_defaults(),
//!     DriveGateway::new(gateway_config)?,
//! );
//!
//! tokio::spawn(async move {
//!     while let Some(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//! });
//!
//! let tally = scheduler.run(selected_files, None, 0.8).await?;
//! let summary = BatchSummary::from_tally(&tally);
//! ```

mod config;
mod item;
mod progress;
mod scheduler;
mod types;

pub use config::SchedulerConfig;
pub use item::{output_file_name, ItemError, StatusEmitter};
pub use progress::{percent_complete, BatchSummary};
pub use scheduler::{BatchScheduler, SchedulerError};
pub use types::{BatchEvent, BatchTally, ItemOutcome, ItemState, StatusKind};
