//! Gateway module for the remote storage backend.
//!
//! This module provides the `FileGateway` trait and the Drive-backed
//! implementation used by the pipeline. Download and upload are treated as
//! opaque asynchronous operations; the error taxonomy is the contract the
//! per-item pipeline relies on to produce user-facing failure reasons.

mod config;
mod drive;
mod error;
mod traits;
mod types;

pub use config::GatewayConfig;
pub use drive::DriveGateway;
pub use error::GatewayError;
pub use traits::FileGateway;
pub use types::{FileDescriptor, RemoteFileId, TargetFolder};
