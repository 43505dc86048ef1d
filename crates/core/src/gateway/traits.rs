//! Trait definitions for the gateway module.

use async_trait::async_trait;
use bytes::Bytes;

use super::error::GatewayError;
use super::types::{RemoteFileId, TargetFolder};

/// Access to the remote storage backend.
///
/// Download and upload are opaque asynchronous operations from the
/// pipeline's point of view; only the error contract matters here.
#[async_trait]
pub trait FileGateway: Send + Sync {
    /// Returns the name of this gateway implementation.
    fn name(&self) -> &str;

    /// Downloads the raw content of a file by identifier.
    async fn download(&self, id: &RemoteFileId) -> Result<Bytes, GatewayError>;

    /// Uploads a buffer as a new file inside `folder_id`.
    ///
    /// `bytes` must be non-empty; an empty buffer is rejected before any
    /// request is made.
    async fn upload(
        &self,
        bytes: Bytes,
        file_name: &str,
        folder_id: &RemoteFileId,
    ) -> Result<RemoteFileId, GatewayError>;

    /// Creates a new folder with the given name.
    ///
    /// Not idempotent: repeated calls with the same name create distinct
    /// folders.
    async fn create_folder(&self, name: &str) -> Result<TargetFolder, GatewayError>;
}
