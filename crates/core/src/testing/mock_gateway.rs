//! Mock gateway for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::gateway::{FileGateway, GatewayError, RemoteFileId, TargetFolder};

/// A recorded upload for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    /// Name the file was uploaded under.
    pub file_name: String,
    /// Destination folder identifier.
    pub folder_id: RemoteFileId,
    /// Uploaded payload size in bytes.
    pub size_bytes: usize,
}

/// Mock implementation of the `FileGateway` trait.
///
/// Provides controllable behavior for testing:
/// - Record downloads, uploads, and folder creations for assertions
/// - Script per-file errors for any operation
/// - Configure canned download payloads and artificial latency
#[derive(Debug, Clone)]
pub struct MockGateway {
    downloads: Arc<RwLock<Vec<RemoteFileId>>>,
    uploads: Arc<RwLock<Vec<RecordedUpload>>>,
    folders: Arc<RwLock<Vec<String>>>,
    download_errors: Arc<RwLock<HashMap<String, GatewayError>>>,
    upload_errors: Arc<RwLock<HashMap<String, GatewayError>>>,
    folder_error: Arc<RwLock<Option<GatewayError>>>,
    download_payloads: Arc<RwLock<HashMap<String, Bytes>>>,
    default_payload: Arc<RwLock<Bytes>>,
    latency_ms: Arc<RwLock<u64>>,
    id_counter: Arc<AtomicU64>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Create a new mock gateway.
    pub fn new() -> Self {
        Self {
            downloads: Arc::new(RwLock::new(Vec::new())),
            uploads: Arc::new(RwLock::new(Vec::new())),
            folders: Arc::new(RwLock::new(Vec::new())),
            download_errors: Arc::new(RwLock::new(HashMap::new())),
            upload_errors: Arc::new(RwLock::new(HashMap::new())),
            folder_error: Arc::new(RwLock::new(None)),
            download_payloads: Arc::new(RwLock::new(HashMap::new())),
            default_payload: Arc::new(RwLock::new(Bytes::from_static(b"jpeg-source-bytes"))),
            latency_ms: Arc::new(RwLock::new(0)),
            id_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Set artificial latency applied to every operation.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency_ms.write().await = latency.as_millis() as u64;
    }

    /// Script `download` of `id` to always fail with `error`.
    pub async fn fail_download(&self, id: impl Into<String>, error: GatewayError) {
        self.download_errors.write().await.insert(id.into(), error);
    }

    /// Script `upload` of `file_name` to always fail with `error`.
    pub async fn fail_upload(&self, file_name: impl Into<String>, error: GatewayError) {
        self.upload_errors
            .write()
            .await
            .insert(file_name.into(), error);
    }

    /// Script `create_folder` to always fail with `error`.
    pub async fn fail_create_folder(&self, error: GatewayError) {
        *self.folder_error.write().await = Some(error);
    }

    /// Set the payload returned when downloading `id`.
    pub async fn set_download_payload(&self, id: impl Into<String>, payload: Bytes) {
        self.download_payloads
            .write()
            .await
            .insert(id.into(), payload);
    }

    /// Set the payload returned for files without a scripted payload.
    pub async fn set_default_payload(&self, payload: Bytes) {
        *self.default_payload.write().await = payload;
    }

    /// Get all recorded downloads, in request order.
    pub async fn recorded_downloads(&self) -> Vec<RemoteFileId> {
        self.downloads.read().await.clone()
    }

    /// Get all recorded uploads, in request order.
    pub async fn recorded_uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.read().await.clone()
    }

    /// Get the names of all folders created, in request order.
    pub async fn created_folders(&self) -> Vec<String> {
        self.folders.read().await.clone()
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency_ms.read().await;
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
    }

    fn next_id(&self, prefix: &str) -> RemoteFileId {
        let n = self.id_counter.fetch_add(1, Ordering::SeqCst);
        RemoteFileId(format!("{prefix}-{n}"))
    }
}

#[async_trait]
impl FileGateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn download(&self, id: &RemoteFileId) -> Result<Bytes, GatewayError> {
        self.simulate_latency().await;
        self.downloads.write().await.push(id.clone());

        if let Some(err) = self.download_errors.read().await.get(id.as_str()) {
            return Err(err.clone());
        }

        if let Some(payload) = self.download_payloads.read().await.get(id.as_str()) {
            return Ok(payload.clone());
        }
        Ok(self.default_payload.read().await.clone())
    }

    async fn upload(
        &self,
        bytes: Bytes,
        file_name: &str,
        folder_id: &RemoteFileId,
    ) -> Result<RemoteFileId, GatewayError> {
        self.simulate_latency().await;

        if bytes.is_empty() {
            return Err(GatewayError::EmptyPayload {
                context: format!("upload of {file_name}"),
            });
        }

        if let Some(err) = self.upload_errors.read().await.get(file_name) {
            return Err(err.clone());
        }

        self.uploads.write().await.push(RecordedUpload {
            file_name: file_name.to_string(),
            folder_id: folder_id.clone(),
            size_bytes: bytes.len(),
        });
        Ok(self.next_id("uploaded"))
    }

    async fn create_folder(&self, name: &str) -> Result<TargetFolder, GatewayError> {
        self.simulate_latency().await;

        if let Some(err) = self.folder_error.read().await.as_ref() {
            return Err(err.clone());
        }

        self.folders.write().await.push(name.to_string());
        Ok(TargetFolder {
            id: self.next_id("folder"),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_download_records_and_returns_default_payload() {
        let gateway = MockGateway::new();
        let bytes = gateway.download(&RemoteFileId::from("f-1")).await.unwrap();
        assert!(!bytes.is_empty());

        let downloads = gateway.recorded_downloads().await;
        assert_eq!(downloads, vec![RemoteFileId::from("f-1")]);
    }

    #[tokio::test]
    async fn test_scripted_download_error_persists() {
        let gateway = MockGateway::new();
        gateway
            .fail_download("f-2", GatewayError::Unauthorized)
            .await;

        for _ in 0..2 {
            let result = gateway.download(&RemoteFileId::from("f-2")).await;
            assert!(matches!(result, Err(GatewayError::Unauthorized)));
        }
    }

    #[tokio::test]
    async fn test_upload_records_name_folder_and_size() {
        let gateway = MockGateway::new();
        gateway
            .upload(
                Bytes::from_static(b"webp"),
                "out.webp",
                &RemoteFileId::from("folder-7"),
            )
            .await
            .unwrap();

        let uploads = gateway.recorded_uploads().await;
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file_name, "out.webp");
        assert_eq!(uploads[0].folder_id, RemoteFileId::from("folder-7"));
        assert_eq!(uploads[0].size_bytes, 4);
    }

    #[tokio::test]
    async fn test_create_folder_returns_distinct_ids() {
        let gateway = MockGateway::new();
        let a = gateway.create_folder("Converted").await.unwrap();
        let b = gateway.create_folder("Converted").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(gateway.created_folders().await.len(), 2);
    }
}
