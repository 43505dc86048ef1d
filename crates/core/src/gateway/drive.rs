//! Google Drive gateway implementation.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::config::GatewayConfig;
use super::error::GatewayError;
use super::traits::FileGateway;
use super::types::{RemoteFileId, TargetFolder};

const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Gateway backed by the Drive v3 REST API.
pub struct DriveGateway {
    client: Client,
    config: GatewayConfig,
}

/// Structured error body returned by the backend on failure.
#[derive(Debug, Deserialize)]
struct DriveErrorBody {
    error: DriveErrorDetail,
}

#[derive(Debug, Deserialize)]
struct DriveErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<DriveErrorItem>,
}

#[derive(Debug, Deserialize)]
struct DriveErrorItem {
    #[serde(default)]
    reason: String,
}

/// Response body of a successful file creation.
#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

impl DriveGateway {
    /// Creates a new gateway from configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::transient(format!("HTTP client setup failed: {e}")))?;

        Ok(Self { client, config })
    }

    fn files_base(&self) -> &str {
        self.config.files_base_url.trim_end_matches('/')
    }

    fn map_transport_error(err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::transient("request timed out")
        } else if err.is_connect() {
            GatewayError::transient(format!("connection failed: {err}"))
        } else {
            GatewayError::transient(err.to_string())
        }
    }
}

/// Maps a non-2xx response to the gateway error taxonomy.
///
/// A 403 carrying a quota reason in the structured error body maps to
/// `QuotaExceeded` rather than `Forbidden`.
fn map_error_response(status: StatusCode, body: &str, id: &str) -> GatewayError {
    let detail: Option<DriveErrorBody> = serde_json::from_str(body).ok();
    let message = detail
        .as_ref()
        .map(|b| b.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"));

    match status {
        StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
        StatusCode::FORBIDDEN => {
            let quota = detail
                .as_ref()
                .map(|b| {
                    b.error
                        .errors
                        .iter()
                        .any(|e| e.reason.to_ascii_lowercase().contains("quota"))
                })
                .unwrap_or(false);
            if quota {
                GatewayError::QuotaExceeded
            } else {
                GatewayError::Forbidden { id: id.to_string() }
            }
        }
        StatusCode::NOT_FOUND => GatewayError::NotFound { id: id.to_string() },
        _ => GatewayError::transient(message),
    }
}

#[async_trait]
impl FileGateway for DriveGateway {
    fn name(&self) -> &str {
        "drive"
    }

    async fn download(&self, id: &RemoteFileId) -> Result<Bytes, GatewayError> {
        let url = format!("{}/{}?alt=media", self.files_base(), id);
        debug!(file_id = %id, "Downloading file content");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_error_response(status, &body, id.as_str());
            warn!(file_id = %id, %status, "Download failed: {err}");
            return Err(err);
        }

        response
            .bytes()
            .await
            .map_err(|e| GatewayError::transient(format!("failed to read body: {e}")))
    }

    async fn upload(
        &self,
        bytes: Bytes,
        file_name: &str,
        folder_id: &RemoteFileId,
    ) -> Result<RemoteFileId, GatewayError> {
        if bytes.is_empty() {
            return Err(GatewayError::EmptyPayload {
                context: format!("upload of {file_name}"),
            });
        }

        let metadata = json!({
            "name": file_name,
            "parents": [folder_id.as_str()],
        });

        let metadata_part = multipart::Part::text(metadata.to_string())
            .mime_str("application/json")
            .map_err(|e| GatewayError::transient(e.to_string()))?;
        let file_part = multipart::Part::stream(bytes)
            .file_name(file_name.to_string())
            .mime_str("image/webp")
            .map_err(|e| GatewayError::transient(e.to_string()))?;

        let form = multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        let url = format!("{}?uploadType=multipart", self.config.upload_url);
        debug!(%file_name, folder_id = %folder_id, "Uploading converted file");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_error_response(status, &body, file_name);
            warn!(%file_name, %status, "Upload failed: {err}");
            return Err(err);
        }

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| GatewayError::transient(format!("invalid upload response: {e}")))?;

        Ok(RemoteFileId(created.id))
    }

    async fn create_folder(&self, name: &str) -> Result<TargetFolder, GatewayError> {
        let body = json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
        });

        debug!(folder_name = %name, "Creating destination folder");

        let response = self
            .client
            .post(self.files_base())
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_error_response(status, &text, name));
        }

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| GatewayError::transient(format!("invalid folder response: {e}")))?;

        Ok(TargetFolder {
            id: RemoteFileId(created.id),
            name: name.to_string(),
        })
    }
}
