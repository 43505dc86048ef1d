//! Configuration for the gateway module.

use serde::{Deserialize, Serialize};

/// Configuration for the Drive gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL for file metadata and content requests.
    #[serde(default = "default_files_base_url")]
    pub files_base_url: String,

    /// URL of the multipart upload endpoint.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// OAuth bearer token used on every request.
    #[serde(default)]
    pub access_token: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_files_base_url() -> String {
    "https://www.googleapis.com/drive/v3/files".to_string()
}

fn default_upload_url() -> String {
    "https://www.googleapis.com/upload/drive/v3/files".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            files_base_url: default_files_base_url(),
            upload_url: default_upload_url(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
