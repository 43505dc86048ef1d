//! Types for the gateway module.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a file on the remote storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteFileId(pub String);

impl RemoteFileId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RemoteFileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for RemoteFileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file selected for conversion, as described by the storage backend.
///
/// Created by the (external) selection UI; read-only for the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Remote identifier of the file.
    pub id: RemoteFileId,
    /// File name including extension.
    pub name: String,
    /// Size in bytes as reported by the backend.
    pub size_bytes: u64,
    /// MIME type as reported by the backend.
    pub mime_type: String,
}

/// Destination folder for uploaded conversions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetFolder {
    /// Remote identifier of the folder.
    pub id: RemoteFileId,
    /// Folder display name.
    pub name: String,
}
