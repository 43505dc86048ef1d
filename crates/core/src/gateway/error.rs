//! Error types for the gateway module.

use thiserror::Error;

/// Errors surfaced by the remote file gateway.
///
/// The pipeline distinguishes these to decide user messaging; it never
/// auto-retries on any of them.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The file does not exist or was moved.
    #[error("File not found: {id}")]
    NotFound { id: String },

    /// The caller lacks permission on the file or folder.
    #[error("Access to {id} denied")]
    Forbidden { id: String },

    /// The access credential is missing or expired.
    #[error("Authorization expired or missing")]
    Unauthorized,

    /// The destination account has no storage left.
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// Network failure, backend timeout, or 5xx response.
    #[error("Transient backend error: {reason}")]
    Transient { reason: String },

    /// A payload that must be non-empty was empty.
    #[error("Empty payload: {context}")]
    EmptyPayload { context: String },
}

impl GatewayError {
    /// Creates a transient error from any displayable cause.
    pub fn transient(reason: impl Into<String>) -> Self {
        Self::Transient {
            reason: reason.into(),
        }
    }
}
