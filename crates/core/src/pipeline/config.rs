//! Configuration for the pipeline module.

use serde::{Deserialize, Serialize};

/// Configuration for the batch scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Concurrency ceiling: items allowed in an active state at once.
    #[serde(default = "default_max_concurrent_items")]
    pub max_concurrent_items: usize,

    /// Advisory batch size limit enforced at selection time. The scheduler
    /// accepts larger batches but logs a warning.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Per-file size cap; oversized descriptors fail per-item.
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    /// MIME type accepted as conversion input.
    #[serde(default = "default_source_mime_type")]
    pub source_mime_type: String,

    /// Folder created when no destination folder was chosen.
    #[serde(default = "default_folder_name")]
    pub default_folder_name: String,
}

fn default_max_concurrent_items() -> usize {
    5
}

fn default_max_batch_size() -> usize {
    30
}

fn default_max_file_size_bytes() -> u64 {
    100 * 1024 * 1024
}

fn default_source_mime_type() -> String {
    "image/jpeg".to_string()
}

fn default_folder_name() -> String {
    "WebP-Converted".to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_items: default_max_concurrent_items(),
            max_batch_size: default_max_batch_size(),
            max_file_size_bytes: default_max_file_size_bytes(),
            source_mime_type: default_source_mime_type(),
            default_folder_name: default_folder_name(),
        }
    }
}

impl SchedulerConfig {
    /// Sets the concurrency ceiling.
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent_items = max;
        self
    }

    /// Sets the per-file size cap.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size_bytes = bytes;
        self
    }

    /// Sets the default destination folder name.
    pub fn with_default_folder_name(mut self, name: impl Into<String>) -> Self {
        self.default_folder_name = name.into();
        self
    }
}
