//! Configuration for the transcoder module.

use serde::{Deserialize, Serialize};

/// Configuration for the WebP transcoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscoderConfig {
    /// Longest allowed output dimension in pixels. Larger inputs are
    /// downscaled so their longer side equals this bound.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Hard time bound on a single transcode operation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Quality used when the caller does not supply one, in (0, 1].
    #[serde(default = "default_quality")]
    pub default_quality: f32,
}

fn default_max_dimension() -> u32 {
    3840
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_quality() -> f32 {
    0.8
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            timeout_secs: default_timeout_secs(),
            default_quality: default_quality(),
        }
    }
}

impl TranscoderConfig {
    /// Sets the maximum output dimension.
    pub fn with_max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = max;
        self
    }

    /// Sets the transcode timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TranscoderConfig::default();
        assert_eq!(config.max_dimension, 3840);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.default_quality > 0.0 && config.default_quality <= 1.0);
    }

    #[test]
    fn test_config_builder() {
        let config = TranscoderConfig::default()
            .with_max_dimension(1920)
            .with_timeout_secs(5);
        assert_eq!(config.max_dimension, 1920);
        assert_eq!(config.timeout_secs, 5);
    }
}
