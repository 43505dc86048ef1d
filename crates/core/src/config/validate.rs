use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Transcoder quality is in (0, 1] and the time bound is non-zero
/// - Pipeline concurrency and batch limits are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let quality = config.transcoder.default_quality;
    if !(quality > 0.0 && quality <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "transcoder.default_quality must be in (0, 1], got {quality}"
        )));
    }

    if config.transcoder.max_dimension == 0 {
        return Err(ConfigError::ValidationError(
            "transcoder.max_dimension cannot be 0".to_string(),
        ));
    }

    if config.transcoder.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "transcoder.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.pipeline.max_concurrent_items == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.max_concurrent_items cannot be 0".to_string(),
        ));
    }

    if config.pipeline.max_file_size_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "pipeline.max_file_size_bytes cannot be 0".to_string(),
        ));
    }

    Ok(())
}
