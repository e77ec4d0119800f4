//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &ChartmarkConfig) -> Result<(), ConfigError> {
    validate_segmentation_config(&config.segmentation)?;
    validate_logging_config(&config.logging)?;

    Ok(())
}

fn validate_segmentation_config(config: &SegmentationConfig) -> Result<(), ConfigError> {
    if config.default_filter.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Default filter cannot be empty; use \"all\" to disable filtering".to_string(),
        ));
    }

    if config.tooltip_separator.is_empty() {
        return Err(ConfigError::ValidationError(
            "Tooltip separator cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if let Some(file) = &config.file
        && file.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "Log file path cannot be empty".to_string(),
        ));
    }

    if config.file.is_none() && !config.stdout {
        return Err(ConfigError::ValidationError(
            "Logging needs a destination: enable stdout or set a log file".to_string(),
        ));
    }

    Ok(())
}
