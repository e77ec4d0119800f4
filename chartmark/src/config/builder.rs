//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;

/// Builder for creating ChartmarkConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: ChartmarkConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: ChartmarkConfig::default(),
        }
    }

    /// Start from an existing configuration (for example one produced by
    /// [`super::ConfigLoader`]) and adjust it further.
    pub fn from_config(config: ChartmarkConfig) -> Self {
        Self { config }
    }

    /// Set the segmentation strategy.
    pub fn with_strategy(mut self, strategy: SegmentationStrategy) -> Self {
        self.config.segmentation.strategy = strategy;
        self
    }

    /// Set the filter applied when callers pass none.
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.segmentation.default_filter = filter.into();
        self
    }

    /// Set the separator between tooltips of overlapping entities.
    pub fn with_tooltip_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.segmentation.tooltip_separator = separator.into();
        self
    }

    /// Set the output format.
    pub fn with_render_format(mut self, format: RenderFormat) -> Self {
        self.config.render.format = format;
        self
    }

    /// Enable or disable tooltip text in rendered output.
    pub fn with_tooltips(mut self, show: bool) -> Self {
        self.config.render.show_tooltips = show;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self.config.logging.stdout = false;
        self
    }

    /// Use default logging configuration (console output at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging.level = LogLevel::Info;
        self.config.logging.format = LogFormat::Json;
        self.config.logging.file = None;
        self.config.logging.stdout = true;
        self
    }

    /// Create a configuration for development.
    ///
    /// Uses the dense per-character strategy, which is easier to step
    /// through, and debug-level pretty logging.
    pub fn development() -> Self {
        Self::new()
            .with_strategy(SegmentationStrategy::PerCharacter)
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
            .with_render_format(RenderFormat::Markup)
    }

    /// Create a configuration for automated testing.
    pub fn testing() -> Self {
        Self::development().with_log_level(LogLevel::Warn)
    }

    /// Create a production configuration: sweep strategy, JSON logs at Info.
    pub fn production() -> Self {
        Self::new()
            .with_strategy(SegmentationStrategy::Sweep)
            .with_default_logging()
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<ChartmarkConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
