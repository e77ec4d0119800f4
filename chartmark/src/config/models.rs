//! Configuration model definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for Chartmark.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ChartmarkConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Segmentation configuration
    pub segmentation: SegmentationConfig,

    /// Output rendering configuration
    pub render: RenderConfig,
}

/// How the segment list is constructed.
///
/// Both strategies produce identical segments; they differ only in cost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationStrategy {
    /// Dense per-character accumulation, O(text length x overlap depth)
    PerCharacter,
    /// Boundary sweep over sorted range endpoints
    #[default]
    Sweep,
}

impl fmt::Display for SegmentationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentationStrategy::PerCharacter => write!(f, "per_character"),
            SegmentationStrategy::Sweep => write!(f, "sweep"),
        }
    }
}

impl FromStr for SegmentationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "per_character" | "per_char" | "dense" => Ok(SegmentationStrategy::PerCharacter),
            "sweep" => Ok(SegmentationStrategy::Sweep),
            _ => Err(format!("Invalid segmentation strategy: {}", s)),
        }
    }
}

/// Configuration for the segmentation core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Construction strategy
    pub strategy: SegmentationStrategy,

    /// Filter applied when the caller does not provide one
    pub default_filter: String,

    /// Separator between tooltips of entities sharing a segment
    pub tooltip_separator: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            strategy: SegmentationStrategy::Sweep,
            default_filter: "all".to_string(),
            tooltip_separator: "; ".to_string(),
        }
    }
}

/// Output format for rendered segments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Serialized segment list
    #[default]
    Json,
    /// Inline bracket markup
    Markup,
    /// HTML spans
    Html,
    /// ANSI colored terminal output
    Terminal,
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderFormat::Json => write!(f, "json"),
            RenderFormat::Markup => write!(f, "markup"),
            RenderFormat::Html => write!(f, "html"),
            RenderFormat::Terminal => write!(f, "terminal"),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(RenderFormat::Json),
            "markup" => Ok(RenderFormat::Markup),
            "html" => Ok(RenderFormat::Html),
            "terminal" | "ansi" => Ok(RenderFormat::Terminal),
            _ => Err(format!("Invalid render format: {}", s)),
        }
    }
}

/// Configuration for renderers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Output format used by the CLI
    pub format: RenderFormat,

    /// Whether renderers emit tooltip text
    pub show_tooltips: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: RenderFormat::Json,
            show_tooltips: true,
        }
    }
}

/// Configuration for logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// Log file path (if logging to a file)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Single-line format
    Compact,
    /// JSON format for machine consumption
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}
