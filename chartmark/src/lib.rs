//! # Chartmark
//!
//! Turns clinical NLP entity annotations over a chart's text into a minimal,
//! ordered list of non-overlapping display segments, each carrying the merged
//! trait and attribute styling that applies to it.
//!
//! ## Quick Start
//!
//! ```rust
//! use chartmark::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = "Patient has severe pain.";
//!     let document = EntityDocument::from_json(
//!         r#"{"Entities": [{
//!             "Id": 1, "Text": "pain", "Category": "MEDICAL_CONDITION",
//!             "BeginOffset": 19, "EndOffset": 23,
//!             "Traits": [{"Name": "SYMPTOM", "Score": 0.9}]
//!         }]}"#,
//!     )?;
//!
//!     let segments = chartmark::highlight(text, &document.entities, "all")?;
//!     assert_eq!(segments.len(), 3);
//!     assert_eq!(segments[1].text, "pain");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **entity**: typed entity model and tolerant JSON document parsing
//! - **style**: fixed trait and attribute palettes
//! - **position**: per-character accumulation of style entries
//! - **segment**: boundary detection, emission and adjacency merge
//! - **filter**: category filtering with its own merge pass
//! - **highlighter**: configured facade and a memoized document view
//! - **render**: swappable consumers of the plain segment data

pub mod config;
pub mod entity;
pub mod filter;
pub mod highlighter;
pub mod logging;
pub mod position;
pub mod render;
pub mod segment;
pub mod style;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::highlight;
    pub use crate::init;

    // Re-export config types
    pub use crate::config::{
        ChartmarkConfig, ConfigBuilder, ConfigLoader, LogFormat, LogLevel, RenderFormat,
        SegmentationStrategy,
    };

    // Re-export entity types
    pub use crate::entity::{
        ConceptSuggestion, EntityAttribute, EntityCategory, EntityDocument, EntityTrait,
        ValidationReport,
    };
    pub use crate::entity::Entity;

    pub use crate::filter::{CategoryFilter, FilterOption, apply_filter, available_filters};
    pub use crate::highlighter::{DocumentView, Highlighter};
    pub use crate::render::{HtmlRenderer, MarkupRenderer, SegmentRenderer};
    pub use crate::segment::{Highlight, Segment};
    pub use crate::style::{AttributeStyle, TraitStyle};

    // Re-export essential result type
    pub use crate::{ChartmarkError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Chartmark operations
#[derive(Debug, thiserror::Error)]
pub enum ChartmarkError {
    /// The entity document could not be parsed
    #[error("Parse error: {0}. Expected a JSON object with an \"Entities\" array")]
    Parse(String),

    /// Reading an input failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Filter value was empty or blank
    #[error("Invalid filter '{0}'. Use \"all\" or a trait name / attribute type such as SYMPTOM or DIRECTION")]
    InvalidFilter(String),

    /// No entity with the requested id
    #[error("Entity '{id}' not found in the document")]
    EntityNotFound { id: String },

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for ChartmarkError {
    fn from(err: crate::config::ConfigError) -> Self {
        ChartmarkError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for ChartmarkError {
    fn from(err: serde_json::Error) -> Self {
        ChartmarkError::Parse(err.to_string())
    }
}

/// Result type for Chartmark operations
pub type Result<T> = std::result::Result<T, ChartmarkError>;

/// Initialize logging from the given configuration and return a configured
/// [`highlighter::Highlighter`].
///
/// Logging initialization errors are ignored when a global subscriber has
/// already been installed by the host.
///
/// # Examples
///
/// ```rust
/// use chartmark::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = ConfigBuilder::testing().build()?;
///     let highlighter = chartmark::init(config)?;
///     let segments = highlighter.highlight("no findings", &[], "all")?;
///     assert_eq!(segments.len(), 1);
///     Ok(())
/// }
/// ```
pub fn init(config: config::ChartmarkConfig) -> Result<highlighter::Highlighter> {
    let _ = logging::init(&config.logging);
    Ok(highlighter::Highlighter::new(config.segmentation))
}

/// Segment `text` with the default sweep strategy and apply `filter`.
///
/// This is the one-shot entry point; hosts that recompute on every input
/// change should use [`highlighter::DocumentView`] instead.
pub fn highlight(text: &str, entities: &[entity::Entity], filter: &str) -> Result<Vec<segment::Segment>> {
    highlighter::Highlighter::default().highlight(text, entities, filter)
}
