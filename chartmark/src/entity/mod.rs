//! Clinical entity model.
//!
//! Entities arrive as JSON from an upstream NLP extraction service. Parsing is
//! tolerant: optional collections default to empty and offsets are kept as
//! signed integers so that one malformed span never rejects a document.

mod document;
mod types;

pub use document::*;
pub use types::*;
