//! Renderers consuming the plain segment list.
//!
//! Segmentation knows nothing about output formats; a renderer only reads
//! [`Segment`] values, so hosts can add their own.

mod html;
mod markup;

pub use html::HtmlRenderer;
pub use markup::MarkupRenderer;

use crate::segment::Segment;

/// Trait for turning segments into a textual representation.
pub trait SegmentRenderer: Send + Sync + std::fmt::Debug {
    /// Render `segments` in order.
    ///
    /// # Arguments
    /// * `segments` - Segments covering a document, left to right
    ///
    /// # Returns
    /// The rendered document
    fn render(&self, segments: &[Segment]) -> String {
        segments.iter().map(|s| self.render_segment(s)).collect()
    }

    /// Render a single segment.
    fn render_segment(&self, segment: &Segment) -> String;

    /// Get the name of this renderer (e.g., "html", "markup").
    fn name(&self) -> &str;
}
