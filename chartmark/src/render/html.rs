//! Inline HTML spans.

use super::SegmentRenderer;
use crate::config::RenderConfig;
use crate::segment::{Highlight, Segment};

/// Renders highlighted segments as `<span>` elements with inline styles.
///
/// The first trait sets the text color. The attribute background wins over
/// the trait background, and segments carrying both get an underline in the
/// trait color so neither is lost.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    show_tooltips: bool,
}

impl HtmlRenderer {
    pub fn new(show_tooltips: bool) -> Self {
        Self { show_tooltips }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.show_tooltips)
    }

    fn style(highlight: &Highlight) -> String {
        let mut declarations = Vec::new();
        let first_trait = highlight.traits.first();

        if let Some(style) = first_trait {
            declarations.push(format!("color: {}", style.color));
            declarations.push("font-weight: 600".to_string());
        }
        match (&highlight.background, first_trait) {
            (Some(background), _) => declarations.push(format!("background-color: {}", background)),
            (None, Some(style)) => declarations.push(format!("background-color: {}", style.background_color)),
            (None, None) => {}
        }
        if highlight.has_both
            && let Some(style) = first_trait
        {
            declarations.push(format!("border-bottom: 2px solid {}", style.color));
        }

        declarations.join("; ")
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SegmentRenderer for HtmlRenderer {
    fn render_segment(&self, segment: &Segment) -> String {
        let text = escape(&segment.text);
        let Some(highlight) = &segment.highlight else {
            return text;
        };

        let mut span = format!(
            r#"<span class="chartmark-entity" data-entity-id="{}" style="{}""#,
            escape(&highlight.entity.id),
            Self::style(highlight)
        );
        if self.show_tooltips && !highlight.tooltip.is_empty() {
            span.push_str(&format!(r#" title="{}""#, escape(&highlight.tooltip)));
        }
        span.push('>');
        span.push_str(&text);
        span.push_str("</span>");
        span
    }

    fn name(&self) -> &str {
        "html"
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
