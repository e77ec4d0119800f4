use chartmark::ChartmarkError;
use chartmark::config::{RenderFormat, SegmentationStrategy};

pub fn parse_render_format(format_str: &str) -> chartmark::Result<RenderFormat> {
    format_str.parse().map_err(|_| {
        ChartmarkError::Other(format!(
            "Invalid render format: {} (expected json, markup, html or terminal)",
            format_str
        ))
    })
}

pub fn parse_strategy(strategy_str: &str) -> chartmark::Result<SegmentationStrategy> {
    strategy_str.parse().map_err(|_| {
        ChartmarkError::Other(format!(
            "Invalid segmentation strategy: {} (expected sweep or per_character)",
            strategy_str
        ))
    })
}

/// Shorten `text` to at most `max_chars` characters, marking the cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Show whitespace-only or multi-line segment text on one line.
pub fn visible_text(text: &str) -> String {
    text.replace('\n', "\\n").replace('\t', "\\t")
}
