use chartmark::ChartmarkError;
use chartmark::entity::{Entity, ValidationReport};
use chartmark::filter::{FilterKind, FilterOption};
use chartmark::render::SegmentRenderer;
use chartmark::segment::Segment;
use colored::*;
use serde::Serialize;
use serde_json::json;

use crate::utils::{truncate, visible_text};

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Parse a `#rrggbb` color.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::TrueColor {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Renders segments with ANSI colors: the first trait colors the text, an
/// attribute colors the background, and segments with both are underlined.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl SegmentRenderer for TerminalRenderer {
    fn render_segment(&self, segment: &Segment) -> String {
        let Some(highlight) = &segment.highlight else {
            return segment.text.clone();
        };

        let mut styled = segment.text.normal();
        if let Some(color) = highlight.traits.first().and_then(|t| hex_color(&t.color)) {
            styled = styled.color(color).bold();
        }
        if let Some(color) = highlight.background.as_deref().and_then(hex_color) {
            styled = styled.on_color(color);
        }
        if highlight.has_both {
            styled = styled.underline();
        }
        styled.to_string()
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Stable machine-readable code of an error.
pub fn error_code(error: &ChartmarkError) -> &'static str {
    match error {
        ChartmarkError::Parse(_) => "PARSE_ERROR",
        ChartmarkError::Io(_) => "IO_ERROR",
        ChartmarkError::Configuration(_) => "CONFIGURATION_ERROR",
        ChartmarkError::Logging(_) => "LOGGING_ERROR",
        ChartmarkError::InvalidFilter(_) => "INVALID_FILTER",
        ChartmarkError::EntityNotFound { .. } => "ENTITY_NOT_FOUND",
        ChartmarkError::Other(_) => "OTHER_ERROR",
    }
}

/// Output a ChartmarkError in structured JSON format
pub fn output_error_json(error: &ChartmarkError, output_format: &str) {
    if output_format == "json" {
        let mut error_response = json!({
            "error": true,
            "code": error_code(error),
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        match error {
            ChartmarkError::EntityNotFound { id } => {
                error_response["details"] = json!({
                    "id": id,
                    "hint": "Run `chartmark-cli filters` or inspect the document for valid entity IDs"
                });
            }
            ChartmarkError::InvalidFilter(value) => {
                error_response["details"] = json!({
                    "filter": value,
                    "hint": "Run `chartmark-cli filters --entities <file>` to list available filters"
                });
            }
            _ => {}
        }

        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

/// Color a trait name with its palette color.
pub fn format_trait(name: &str) -> ColoredString {
    match chartmark::style::trait_color(name) {
        Some(rgb) => name.color(Color::TrueColor {
            r: rgb.0,
            g: rgb.1,
            b: rgb.2,
        }),
        None => name.color(CliColors::muted()).italic(),
    }
}

pub fn print_segment_list(segments: &[Segment]) {
    let highlighted = segments.iter().filter(|s| s.is_highlighted()).count();
    println!(
        "{}",
        format_info(&format!(
            "{} segments ({} highlighted):",
            segments.len(),
            highlighted
        ))
    );
    println!();

    println!(
        "{:<12} {:<32} {}",
        "Range".color(CliColors::muted()).bold(),
        "Text".color(CliColors::muted()).bold(),
        "Styling".color(CliColors::muted()).bold()
    );
    println!("{}", "─".repeat(80).color(CliColors::muted()));

    for segment in segments {
        let range = format!("{}..{}", segment.start, segment.end);
        let text = truncate(&visible_text(&segment.text), 30);
        let styling = match &segment.highlight {
            Some(highlight) => {
                let mut parts: Vec<String> = highlight
                    .trait_names()
                    .into_iter()
                    .map(|name| format_trait(name).to_string())
                    .collect();
                if let Some(label) = &highlight.attribute_label {
                    parts.push(format!("attr:{}", label).color(CliColors::info()).to_string());
                }
                parts.join(", ")
            }
            None => "-".color(CliColors::muted()).to_string(),
        };
        println!("{:<12} {:<32} {}", range, text, styling);
    }
}

pub fn print_filter_options(options: &[FilterOption]) {
    println!("{}", format_info(&format!("{} filters available:", options.len())));
    println!();

    println!(
        "{:<24} {:<24} {:<10} {}",
        "Value".color(CliColors::muted()).bold(),
        "Label".color(CliColors::muted()).bold(),
        "Kind".color(CliColors::muted()).bold(),
        "Count".color(CliColors::muted()).bold()
    );
    println!("{}", "─".repeat(66).color(CliColors::muted()));

    for option in options {
        let kind = match option.kind {
            FilterKind::All => "all",
            FilterKind::Trait => "trait",
            FilterKind::Attribute => "attribute",
        };
        let value = match option.kind {
            FilterKind::Trait => format_trait(&option.value),
            _ => option.value.color(CliColors::accent()),
        };
        println!(
            "{:<24} {:<24} {:<10} {}",
            value, option.label, kind, option.count
        );
    }
}

pub fn print_entity(entity: &Entity, concept_limit: usize) {
    println!(
        "{}",
        "━━━ Entity Details ━━━".color(CliColors::accent()).bold()
    );
    println!("{}", entity.format().color(CliColors::muted()));
    println!(
        "{}: {}",
        "ID".color(CliColors::muted()),
        entity.id.color(CliColors::accent()).bold()
    );
    println!("{}: {}", "Text".color(CliColors::muted()), entity.text);
    println!(
        "{}: {}",
        "Category".color(CliColors::muted()),
        entity.category
    );
    if let Some(entity_type) = &entity.entity_type {
        println!("{}: {}", "Type".color(CliColors::muted()), entity_type);
    }
    println!(
        "{}: {}..{}",
        "Range".color(CliColors::muted()),
        entity.begin_offset,
        entity.end_offset
    );
    if let Some(score) = entity.score {
        println!("{}: {:.2}", "Score".color(CliColors::muted()), score);
    }

    if !entity.traits.is_empty() {
        println!("{}:", "Traits".color(CliColors::muted()));
        for t in &entity.traits {
            let score = t.score.map(|s| format!(" ({:.2})", s)).unwrap_or_default();
            println!("  • {}{}", format_trait(&t.name), score.color(CliColors::muted()));
        }
    }

    if !entity.attributes.is_empty() {
        println!("{}:", "Attributes".color(CliColors::muted()));
        for attribute in &entity.attributes {
            println!(
                "  • {} {} {}",
                chartmark::style::attribute_label(&attribute.attribute_type).color(CliColors::info()),
                format!("{}..{}", attribute.begin_offset, attribute.end_offset).color(CliColors::muted()),
                attribute.text
            );
        }
    }

    let concepts = entity.top_concepts(concept_limit);
    if !concepts.is_empty() {
        println!("{}:", "Concepts".color(CliColors::muted()));
        for concept in concepts {
            println!(
                "  • {} {} {}",
                concept.code.color(CliColors::accent()).bold(),
                concept.description,
                format!("({:.2})", concept.score).color(CliColors::muted())
            );
        }
    }
}

pub fn print_validation_report(report: &ValidationReport) {
    println!(
        "{}",
        format_info(&format!(
            "Checked {} entities and {} attributes against {} characters",
            report.entities_checked, report.attributes_checked, report.text_len
        ))
    );

    if report.is_clean() {
        println!("{}", format_success("All ranges are valid."));
        return;
    }

    println!(
        "{}",
        format_warning(&format!(
            "{} ranges will be skipped:",
            report.skipped.len()
        ))
    );
    for skipped in &report.skipped {
        let owner = match &skipped.attribute_type {
            Some(attribute_type) => format!("{} / {}", skipped.entity_id, attribute_type),
            None => skipped.entity_id.clone(),
        };
        println!(
            "  • {} {} {}",
            owner.color(CliColors::accent()),
            format!("{}..{}", skipped.begin_offset, skipped.end_offset).color(CliColors::muted()),
            skipped.error
        );
    }
}
