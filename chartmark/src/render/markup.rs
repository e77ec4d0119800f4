//! Plain-text inline markup, e.g. `[left]{SIGN,attr:Direction}`.

use super::SegmentRenderer;
use crate::segment::Segment;

/// Renders highlighted segments as `[text]{TAGS}` where tags are the trait
/// names followed by `attr:<label>` for an attribute background.
///
/// Brackets and backslashes in the text are escaped with a backslash.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupRenderer;

impl SegmentRenderer for MarkupRenderer {
    fn render_segment(&self, segment: &Segment) -> String {
        let text = escape(&segment.text);
        let Some(highlight) = &segment.highlight else {
            return text;
        };

        let mut tags: Vec<String> = highlight.trait_names().into_iter().map(str::to_string).collect();
        if let Some(label) = &highlight.attribute_label {
            tags.push(format!("attr:{}", label));
        }
        format!("[{}]{{{}}}", text, tags.join(","))
    }

    fn name(&self) -> &str {
        "markup"
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '{' | '}' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SegmentationStrategy;
    use crate::entity::{Entity, EntityAttribute};
    use crate::segment::segment;

    #[test]
    fn test_markup() {
        let text = "Patient has severe pain.";
        let entities = vec![
            Entity::new("1", "severe pain", 12, 23).with_trait("SYMPTOM"),
            Entity::new("2", "pain", 19, 23)
                .with_trait("DIAGNOSIS")
                .with_attribute(EntityAttribute::new("QUALITY", 12, 18)),
        ];
        let segments = segment(text, &entities, SegmentationStrategy::Sweep, "; ");

        assert_eq!(
            MarkupRenderer.render(&segments),
            "Patient has [severe]{SYMPTOM,attr:Quality}[ ]{SYMPTOM}[pain]{SYMPTOM,DIAGNOSIS}."
        );
    }

    #[test]
    fn test_markup_escapes_brackets() {
        let entities = vec![Entity::new("1", "x", 0, 3).with_trait("SIGN")];
        let segments = segment("[x]", &entities, SegmentationStrategy::Sweep, "; ");
        assert_eq!(MarkupRenderer.render(&segments), r"[\[x\]]{SIGN}");
    }
}
