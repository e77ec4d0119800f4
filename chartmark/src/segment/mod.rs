//! Segment emission and adjacency merge.
//!
//! A segment is a maximal run of characters sharing one design signature.
//! The emitted list covers `[0, text length)` exactly once, left to right,
//! and no two neighbours share a signature.

mod dense;
mod emitter;
mod signature;
mod sweep;

pub use signature::{design_signature, identity_key};

use crate::config::SegmentationStrategy;
use crate::entity::Entity;
use crate::position::StyleEntry;
use crate::style::TraitStyle;
use serde::Serialize;
use std::sync::Arc;

/// Merged styling of a highlighted segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Trait styles of regular entries, deduplicated by trait name
    pub traits: Vec<TraitStyle>,
    /// First attribute background found. Only one background renders even
    /// when several attributes overlap.
    pub background: Option<String>,
    /// Label of the attribute that supplied `background`
    pub attribute_label: Option<String>,
    /// First contributing entity, the tooltip and click target
    pub entity: Arc<Entity>,
    pub tooltip: String,
    /// The first contributing entry is an attribute
    pub is_attribute: bool,
    /// Both a trait and an attribute background are present
    pub has_both: bool,
}

impl Highlight {
    /// Merge the styling entries of one segment. `None` when none of the
    /// entries styles text.
    pub(crate) fn from_entries(entries: &[Arc<StyleEntry>], tooltip_separator: &str) -> Option<Self> {
        let styling: Vec<&Arc<StyleEntry>> = entries.iter().filter(|e| e.is_styling()).collect();
        let first = styling.first()?;

        let mut traits: Vec<TraitStyle> = Vec::new();
        for entry in styling.iter().filter(|e| !e.is_attribute) {
            for style in &entry.traits {
                if !traits.iter().any(|t| t.trait_name == style.trait_name) {
                    traits.push(style.clone());
                }
            }
        }

        let attribute = styling.iter().find_map(|e| e.background.as_ref());

        let mut tooltips: Vec<&str> = Vec::new();
        for entry in &styling {
            if !entry.tooltip.is_empty() && !tooltips.contains(&entry.tooltip.as_str()) {
                tooltips.push(&entry.tooltip);
            }
        }

        Some(Self {
            has_both: !traits.is_empty() && attribute.is_some(),
            traits,
            background: attribute.map(|a| a.background.clone()),
            attribute_label: attribute.map(|a| a.label.clone()),
            entity: Arc::clone(&first.entity),
            tooltip: tooltips.join(tooltip_separator),
            is_attribute: first.is_attribute,
        })
    }

    /// Fold a neighbour with the same signature into this highlight.
    fn absorb(&mut self, other: &Highlight, tooltip_separator: &str) {
        for style in &other.traits {
            if !self.traits.iter().any(|t| t.trait_name == style.trait_name) {
                self.traits.push(style.clone());
            }
        }

        if self.background.is_none() {
            self.background = other.background.clone();
            self.attribute_label = other.attribute_label.clone();
        }

        for part in other.tooltip.split(tooltip_separator).filter(|p| !p.is_empty()) {
            if !self.tooltip.split(tooltip_separator).any(|existing| existing == part) {
                if !self.tooltip.is_empty() {
                    self.tooltip.push_str(tooltip_separator);
                }
                self.tooltip.push_str(part);
            }
        }

        self.has_both = !self.traits.is_empty() && self.background.is_some();
    }

    /// Trait names in first-seen order.
    pub fn trait_names(&self) -> Vec<&str> {
        self.traits.iter().map(|t| t.trait_name.as_str()).collect()
    }
}

/// A contiguous run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Start character offset, inclusive
    pub start: usize,
    /// End character offset, exclusive
    pub end: usize,
    pub text: String,
    /// Design signature; empty for plain text
    pub signature: String,
    /// Present iff the segment is highlighted
    pub highlight: Option<Highlight>,
}

impl Segment {
    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Drop styling, keeping the text.
    pub(crate) fn into_plain(self) -> Segment {
        Segment {
            signature: String::new(),
            highlight: None,
            ..self
        }
    }
}

/// Segment `text` using `strategy`.
///
/// Never fails: invalid ranges are skipped and an empty text yields an
/// empty list.
pub fn segment(
    text: &str,
    entities: &[Entity],
    strategy: SegmentationStrategy,
    tooltip_separator: &str,
) -> Vec<Segment> {
    let emitted = match strategy {
        SegmentationStrategy::PerCharacter => dense::emit(text, entities, tooltip_separator),
        SegmentationStrategy::Sweep => sweep::emit(text, entities, tooltip_separator),
    };
    merge_adjacent(emitted, tooltip_separator, |s| s.signature.clone())
}

/// Coalesce consecutive segments whose `key` is equal.
///
/// The merged segment keeps the first segment's payload, extends its range
/// and text, and takes in the other's traits and tooltips.
pub fn merge_adjacent<F>(segments: Vec<Segment>, tooltip_separator: &str, key: F) -> Vec<Segment>
where
    F: Fn(&Segment) -> String,
{
    let mut merged: Vec<(String, Segment)> = Vec::with_capacity(segments.len());

    for segment in segments {
        let segment_key = key(&segment);
        if let Some((last_key, last)) = merged.last_mut()
            && *last_key == segment_key
            && last.end == segment.start
        {
            last.end = segment.end;
            last.text.push_str(&segment.text);
            if let (Some(into), Some(from)) = (last.highlight.as_mut(), segment.highlight.as_ref()) {
                into.absorb(from, tooltip_separator);
            }
            continue;
        }
        merged.push((segment_key, segment));
    }

    merged.into_iter().map(|(_, segment)| segment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityAttribute;
    use crate::style::Rgb;

    const TEXT: &str = "Patient has severe pain.";

    fn both_strategies(text: &str, entities: &[Entity]) -> Vec<Segment> {
        let dense = segment(text, entities, SegmentationStrategy::PerCharacter, "; ");
        let sweep = segment(text, entities, SegmentationStrategy::Sweep, "; ");
        assert_eq!(dense, sweep);
        sweep
    }

    #[test]
    fn test_single_symptom() {
        let entities = vec![Entity::new("1", "pain", 19, 23).with_trait("SYMPTOM")];

        let segments = both_strategies(TEXT, &entities);
        assert_eq!(segments.len(), 3);

        assert_eq!(segments[0].text, "Patient has severe ");
        assert!(!segments[0].is_highlighted());

        let pain = &segments[1];
        assert_eq!((pain.start, pain.end), (19, 23));
        assert_eq!(pain.text, "pain");
        let highlight = pain.highlight.as_ref().unwrap();
        assert_eq!(highlight.trait_names(), vec!["SYMPTOM"]);
        assert_eq!(highlight.traits[0].color, Rgb::RED.hex());
        assert_eq!(highlight.tooltip, "SYMPTOM");
        assert!(!highlight.is_attribute);
        assert!(!highlight.has_both);

        assert_eq!(segments[2].text, ".");
        assert!(!segments[2].is_highlighted());
    }

    #[test]
    fn test_overlapping_negation_leaves_traits_unchanged() {
        let entities = vec![
            Entity::new("1", "pain", 19, 23).with_trait("SYMPTOM"),
            Entity::new("2", "pain", 19, 23).with_trait("NEGATION"),
        ];

        let segments = both_strategies(TEXT, &entities);
        assert_eq!(segments.len(), 3);
        let highlight = segments[1].highlight.as_ref().unwrap();
        assert_eq!(highlight.trait_names(), vec!["SYMPTOM"]);
        assert_eq!(highlight.entity.id, "1");
    }

    #[test]
    fn test_negation_only_entity_is_plain() {
        let entities = vec![Entity::new("1", "pain", 19, 23).with_trait("NEGATION")];

        let segments = both_strategies(TEXT, &entities);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, TEXT);
        assert!(!segments[0].is_highlighted());
    }

    #[test]
    fn test_partial_overlap_splits_and_accumulates() {
        // "severe pain" as DIAGNOSIS, "pain" as SYMPTOM
        let entities = vec![
            Entity::new("1", "severe pain", 12, 23).with_trait("DIAGNOSIS"),
            Entity::new("2", "pain", 19, 23).with_trait("SYMPTOM"),
        ];

        let segments = both_strategies(TEXT, &entities);
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Patient has ", "severe ", "pain", "."]);

        let overlap = segments[2].highlight.as_ref().unwrap();
        assert_eq!(overlap.trait_names(), vec!["DIAGNOSIS", "SYMPTOM"]);
        assert_eq!(overlap.tooltip, "DIAGNOSIS; SYMPTOM");
    }

    #[test]
    fn test_same_style_different_entities_merge() {
        // Adjacent entities with identical styling coalesce into one segment
        let entities = vec![
            Entity::new("1", "severe", 12, 18).with_trait("SYMPTOM"),
            Entity::new("2", " pain", 18, 23).with_trait("SYMPTOM"),
        ];

        let segments = both_strategies(TEXT, &entities);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text, "severe pain");
        assert_eq!(segments[1].highlight.as_ref().unwrap().entity.id, "1");
    }

    #[test]
    fn test_trait_names_match_case_insensitively() {
        let entities = vec![
            Entity::new("1", "abc", 0, 3).with_trait("symptom"),
            Entity::new("2", "def", 3, 6).with_trait("SYMPTOM"),
            Entity::new("3", "abcdef", 0, 6).with_trait("Symptom"),
        ];

        let segments = both_strategies("abcdef", &entities);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "abcdef");
        assert_eq!(segments[0].signature, "SYMPTOM:#dc2626");

        let highlight = segments[0].highlight.as_ref().unwrap();
        assert_eq!(highlight.trait_names(), vec!["SYMPTOM"]);
        assert_eq!(highlight.tooltip, "SYMPTOM");

        let repeated = vec![Entity::new("4", "abc", 0, 3).with_trait("sign").with_trait("SIGN")];
        let segments = both_strategies("abc", &repeated);
        let highlight = segments[0].highlight.as_ref().unwrap();
        assert_eq!(highlight.trait_names(), vec!["SIGN"]);
        assert_eq!(highlight.tooltip, "SIGN");
    }

    #[test]
    fn test_attribute_background_and_flags() {
        let text = "left knee swelling";
        let entities = vec![
            Entity::new("5", "left knee swelling", 0, 18)
                .with_trait("SIGN")
                .with_attribute(EntityAttribute::new("DIRECTION", 0, 4).with_text("left"))
                .with_attribute(EntityAttribute::new("SYSTEM_ORGAN_SITE", 0, 9).with_text("left knee")),
        ];

        let segments = both_strategies(text, &entities);
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["left", " knee", " swelling"]);

        let left = segments[0].highlight.as_ref().unwrap();
        // First attribute background wins when attributes overlap
        assert_eq!(left.background.as_deref(), Some(Rgb::LIGHT_BLUE.hex().as_str()));
        assert_eq!(left.attribute_label.as_deref(), Some("Direction"));
        assert!(left.has_both);
        assert!(!left.is_attribute);
        assert_eq!(left.tooltip, "SIGN; Attributes: Direction; Attributes: Organ");

        let knee = segments[1].highlight.as_ref().unwrap();
        assert_eq!(knee.attribute_label.as_deref(), Some("Organ"));

        let swelling = segments[2].highlight.as_ref().unwrap();
        assert!(swelling.background.is_none());
        assert!(!swelling.has_both);
    }

    #[test]
    fn test_attribute_only_segment() {
        let text = "sharp pain";
        let entities = vec![
            Entity::new("3", "pain", 6, 10)
                .with_trait("NEGATION")
                .with_attribute(EntityAttribute::new("QUALITY", 0, 5).with_text("sharp")),
        ];

        let segments = both_strategies(text, &entities);
        assert_eq!(segments.len(), 2);
        let sharp = segments[0].highlight.as_ref().unwrap();
        assert!(sharp.is_attribute);
        assert!(sharp.traits.is_empty());
        assert_eq!(sharp.entity.id, "attr-3-0");
        assert_eq!(segments[0].signature, format!("attr:{}", Rgb::LIGHT_GREEN.hex()));
    }

    #[test]
    fn test_empty_text_and_no_entities() {
        assert!(both_strategies("", &[]).is_empty());

        let segments = both_strategies("plain text", &[]);
        assert_eq!(segments.len(), 1);
        assert_eq!((segments[0].start, segments[0].end), (0, 10));
    }

    #[test]
    fn test_invalid_ranges_do_not_style() {
        let entities = vec![
            Entity::new("1", "x", 23, 19).with_trait("SYMPTOM"),
            Entity::new("2", "x", 19, 99).with_trait("SYMPTOM"),
        ];

        let segments = both_strategies(TEXT, &entities);
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].is_highlighted());
    }

    #[test]
    fn test_unicode_offsets_are_characters() {
        let text = "Pt → dyspnée, fièvre";
        let entities = vec![Entity::new("1", "fièvre", 14, 20).with_trait("SIGN")];

        let segments = both_strategies(text, &entities);
        assert_eq!(segments[1].text, "fièvre");
        assert_eq!(segments[0].text, "Pt → dyspnée, ");
    }

    #[test]
    fn test_merge_adjacent_by_custom_key() {
        let plain = |start: usize, end: usize, text: &str| Segment {
            start,
            end,
            text: text.to_string(),
            signature: String::new(),
            highlight: None,
        };

        let merged = merge_adjacent(
            vec![plain(0, 2, "ab"), plain(2, 3, "c"), plain(3, 5, "de")],
            "; ",
            |s| if s.start == 2 { "x".to_string() } else { String::new() },
        );
        let texts: Vec<&str> = merged.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "c", "de"]);

        let merged = merge_adjacent(
            vec![plain(0, 2, "ab"), plain(2, 3, "c")],
            "; ",
            |_| String::new(),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "abc");
        assert_eq!(merged[0].end, 3);
    }
}
