//! Per-character accumulation of style entries.
//!
//! Every entity and every nested attribute with a valid range becomes one
//! [`StyleEntry`]. Entries accumulate: a character covered by two entities
//! holds two entries, in entity-list order with each entity's attributes
//! following it.

use crate::entity::{Entity, Span};
use crate::style::{self, AttributeStyle, TraitStyle};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Styling contributed by one entity or attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEntry {
    /// Non-negation trait styles; always empty for attributes
    pub traits: Vec<TraitStyle>,
    /// Attribute background; always `None` for regular entities
    pub background: Option<AttributeStyle>,
    /// The contributing entity, synthetic for attributes
    pub entity: Arc<Entity>,
    pub tooltip: String,
    pub is_attribute: bool,
}

impl StyleEntry {
    fn for_entity(entity: Arc<Entity>) -> Self {
        let mut traits: Vec<TraitStyle> = Vec::new();
        for style in entity.visual_traits().filter_map(|t| style::resolve_trait(&t.name)) {
            if !traits.iter().any(|t| t.trait_name == style.trait_name) {
                traits.push(style);
            }
        }
        let tooltip = traits
            .iter()
            .map(|t| t.trait_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            traits,
            background: None,
            entity,
            tooltip,
            is_attribute: false,
        }
    }

    fn for_attribute(entity: Arc<Entity>, style: AttributeStyle) -> Self {
        Self {
            traits: Vec::new(),
            tooltip: format!("Attributes: {}", style.label),
            background: Some(style),
            entity,
            is_attribute: true,
        }
    }

    /// Whether this entry changes how text looks.
    pub fn is_styling(&self) -> bool {
        !self.traits.is_empty() || self.background.is_some()
    }

    /// Design signature tokens contributed by this entry.
    pub fn signature_tokens(&self) -> impl Iterator<Item = String> + '_ {
        let trait_tokens = self
            .traits
            .iter()
            .filter(|_| !self.is_attribute)
            .map(TraitStyle::signature_token);
        let attribute_tokens = self.background.iter().map(AttributeStyle::signature_token);
        trait_tokens.chain(attribute_tokens)
    }

    /// Identity token, `entityId-isAttribute`.
    pub fn identity_token(&self) -> String {
        format!("{}-{}", self.entity.id, self.is_attribute)
    }
}

/// An entry together with the validated range it covers.
#[derive(Debug, Clone)]
pub struct PlacedEntry {
    pub span: Span,
    pub entry: Arc<StyleEntry>,
}

/// Resolve styles for every valid entity and attribute range, in
/// accumulation order.
///
/// Invalid ranges are skipped here, explicitly; an invalid parent range
/// does not hide its valid attributes.
pub fn place_entries(text_len: usize, entities: &[Entity]) -> Vec<PlacedEntry> {
    let mut placed = Vec::with_capacity(entities.len());

    for entity in entities {
        match entity.span(text_len) {
            Ok(span) => placed.push(PlacedEntry {
                span,
                entry: Arc::new(StyleEntry::for_entity(Arc::new(entity.clone()))),
            }),
            Err(error) => {
                debug!(entity_id = %entity.id, %error, "skipping entity range");
            }
        }

        for attribute in &entity.attributes {
            match attribute.span(text_len) {
                Ok(span) => {
                    let synthetic = Arc::new(entity.attribute_entity(attribute));
                    let style = style::resolve_attribute(&attribute.attribute_type);
                    placed.push(PlacedEntry {
                        span,
                        entry: Arc::new(StyleEntry::for_attribute(synthetic, style)),
                    });
                }
                Err(error) => {
                    debug!(
                        entity_id = %entity.id,
                        attribute_type = %attribute.attribute_type,
                        %error,
                        "skipping attribute range"
                    );
                }
            }
        }
    }

    placed
}

/// Dense map from character index to the entries covering it.
#[derive(Debug, Clone, Default)]
pub struct PositionMap {
    positions: Vec<Vec<Arc<StyleEntry>>>,
}

impl PositionMap {
    /// Build the map for `text_len` characters.
    pub fn build(text_len: usize, entities: &[Entity]) -> Self {
        let mut positions: Vec<Vec<Arc<StyleEntry>>> = vec![Vec::new(); text_len];

        for placed in place_entries(text_len, entities) {
            for slot in &mut positions[placed.span.start..placed.span.end] {
                slot.push(Arc::clone(&placed.entry));
            }
        }

        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Entries covering character `index`.
    pub fn at(&self, index: usize) -> &[Arc<StyleEntry>] {
        self.positions.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Arc<StyleEntry>]> {
        self.positions.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityAttribute;

    #[test]
    fn test_entries_accumulate_in_order() {
        let entities = vec![
            Entity::new("1", "severe pain", 12, 23).with_trait("SYMPTOM"),
            Entity::new("2", "pain", 19, 23).with_trait("DIAGNOSIS"),
        ];

        let map = PositionMap::build(24, &entities);
        assert_eq!(map.len(), 24);
        assert!(map.at(11).is_empty());
        assert_eq!(map.at(12).len(), 1);

        let both = map.at(20);
        assert_eq!(both.len(), 2);
        assert_eq!(both[0].entity.id, "1");
        assert_eq!(both[1].entity.id, "2");
        assert!(map.at(23).is_empty());
    }

    #[test]
    fn test_attribute_entry_is_separate() {
        let entities = vec![
            Entity::new("9", "left knee", 0, 9)
                .with_trait("SIGN")
                .with_attribute(EntityAttribute::new("DIRECTION", 0, 4).with_text("left")),
        ];

        let map = PositionMap::build(9, &entities);
        let entries = map.at(0);
        assert_eq!(entries.len(), 2);

        assert!(!entries[0].is_attribute);
        assert_eq!(entries[0].tooltip, "SIGN");

        let attribute = &entries[1];
        assert!(attribute.is_attribute);
        assert!(attribute.traits.is_empty());
        assert_eq!(attribute.tooltip, "Attributes: Direction");
        assert_eq!(attribute.entity.id, "attr-9-0");
        assert_eq!(attribute.identity_token(), "attr-9-0-true");

        assert_eq!(map.at(5).len(), 1);
    }

    #[test]
    fn test_negation_excluded_from_entry() {
        let entities = vec![
            Entity::new("1", "fever", 0, 5)
                .with_trait("NEGATION")
                .with_trait("SYMPTOM"),
            Entity::new("2", "fever", 0, 5).with_trait("NEGATION"),
        ];

        let map = PositionMap::build(5, &entities);
        let entries = map.at(0);
        assert_eq!(entries[0].tooltip, "SYMPTOM");
        assert_eq!(entries[0].traits.len(), 1);
        assert!(!entries[1].is_styling());
        assert_eq!(entries[1].signature_tokens().count(), 0);
    }

    #[test]
    fn test_invalid_ranges_are_skipped() {
        let entities = vec![
            Entity::new("reversed", "x", 4, 1).with_trait("SYMPTOM"),
            Entity::new("empty", "", 2, 2).with_trait("SYMPTOM"),
            Entity::new("negative", "x", -3, 2).with_trait("SYMPTOM"),
            Entity::new("overflow", "x", 3, 50)
                .with_trait("SYMPTOM")
                .with_attribute(EntityAttribute::new("QUALITY", 1, 3)),
        ];

        let placed = place_entries(6, &entities);
        // Only the overflowing parent's valid attribute survives
        assert_eq!(placed.len(), 1);
        assert!(placed[0].entry.is_attribute);
        assert_eq!(placed[0].span, Span { start: 1, end: 3 });
    }
}
