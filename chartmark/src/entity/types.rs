//! Entity types and structures.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Name of the trait that is metadata only and never styles text.
pub const NEGATION_TRAIT: &str = "NEGATION";

/// Discriminator between regular entities and attribute spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityCategory {
    /// A regular clinical mention (condition, medication, ...)
    #[default]
    Regular,
    /// An attribute span, either nested or synthesized from a parent entity
    Attribute,
}

impl EntityCategory {
    /// Get a string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Regular => "REGULAR",
            EntityCategory::Attribute => "ATTRIBUTE",
        }
    }

    /// Map an upstream category label. Anything other than `attribute`
    /// (case-insensitive) is a regular entity, e.g. `MEDICAL_CONDITION`.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("attribute") {
            EntityCategory::Attribute
        } else {
            EntityCategory::Regular
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(EntityCategory::from_label(&label))
    }
}

/// A classification tag on an entity, e.g. `SYMPTOM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTrait {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Score")]
    pub score: Option<f32>,
}

impl EntityTrait {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Whether this trait is the negation marker.
    pub fn is_negation(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(NEGATION_TRAIT)
    }
}

/// A nested span attached to an entity but positioned and colored on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAttribute {
    #[serde(default, alias = "Id", deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(rename = "type", alias = "Type")]
    pub attribute_type: String,
    #[serde(default, alias = "Text")]
    pub text: String,
    #[serde(alias = "BeginOffset")]
    pub begin_offset: i64,
    #[serde(alias = "EndOffset")]
    pub end_offset: i64,
    #[serde(default, alias = "Score")]
    pub score: Option<f32>,
    #[serde(default, alias = "Traits", deserialize_with = "deserialize_null_default")]
    pub traits: Vec<EntityTrait>,
}

impl EntityAttribute {
    pub fn new(attribute_type: impl Into<String>, begin_offset: i64, end_offset: i64) -> Self {
        Self {
            id: None,
            attribute_type: attribute_type.into(),
            text: String::new(),
            begin_offset,
            end_offset,
            score: None,
            traits: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// The validated half-open range of this attribute in a text of
    /// `text_len` characters.
    pub fn span(&self, text_len: usize) -> Result<Span, SpanError> {
        Span::checked(self.begin_offset, self.end_offset, text_len)
    }
}

/// A ranked code suggestion, used only for detail display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSuggestion {
    #[serde(alias = "Code")]
    pub code: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default, alias = "Score")]
    pub score: f32,
}

/// An NLP-extracted clinical span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(alias = "Id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "Text")]
    pub text: String,
    #[serde(default, alias = "Category")]
    pub category: EntityCategory,
    #[serde(default, rename = "type", alias = "Type")]
    pub entity_type: Option<String>,
    #[serde(alias = "BeginOffset")]
    pub begin_offset: i64,
    #[serde(alias = "EndOffset")]
    pub end_offset: i64,
    #[serde(default, alias = "Score")]
    pub score: Option<f32>,
    #[serde(default, alias = "Traits", deserialize_with = "deserialize_null_default")]
    pub traits: Vec<EntityTrait>,
    #[serde(default, alias = "Attributes", deserialize_with = "deserialize_null_default")]
    pub attributes: Vec<EntityAttribute>,
    #[serde(
        default,
        alias = "ConceptSuggestions",
        alias = "ICD10CMConcepts",
        deserialize_with = "deserialize_null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub concept_suggestions: Vec<ConceptSuggestion>,
}

impl Entity {
    /// Create a regular entity covering `[begin_offset, end_offset)`.
    pub fn new(id: impl Into<String>, text: impl Into<String>, begin_offset: i64, end_offset: i64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category: EntityCategory::Regular,
            entity_type: None,
            begin_offset,
            end_offset,
            score: None,
            traits: Vec::new(),
            attributes: Vec::new(),
            concept_suggestions: Vec::new(),
        }
    }

    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.push(EntityTrait::new(name));
        self
    }

    pub fn with_attribute(mut self, attribute: EntityAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_category(mut self, category: EntityCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn with_concept(mut self, code: impl Into<String>, description: impl Into<String>, score: f32) -> Self {
        self.concept_suggestions.push(ConceptSuggestion {
            code: code.into(),
            description: description.into(),
            score,
        });
        self
    }

    /// The validated half-open range of this entity in a text of `text_len`
    /// characters.
    pub fn span(&self, text_len: usize) -> Result<Span, SpanError> {
        Span::checked(self.begin_offset, self.end_offset, text_len)
    }

    /// Traits that contribute styling, i.e. everything except `NEGATION`.
    pub fn visual_traits(&self) -> impl Iterator<Item = &EntityTrait> {
        self.traits.iter().filter(|t| !t.is_negation())
    }

    /// Whether the entity carries the negation trait.
    pub fn is_negated(&self) -> bool {
        self.traits.iter().any(EntityTrait::is_negation)
    }

    /// The highest scored concept suggestions, best first.
    pub fn top_concepts(&self, limit: usize) -> Vec<&ConceptSuggestion> {
        let mut concepts: Vec<&ConceptSuggestion> = self.concept_suggestions.iter().collect();
        concepts.sort_by(|a, b| b.score.total_cmp(&a.score));
        concepts.truncate(limit);
        concepts
    }

    /// Build the synthetic entity that stands in for one of this entity's
    /// attributes in the position map.
    pub fn attribute_entity(&self, attribute: &EntityAttribute) -> Entity {
        Entity {
            id: format!("attr-{}-{}", self.id, attribute.begin_offset),
            text: attribute.text.clone(),
            category: EntityCategory::Attribute,
            entity_type: Some(attribute.attribute_type.clone()),
            begin_offset: attribute.begin_offset,
            end_offset: attribute.end_offset,
            score: attribute.score,
            traits: Vec::new(),
            attributes: Vec::new(),
            concept_suggestions: Vec::new(),
        }
    }

    /// Get a formatted one-line summary of the entity.
    pub fn format(&self) -> String {
        let traits: Vec<&str> = self.traits.iter().map(|t| t.name.as_str()).collect();
        format!(
            "{} [{}] {}..{} traits: {}",
            self.text,
            self.entity_type.as_deref().unwrap_or(self.category.as_str()),
            self.begin_offset,
            self.end_offset,
            if traits.is_empty() { "-".to_string() } else { traits.join(", ") }
        )
    }
}

/// A validated half-open character range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Validate raw offsets against a text of `text_len` characters.
    pub fn checked(begin: i64, end: i64, text_len: usize) -> Result<Span, SpanError> {
        if begin < 0 || end < 0 {
            return Err(SpanError::Negative { begin, end });
        }
        if begin >= end {
            return Err(SpanError::Empty { begin, end });
        }
        let (start, end) = (begin as usize, end as usize);
        if end > text_len {
            return Err(SpanError::OutOfBounds {
                end,
                text_len,
            });
        }
        Ok(Span { start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Why a raw range was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SpanError {
    #[error("negative offset ({begin}..{end})")]
    Negative { begin: i64, end: i64 },
    #[error("begin is not before end ({begin}..{end})")]
    Empty { begin: i64, end: i64 },
    #[error("end offset {end} is past the end of the text ({text_len} chars)")]
    OutOfBounds { end: usize, text_len: usize },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|id| id.map(String::from))
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
