//! Entity document envelope and range validation.

use super::{Entity, SpanError};
use crate::{ChartmarkError, Result};
use serde::{Deserialize, Serialize};

/// The `{ "Entities": [...] }` envelope produced by the extraction service.
///
/// Unknown top-level keys (model version, unmapped attributes, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDocument {
    #[serde(rename = "Entities", alias = "entities", default)]
    pub entities: Vec<Entity>,
}

impl EntityDocument {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Parse a document from JSON. A bare JSON array of entities is accepted too.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            let entities: Vec<Entity> = serde_json::from_value(value)?;
            return Ok(Self { entities });
        }
        if !value.is_object() {
            return Err(ChartmarkError::Parse(
                "top-level JSON value must be an object or an array".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Look up an entity by id.
    pub fn find(&self, id: &str) -> Result<&Entity> {
        self.entities
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ChartmarkError::EntityNotFound { id: id.to_string() })
    }

    /// Check every entity and attribute range against `text`.
    ///
    /// Segmentation skips the same ranges this report lists; the report only
    /// exists so callers can surface them.
    pub fn validate(&self, text: &str) -> ValidationReport {
        let text_len = text.chars().count();
        let mut report = ValidationReport {
            text_len,
            entities_checked: self.entities.len(),
            ..Default::default()
        };

        for entity in &self.entities {
            if let Err(error) = entity.span(text_len) {
                report.skipped.push(SkippedRange {
                    entity_id: entity.id.clone(),
                    attribute_type: None,
                    begin_offset: entity.begin_offset,
                    end_offset: entity.end_offset,
                    error,
                });
            }

            for attribute in &entity.attributes {
                report.attributes_checked += 1;
                if let Err(error) = attribute.span(text_len) {
                    report.skipped.push(SkippedRange {
                        entity_id: entity.id.clone(),
                        attribute_type: Some(attribute.attribute_type.clone()),
                        begin_offset: attribute.begin_offset,
                        end_offset: attribute.end_offset,
                        error,
                    });
                }
            }
        }

        report
    }
}

/// A range that segmentation will ignore.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRange {
    pub entity_id: String,
    /// Set when the range belongs to a nested attribute
    pub attribute_type: Option<String>,
    pub begin_offset: i64,
    pub end_offset: i64,
    pub error: SpanError,
}

/// Result of [`EntityDocument::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub text_len: usize,
    pub entities_checked: usize,
    pub attributes_checked: usize,
    pub skipped: Vec<SkippedRange>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
