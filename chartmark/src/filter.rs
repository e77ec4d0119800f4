//! Category filtering over base segments.
//!
//! A filter is either `all` or one trait name / attribute type. Segments that
//! do not match lose their styling but keep their text, and the adjacency
//! merge runs again so neighbouring plain runs coalesce.

use crate::entity::{Entity, EntityCategory};
use crate::segment::{Segment, merge_adjacent};
use crate::style;
use crate::{ChartmarkError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which highlighted segments stay visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// A trait name or attribute type, compared case-insensitively
    Named(String),
}

impl CategoryFilter {
    pub fn named(name: impl Into<String>) -> Self {
        CategoryFilter::Named(name.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Whether a highlighted segment stays visible under this filter.
    pub fn shows(&self, segment: &Segment) -> bool {
        let Some(highlight) = &segment.highlight else {
            return false;
        };
        let name = match self {
            CategoryFilter::All => return true,
            CategoryFilter::Named(name) => name,
        };

        let entity = &highlight.entity;
        let is_matching_attribute = entity.category == EntityCategory::Attribute
            && entity
                .entity_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(name));
        let has_matching_attribute = entity
            .attributes
            .iter()
            .any(|a| a.attribute_type.eq_ignore_ascii_case(name));
        let has_matching_trait = highlight
            .traits
            .iter()
            .any(|t| t.trait_name.eq_ignore_ascii_case(name));

        is_matching_attribute || has_matching_attribute || has_matching_trait
    }

    /// Merge key of a segment after filtering; empty when it renders plain.
    pub fn signature(&self, segment: &Segment) -> String {
        if self.shows(segment) {
            format!("{}|{}", self, segment.signature)
        } else {
            String::new()
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Named(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ChartmarkError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ChartmarkError::InvalidFilter(s.to_string()));
        }
        if value.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Named(value.to_string()))
        }
    }
}

/// Apply `filter` to base segments.
///
/// `All` returns the segments unchanged.
pub fn apply_filter(segments: &[Segment], filter: &CategoryFilter, tooltip_separator: &str) -> Vec<Segment> {
    if filter.is_all() {
        return segments.to_vec();
    }

    let filtered: Vec<Segment> = segments
        .iter()
        .map(|segment| {
            if filter.shows(segment) {
                segment.clone()
            } else {
                segment.clone().into_plain()
            }
        })
        .collect();

    merge_adjacent(filtered, tooltip_separator, |s| filter.signature(s))
}

/// Kind of a filter option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    All,
    Trait,
    Attribute,
}

/// One choice for the filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Value to pass back as the filter
    pub value: String,
    pub label: String,
    pub kind: FilterKind,
    /// Entities (for `all` and traits) or attribute spans carrying it
    pub count: usize,
}

/// Filter options present in a document: `all` first, then trait names, then
/// attribute types, each group sorted by value.
///
/// `NEGATION` is never offered since it never styles text.
pub fn available_filters(entities: &[Entity]) -> Vec<FilterOption> {
    let mut traits: BTreeMap<String, usize> = BTreeMap::new();
    let mut attributes: BTreeMap<String, (String, usize)> = BTreeMap::new();

    for entity in entities {
        let mut seen: Vec<String> = Vec::new();
        for name in entity.visual_traits().map(|t| t.name.trim().to_ascii_uppercase()) {
            if !seen.contains(&name) {
                *traits.entry(name.clone()).or_default() += 1;
                seen.push(name);
            }
        }

        let attribute_types = entity.attributes.iter().map(|a| a.attribute_type.as_str()).chain(
            entity
                .entity_type
                .as_deref()
                .filter(|_| entity.category == EntityCategory::Attribute),
        );
        for attribute_type in attribute_types {
            let key = attribute_type.trim().to_ascii_uppercase();
            attributes
                .entry(key)
                .or_insert_with(|| (style::attribute_label(attribute_type), 0))
                .1 += 1;
        }
    }

    let mut options = vec![FilterOption {
        value: "all".to_string(),
        label: "All".to_string(),
        kind: FilterKind::All,
        count: entities.len(),
    }];
    options.extend(traits.into_iter().map(|(name, count)| FilterOption {
        label: name.clone(),
        value: name,
        kind: FilterKind::Trait,
        count,
    }));
    options.extend(attributes.into_iter().map(|(value, (label, count))| FilterOption {
        value,
        label,
        kind: FilterKind::Attribute,
        count,
    }));
    options
}
