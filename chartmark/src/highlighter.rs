//! Configured entry points to the segmentation core.

use crate::config::SegmentationConfig;
use crate::entity::Entity;
use crate::filter::{CategoryFilter, apply_filter};
use crate::segment::{self, Segment};
use crate::Result;
use tracing::{debug, info};

/// Segments text with a fixed [`SegmentationConfig`].
///
/// Holds no per-document state, so one instance can serve any number of
/// documents and threads.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    config: SegmentationConfig,
}

impl Highlighter {
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Base segments of `text`, before any filter.
    pub fn segment(&self, text: &str, entities: &[Entity]) -> Vec<Segment> {
        segment::segment(text, entities, self.config.strategy, &self.config.tooltip_separator)
    }

    /// Apply `filter` to already computed base segments.
    pub fn filter(&self, segments: &[Segment], filter: &CategoryFilter) -> Vec<Segment> {
        apply_filter(segments, filter, &self.config.tooltip_separator)
    }

    /// Segment `text` and apply `filter`.
    ///
    /// Only an empty filter value fails; malformed entity ranges are skipped.
    pub fn highlight(&self, text: &str, entities: &[Entity], filter: &str) -> Result<Vec<Segment>> {
        let filter: CategoryFilter = filter.parse()?;
        let base = self.segment(text, entities);
        let segments = self.filter(&base, &filter);
        debug!(
            entities = entities.len(),
            %filter,
            base = base.len(),
            filtered = segments.len(),
            "highlighted document"
        );
        Ok(segments)
    }
}

/// Memoized view of one document.
///
/// Base segments are recomputed only when the text or the entities are
/// replaced; the filtered list only when the filter or the base changes.
#[derive(Debug, Clone)]
pub struct DocumentView {
    highlighter: Highlighter,
    text: String,
    entities: Vec<Entity>,
    filter: CategoryFilter,
    base: Option<Vec<Segment>>,
    filtered: Option<Vec<Segment>>,
    recomputes: usize,
}

impl DocumentView {
    /// Create a view using the highlighter's default filter.
    pub fn new(highlighter: Highlighter) -> Result<Self> {
        let filter = highlighter.config().default_filter.parse()?;
        Ok(Self {
            highlighter,
            text: String::new(),
            entities: Vec::new(),
            filter,
            base: None,
            filtered: None,
            recomputes: 0,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn current_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate();
    }

    pub fn set_entities(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
        self.invalidate();
    }

    /// Change the filter. Base segments are kept.
    pub fn set_filter(&mut self, filter: &str) -> Result<()> {
        let filter: CategoryFilter = filter.parse()?;
        if filter != self.filter {
            self.filter = filter;
            self.filtered = None;
        }
        Ok(())
    }

    /// Segments before filtering.
    pub fn base_segments(&mut self) -> &[Segment] {
        if self.base.is_none() {
            let base = self.highlighter.segment(&self.text, &self.entities);
            self.recomputes += 1;
            info!(
                segments = base.len(),
                entities = self.entities.len(),
                recomputes = self.recomputes,
                "recomputed document segments"
            );
            self.base = Some(base);
        }
        self.base.as_deref().unwrap_or_default()
    }

    /// Segments under the current filter.
    pub fn segments(&mut self) -> &[Segment] {
        if self.filtered.is_none() {
            self.base_segments();
            let base = self.base.as_deref().unwrap_or_default();
            let filtered = self.highlighter.filter(base, &self.filter);
            self.filtered = Some(filtered);
        }
        self.filtered.as_deref().unwrap_or_default()
    }

    /// How many times base segments were computed.
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }

    fn invalidate(&mut self) {
        self.base = None;
        self.filtered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartmarkError;
    use crate::config::SegmentationStrategy;

    fn entities() -> Vec<Entity> {
        vec![
            Entity::new("1", "pain", 19, 23).with_trait("SYMPTOM"),
            Entity::new("2", "severe", 12, 18).with_trait("DIAGNOSIS"),
        ]
    }

    #[test]
    fn test_highlight_with_filter() {
        let highlighter = Highlighter::default();
        let text = "Patient has severe pain.";

        let all = highlighter.highlight(text, &entities(), "all").unwrap();
        assert_eq!(all.iter().filter(|s| s.is_highlighted()).count(), 2);

        let symptoms = highlighter.highlight(text, &entities(), "Symptom").unwrap();
        let texts: Vec<&str> = symptoms.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Patient has severe ", "pain", "."]);
    }

    #[test]
    fn test_blank_filter_is_rejected() {
        let result = Highlighter::default().highlight("text", &[], "");
        assert!(matches!(result, Err(ChartmarkError::InvalidFilter(_))));
    }

    #[test]
    fn test_strategy_from_config() {
        let config = SegmentationConfig {
            strategy: SegmentationStrategy::PerCharacter,
            ..Default::default()
        };
        let dense = Highlighter::new(config);
        let sweep = Highlighter::default();
        let text = "Patient has severe pain.";

        assert_eq!(dense.segment(text, &entities()), sweep.segment(text, &entities()));
        assert_eq!(dense.config().strategy, SegmentationStrategy::PerCharacter);
    }

    #[test]
    fn test_view_recomputes_only_on_input_change() {
        let mut view = DocumentView::new(Highlighter::default()).unwrap();
        view.set_text("Patient has severe pain.");
        view.set_entities(entities());

        assert_eq!(view.segments().len(), 5);
        assert_eq!(view.recomputes(), 1);

        view.set_filter("SYMPTOM").unwrap();
        assert_eq!(view.segments().len(), 3);
        view.set_filter("all").unwrap();
        assert_eq!(view.segments().len(), 5);
        assert_eq!(view.recomputes(), 1);

        view.set_entities(Vec::new());
        assert_eq!(view.segments().len(), 1);
        assert_eq!(view.recomputes(), 2);
    }

    #[test]
    fn test_view_keeps_filter_on_invalid_value() {
        let mut view = DocumentView::new(Highlighter::default()).unwrap();
        view.set_filter("SIGN").unwrap();
        assert!(view.set_filter(" ").is_err());
        assert_eq!(view.current_filter(), &CategoryFilter::named("SIGN"));
    }
}
