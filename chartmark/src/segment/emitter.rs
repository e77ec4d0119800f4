//! Cuts runs of uniformly styled characters into segments.

use super::signature::RunKey;
use super::{Highlight, Segment};
use crate::position::StyleEntry;
use std::sync::Arc;
use tracing::trace;

/// Byte offsets of every character boundary, so char ranges can be sliced.
#[derive(Debug, Clone)]
pub(crate) struct CharIndex {
    boundaries: Vec<usize>,
}

impl CharIndex {
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn slice<'a>(&self, text: &'a str, start: usize, end: usize) -> &'a str {
        &text[self.boundaries[start]..self.boundaries[end]]
    }
}

struct OpenSegment {
    start: usize,
    end: usize,
    key: RunKey,
    entries: Vec<Arc<StyleEntry>>,
}

/// Accepts consecutive runs `[start, end)` with their active entries and
/// closes a segment whenever the identity key or the design signature
/// changes.
pub(crate) struct Emitter<'a> {
    text: &'a str,
    index: &'a CharIndex,
    tooltip_separator: &'a str,
    open: Option<OpenSegment>,
    emitted: Vec<Segment>,
}

impl<'a> Emitter<'a> {
    pub fn new(text: &'a str, index: &'a CharIndex, tooltip_separator: &'a str) -> Self {
        Self {
            text,
            index,
            tooltip_separator,
            open: None,
            emitted: Vec::new(),
        }
    }

    pub fn push_run(&mut self, start: usize, end: usize, entries: &[Arc<StyleEntry>]) {
        debug_assert!(start < end);
        let key = RunKey::of(entries);

        if let Some(open) = self.open.as_mut()
            && open.key == key
        {
            debug_assert_eq!(open.end, start);
            open.end = end;
            return;
        }

        self.close();
        self.open = Some(OpenSegment {
            start,
            end,
            key,
            entries: entries.to_vec(),
        });
    }

    /// Flush the last open segment and return everything emitted, before
    /// the adjacency merge.
    pub fn finish(mut self) -> Vec<Segment> {
        self.close();
        self.emitted
    }

    fn close(&mut self) {
        let Some(open) = self.open.take() else {
            return;
        };

        let highlight = if open.key.signature.is_empty() {
            None
        } else {
            Highlight::from_entries(&open.entries, self.tooltip_separator)
        };

        trace!(
            start = open.start,
            end = open.end,
            signature = %open.key.signature,
            "emitting segment"
        );

        self.emitted.push(Segment {
            start: open.start,
            end: open.end,
            text: self.index.slice(self.text, open.start, open.end).to_string(),
            signature: open.key.signature,
            highlight,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_index_handles_multibyte_text() {
        let text = "naïve café";
        let index = CharIndex::new(text);
        assert_eq!(index.len(), 10);
        assert_eq!(index.slice(text, 0, 5), "naïve");
        assert_eq!(index.slice(text, 6, 10), "café");
    }

    #[test]
    fn test_plain_runs_extend_one_segment() {
        let text = "abcdef";
        let index = CharIndex::new(text);
        let mut emitter = Emitter::new(text, &index, "; ");
        emitter.push_run(0, 2, &[]);
        emitter.push_run(2, 6, &[]);

        let segments = emitter.finish();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "abcdef");
        assert!(segments[0].highlight.is_none());
    }
}
