//! Per-character strategy: materialize every position, then scan.

use super::Segment;
use super::emitter::{CharIndex, Emitter};
use crate::entity::Entity;
use crate::position::PositionMap;

pub(crate) fn emit(text: &str, entities: &[Entity], tooltip_separator: &str) -> Vec<Segment> {
    let index = CharIndex::new(text);
    let map = PositionMap::build(index.len(), entities);
    let mut emitter = Emitter::new(text, &index, tooltip_separator);

    for (position, entries) in map.iter().enumerate() {
        emitter.push_run(position, position + 1, entries);
    }

    emitter.finish()
}
