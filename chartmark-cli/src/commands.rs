//! Command enum definitions
//!
//! This module contains the CLI command enum that defines the command structure.

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// Segment a chart and render the highlighted text
    #[command(
        alias = "highlight",
        long_about = r#"
Merge the entity annotations of a chart into display segments and render them.

Every character of the text belongs to exactly one segment. Overlapping
entities accumulate their styling; NEGATION never styles text; ranges outside
the text are skipped (run `check` to list them).

FILTERS:
  • all - every highlighted segment (default)
  • SYMPTOM, DIAGNOSIS, SIGN, ... - segments carrying that trait
  • DIRECTION, QUALITY, SYSTEM_ORGAN_SITE, ... - segments of entities with that attribute

EXAMPLES:
  # Colored terminal output
  chartmark-cli segment --text note.txt --entities note.json --format terminal

  # Only symptoms, as inline markup
  chartmark-cli segment -t note.txt -e note.json --filter SYMPTOM --format markup

  # Segment list for tool integration
  chartmark-cli --machine segment -t note.txt -e note.json
"#
    )]
    Segment(SegmentArgs),

    /// List the filters available for a document
    Filters(FiltersArgs),

    /// Show the details of one entity
    Entity(EntityArgs),

    /// Report entity and attribute ranges that segmentation will skip
    #[command(alias = "validate")]
    Check(CheckArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
