//! Check command handler

use crate::args::CheckArgs;
use crate::context::load_document;
use crate::output::*;
use tracing::warn;

pub async fn handle_check_command(args: CheckArgs, output_format: &str) -> chartmark::Result<()> {
    let (text, document) = load_document(&args.text, &args.entities).await?;
    let report = document.validate(&text);

    if !report.is_clean() {
        warn!(skipped = report.skipped.len(), "document has invalid ranges");
    }

    if output_format == "json" {
        print_json(&report);
    } else {
        print_validation_report(&report);
    }
    Ok(())
}
