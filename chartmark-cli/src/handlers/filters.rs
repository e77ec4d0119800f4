//! Filters command handler

use crate::args::FiltersArgs;
use crate::context::load_entities;
use crate::output::*;
use chartmark::filter::available_filters;

pub async fn handle_filters_command(args: FiltersArgs, output_format: &str) -> chartmark::Result<()> {
    let document = load_entities(&args.entities).await?;
    let options = available_filters(&document.entities);

    if output_format == "json" {
        print_json(&options);
    } else {
        print_filter_options(&options);
    }
    Ok(())
}
