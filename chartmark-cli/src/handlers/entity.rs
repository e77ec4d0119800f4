//! Entity command handler

use crate::args::EntityArgs;
use crate::context::load_entities;
use crate::output::*;

pub async fn handle_entity_command(args: EntityArgs, output_format: &str) -> chartmark::Result<()> {
    let document = load_entities(&args.entities).await?;
    let entity = document.find(&args.id)?;

    if output_format == "json" {
        print_json(entity);
    } else {
        print_entity(entity, args.concepts);
    }
    Ok(())
}
