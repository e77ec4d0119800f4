//! Segment command handler

use crate::args::SegmentArgs;
use crate::context::{ChartmarkCliContext, load_document};
use crate::output::*;
use crate::utils::{parse_render_format, parse_strategy};
use chartmark::config::{RenderConfig, RenderFormat};
use chartmark::prelude::*;
use tracing::info;

pub async fn handle_segment_command(
    args: SegmentArgs,
    ctx: &ChartmarkCliContext,
    output_format: &str,
) -> chartmark::Result<()> {
    let (text, document) = load_document(&args.text, &args.entities).await?;

    let highlighter = match &args.strategy {
        Some(strategy) => {
            let mut config = ctx.config.segmentation.clone();
            config.strategy = parse_strategy(strategy)?;
            Highlighter::new(config)
        }
        None => ctx.highlighter.clone(),
    };
    let filter = args
        .filter
        .as_deref()
        .unwrap_or(&ctx.config.segmentation.default_filter);

    let segments = highlighter.highlight(&text, &document.entities, filter)?;
    info!(
        segments = segments.len(),
        strategy = %highlighter.config().strategy,
        filter,
        "segmented chart"
    );

    if args.list && output_format != "json" {
        print_segment_list(&segments);
        return Ok(());
    }

    // Machine output always gets the segment list
    let format = if output_format == "json" {
        RenderFormat::Json
    } else {
        match &args.format {
            Some(format) => parse_render_format(format)?,
            None => ctx.config.render.format,
        }
    };

    println!("{}", render_segments(&segments, format, &ctx.config.render)?);
    Ok(())
}

/// Render segments in one of the supported formats.
pub fn render_segments(
    segments: &[Segment],
    format: RenderFormat,
    config: &RenderConfig,
) -> chartmark::Result<String> {
    let rendered = match format {
        RenderFormat::Json => serde_json::to_string_pretty(segments)?,
        RenderFormat::Markup => MarkupRenderer.render(segments),
        RenderFormat::Html => HtmlRenderer::from_config(config).render(segments),
        RenderFormat::Terminal => TerminalRenderer.render(segments),
    };
    Ok(rendered)
}
