pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use context::{ChartmarkCliContext, load_document, load_entities};
pub use output::{
    CliColors, TerminalRenderer, error_code, format_error, format_info, format_success,
    format_warning, hex_color, output_error_json, print_entity,
    print_filter_options, print_segment_list, print_validation_report,
};
pub use utils::{parse_render_format, parse_strategy, truncate};
