use chartmark_cli::commands::Commands;
use chartmark_cli::context::ChartmarkCliContext;
use chartmark_cli::handlers::*;
use chartmark_cli::output::output_error_json;
use clap::{CommandFactory, Parser};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chartmark-cli")]
#[command(about = "Highlight clinical entity annotations in chart text", long_about = None)]
#[command(version = chartmark::VERSION)]
struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    output: String,

    /// Use machine-readable output (alias for --output json)
    #[arg(long, global = true)]
    machine: bool,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli_args = Cli::parse();

    // Determine output format - priority: machine flag > env var > cli arg > default
    let output_format = if cli_args.machine {
        "json".to_string()
    } else if let Ok(env_output) = std::env::var("CHARTMARK_OUTPUT") {
        env_output
    } else {
        cli_args.output.clone()
    };

    // Override quiet flag with environment variable if set
    let is_quiet = cli_args.quiet
        || std::env::var("CHARTMARK_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // Machine mode automatically enables quiet mode for clean JSON output
    let log_level = if is_quiet || cli_args.machine {
        Level::ERROR
    } else if cli_args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli_args, &output_format).await {
        output_error_json(&e, &output_format);
        std::process::exit(1);
    }
}

async fn run(cli_args: Cli, output_format: &str) -> chartmark::Result<()> {
    match cli_args.command {
        Commands::Version => {
            println!("Chartmark CLI v{}", chartmark::VERSION);
        }

        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(
                clap_complete::Shell::from(args.shell),
                &mut command,
                "chartmark-cli",
                &mut std::io::stdout(),
            );
        }

        Commands::Segment(args) => {
            let ctx = ChartmarkCliContext::new(cli_args.config)?;
            handle_segment_command(args, &ctx, output_format).await?;
        }

        Commands::Filters(args) => {
            handle_filters_command(args, output_format).await?;
        }

        Commands::Entity(args) => {
            handle_entity_command(args, output_format).await?;
        }

        Commands::Check(args) => {
            handle_check_command(args, output_format).await?;
        }
    }

    Ok(())
}
