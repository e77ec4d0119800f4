//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command.

use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct SegmentArgs {
    /// Path to the chart text
    #[arg(long, short)]
    pub text: PathBuf,

    /// Path to the entity document (JSON)
    #[arg(long, short)]
    pub entities: PathBuf,

    /// Filter: "all", a trait name (SYMPTOM) or an attribute type (DIRECTION)
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Render format (json, markup, html, terminal); defaults to the configured one
    #[arg(long)]
    pub format: Option<String>,

    /// Segmentation strategy (sweep, per_character); defaults to the configured one
    #[arg(long)]
    pub strategy: Option<String>,

    /// Print a table of segment ranges instead of the rendered text
    #[arg(long)]
    pub list: bool,
}

#[derive(Args)]
pub struct FiltersArgs {
    /// Path to the entity document (JSON)
    #[arg(long, short)]
    pub entities: PathBuf,
}

#[derive(Args)]
pub struct EntityArgs {
    /// Entity ID
    pub id: String,

    /// Path to the entity document (JSON)
    #[arg(long, short)]
    pub entities: PathBuf,

    /// Number of concept suggestions to show
    #[arg(long, default_value_t = 5)]
    pub concepts: usize,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the chart text
    #[arg(long, short)]
    pub text: PathBuf,

    /// Path to the entity document (JSON)
    #[arg(long, short)]
    pub entities: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Power => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
