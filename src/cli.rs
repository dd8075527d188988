//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Format JSON-lines log records for the console or a beacon endpoint
#[derive(Parser, Debug, Default)]
#[command(name = "bk-log")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directive template (overrides config)
    #[arg(long, value_name = "TEMPLATE")]
    pub format: Option<String>,

    /// Time format for %(asctime) (overrides config)
    #[arg(long, value_name = "FORMAT")]
    pub time_format: Option<String>,

    /// Beacon base URL; records are sent instead of printed
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Minimum level, by name or number
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Only records from this logger and its dotted children
    #[arg(long, value_name = "NAME")]
    pub logger: Option<String>,

    /// Disable styling regardless of the terminal
    #[arg(long)]
    pub no_style: bool,

    /// Print errors inline instead of as an indented block
    #[arg(long)]
    pub no_grouping: bool,

    /// Input file with one JSON record per line (default: stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Utility subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the console template and directives a template compiles to
    Compile {
        /// Directive template
        template: String,
    },
}

// =============================================================================
// Tests
// =============================================================================
