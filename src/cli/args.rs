//! Command line argument parsing for the Onoma CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Onoma - Institution name autocomplete and spelling correction
#[derive(Parser, Debug, Clone)]
#[command(name = "onoma")]
#[command(about = "Institution name autocomplete and spelling correction")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct OnomaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl OnomaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Autocomplete a name prefix
    Suggest(SuggestArgs),

    /// Suggest corrections for a mistyped name
    Correct(CorrectArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Where the index is built from.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSONL file of institution records (repeatable)
    #[arg(short, long = "source", value_name = "FILE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Index configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for autocompleting a prefix
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Prefix typed so far
    #[arg(value_name = "PREFIX")]
    pub prefix: String,

    /// Maximum number of suggestions (default: from configuration)
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for correcting a phrase
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Phrase to correct
    #[arg(value_name = "PHRASE")]
    pub phrase: String,

    /// Maximum number of corrections (default: from configuration)
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Include the load report
    #[arg(short, long)]
    pub detailed: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
