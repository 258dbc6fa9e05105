//! Command implementations for the Onoma CLI.

use std::time::Instant;

use log::{debug, info};

use crate::autocomplete::{AutocompleteConfig, AutocompleteIndex, LoadReport};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{OnomaError, Result};
use crate::loader::{JsonlSource, RecordSource};

/// Execute a CLI command.
pub fn execute_command(args: OnomaArgs) -> Result<()> {
    match &args.command {
        Command::Suggest(suggest_args) => suggest(suggest_args, &args),
        Command::Correct(correct_args) => correct(correct_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Autocomplete a prefix.
fn suggest(args: &SuggestArgs, cli_args: &OnomaArgs) -> Result<()> {
    let (index, _) = build_index(&args.source)?;
    let limit = resolve_limit(args.limit, &index)?;

    let start_time = Instant::now();
    let suggestions = index.suggest(&args.prefix, limit);
    let duration = start_time.elapsed();

    output_result(
        "Suggestions",
        &SuggestResults {
            prefix: args.prefix.clone(),
            suggestions,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Correct a mistyped phrase.
fn correct(args: &CorrectArgs, cli_args: &OnomaArgs) -> Result<()> {
    let (index, _) = build_index(&args.source)?;
    let limit = resolve_limit(args.limit, &index)?;

    let start_time = Instant::now();
    let corrections = index.correct(&args.phrase, limit);
    let duration = start_time.elapsed();

    output_result(
        "Corrections",
        &CorrectResults {
            phrase: args.phrase.clone(),
            corrections,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Show index statistics.
fn show_stats(args: &StatsArgs, cli_args: &OnomaArgs) -> Result<()> {
    let start_time = Instant::now();
    let (index, report) = build_index(&args.source)?;
    let duration = start_time.elapsed();

    output_result(
        "Index statistics",
        &StatsResults {
            stats: index.stats(),
            load_report: args.detailed.then_some(report),
            build_duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// The requested result count, or the configured default.
fn resolve_limit(limit: Option<usize>, index: &AutocompleteIndex) -> Result<usize> {
    match limit {
        Some(0) => Err(OnomaError::invalid_argument("--limit must be positive")),
        Some(limit) => Ok(limit),
        None => Ok(index.config().default_limit),
    }
}

/// Build an index from the sources named on the command line.
fn build_index(args: &SourceArgs) -> Result<(AutocompleteIndex, LoadReport)> {
    let config = match &args.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            AutocompleteConfig::from_json_file(path)?
        }
        None => AutocompleteConfig::default(),
    };

    let index = AutocompleteIndex::with_config(config)?;
    let sources: Vec<Box<dyn RecordSource>> = args
        .sources
        .iter()
        .map(|path| Box::new(JsonlSource::new(path)) as Box<dyn RecordSource>)
        .collect();

    let report = index.initialize_from_sources(&sources)?;
    info!("loaded {} of {} sources", report.sources_loaded, sources.len());
    Ok((index, report))
}
