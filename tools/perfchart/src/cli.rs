//! Command-line interface definitions for perfchart.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Benchmark chart assembly for dgemm result files.
#[derive(Parser)]
#[command(name = "perfchart", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output; show only warnings and results.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show resolved paths, per-source record counts and timings.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Assemble a chart from a chart TOML file and output its series.
    Render(RenderArgs),
    /// Show the run context and one aggregate series of a result file.
    Inspect(InspectArgs),
    /// Print the previous-run file name paired with each given name.
    RefName(RefNameArgs),
}

/// Arguments for the `render` subcommand.
#[derive(Parser)]
pub struct RenderArgs {
    /// Chart configuration file.
    pub config: PathBuf,

    /// Directory holding the result files (overrides `data-dir` in the config).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Aggregate kind to extract (overrides `aggregate` in the config).
    #[arg(long)]
    pub aggregate: Option<String>,

    /// Output format: table (default) or json.
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Output file path (required for json format).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Fail if any configured source is skipped.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser)]
pub struct InspectArgs {
    /// Benchmark result file.
    pub file: PathBuf,

    /// Aggregate kind to extract.
    #[arg(long, default_value = blast_perf::config::DEFAULT_AGGREGATE)]
    pub aggregate: String,
}

/// Arguments for the `ref-name` subcommand.
#[derive(Parser)]
pub struct RefNameArgs {
    /// Result file names.
    #[arg(required = true)]
    pub names: Vec<String>,
}
