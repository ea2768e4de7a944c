//! dgemm benchmark chart tool.
//!
//! Loads Google Benchmark result files named by a chart TOML file, extracts
//! one aggregate kind from each, and prints absolute, ratio or run-to-run
//! change series as tables or writes them as JSON chart data.

mod chart_cmd;
mod cli;

use anyhow::Result;
use blast_perf::verbose::{self, Verbosity};
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(Verbosity::from_flags(cli.quiet, cli.verbose));

    match cli.command {
        cli::Command::Render(ref args) => chart_cmd::cmd_render(args),
        cli::Command::Inspect(ref args) => chart_cmd::cmd_inspect(args),
        cli::Command::RefName(ref args) => {
            chart_cmd::cmd_ref_name(args);
            Ok(())
        }
    }
}
